pub(crate) mod diagnostics;
pub(crate) mod redact;
pub mod url;
