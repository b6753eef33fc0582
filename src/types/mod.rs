//! JSON payloads and summary references.

pub mod builds;
pub mod common;
pub mod jobs;
pub mod server;

pub use builds::*;
pub use common::*;
pub use jobs::*;
pub use server::*;
