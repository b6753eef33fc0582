//! Minimal blocking client for the Jenkins JSON API.
//!
//! ```no_run
//! use jenkins_lite::Client;
//!
//! let client = Client::builder().auth_basic("alice", "api-token").build()?;
//! let server = client.server("https://ci.example.com/")?;
//! for summary in server.jobs() {
//!     let job = summary.resolve(&client)?;
//!     println!("{} {:?}", summary.name, job.color());
//! }
//! # Ok::<(), jenkins_lite::Error>(())
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod transport;
pub mod types;
pub mod util;

pub use api::*;
pub use auth::{Credentials, SecretString};
pub use client::{Client, ClientBuilder};
pub use error::{BodySnippetConfig, Error, ErrorKind, HttpError, Result, TransportErrorKind};
pub use types::*;
pub use util::url::json_api_url;
