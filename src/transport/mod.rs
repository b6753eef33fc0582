//! HTTP transport layer.
//!
//! The client only ever issues `GET` requests, so the transport contract is a
//! URL plus headers in, status/headers/body out. Non-2xx statuses are returned
//! as responses, never as transport errors.

pub mod blocking_transport;
#[cfg(feature = "metrics")]
pub(crate) mod metrics;

pub use blocking_transport::{BlockingTransport, DynBlockingTransport, UreqBlocking};

use http::{HeaderMap, StatusCode};
use std::time::Duration;
use url::Url;

#[derive(Clone, Debug)]
pub struct TransportRequest {
    pub url: Url,
    pub headers: HeaderMap,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Which kind of Jenkins object a fetch is for; labels spans and metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Resource {
    Server,
    Job,
    Build,
    Other,
}

impl Resource {
    #[cfg_attr(
        not(any(feature = "tracing", feature = "metrics")),
        allow(dead_code)
    )]
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Job => "job",
            Self::Build => "build",
            Self::Other => "other",
        }
    }
}
