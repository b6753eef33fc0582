use super::Resource;
use crate::ErrorKind;
use std::time::{Duration, Instant};

/// Records one fetch: held while the request is in flight, closed by [`FetchMetrics::finish`].
pub(crate) struct FetchMetrics {
    resource: &'static str,
    started: Instant,
    inflight: metrics::Gauge,
}

impl FetchMetrics {
    pub(crate) fn start(resource: Resource) -> Self {
        let resource = resource.as_str();
        let inflight = metrics::gauge!("jenkins_lite_fetches_inflight", "resource" => resource);
        inflight.increment(1.0);
        Self {
            resource,
            started: Instant::now(),
            inflight,
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// `None` for a fetch that returned a 2xx response.
    pub(crate) fn finish(self, error: Option<ErrorKind>) {
        let outcome = error.map_or("ok", outcome_label);
        metrics::counter!(
            "jenkins_lite_fetches_total",
            "resource" => self.resource,
            "outcome" => outcome
        )
        .increment(1);
        metrics::histogram!("jenkins_lite_fetch_duration_seconds", "resource" => self.resource)
            .record(self.elapsed());
    }
}

impl Drop for FetchMetrics {
    fn drop(&mut self) {
        self.inflight.decrement(1.0);
    }
}

fn outcome_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Auth => "auth",
        ErrorKind::NotFound => "not_found",
        ErrorKind::RateLimited => "rate_limited",
        ErrorKind::Api => "api",
        ErrorKind::Transport => "transport",
        ErrorKind::Decode => "decode",
        ErrorKind::InvalidConfig => "invalid_config",
    }
}
