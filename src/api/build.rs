use crate::{
    BuildInfo, BuildResult, BuildSummary, Client, Error,
    transport::Resource,
    util::url::{json_api_url, resource_url},
};
use http::StatusCode;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// What the last fetch of a build returned.
#[derive(Clone, Debug)]
enum BuildState {
    Started(BuildInfo),
    /// Jenkins answered with a non-2xx status, typically 404 for a build
    /// that is still queued or was never scheduled.
    Pending { status: StatusCode },
}

impl BuildState {
    fn fetch(client: &Client, api_url: &Url) -> Result<Self, Error> {
        match client.fetch_json::<BuildInfo>(api_url, Resource::Build) {
            Ok(info) => Ok(Self::Started(info)),
            Err(err) => match err.http() {
                Some(http) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        status = http.status.as_u16(),
                        path = %http.path(),
                        "build not started"
                    );
                    Ok(Self::Pending {
                        status: http.status,
                    })
                }
                None => Err(err),
            },
        }
    }
}

/// One execution of a job, as seen through `GET <build>/api/json`.
///
/// Unlike [`crate::Job`] and [`crate::Server`], a build that Jenkins does not
/// (yet) serve is not an error: it is reported with [`Build::started`] `== false`
/// and can be polled with [`Build::refresh`].
#[derive(Clone, Debug)]
pub struct Build {
    client: Client,
    url: Url,
    api_url: Url,
    state: BuildState,
}

impl Build {
    /// Fetch the build at `url` (with or without a trailing `/api/json`).
    pub fn new(client: &Client, url: impl AsRef<str>) -> Result<Self, Error> {
        let api_url = json_api_url(url.as_ref())?;
        Self::from_api_url(client, api_url)
    }

    pub(crate) fn from_api_url(client: &Client, api_url: Url) -> Result<Self, Error> {
        let state = BuildState::fetch(client, &api_url)?;
        Ok(Self {
            client: client.clone(),
            url: resource_url(&api_url),
            api_url,
            state,
        })
    }

    /// Re-fetch and overwrite every attribute, including [`Build::started`].
    pub fn refresh(&mut self) -> Result<(), Error> {
        self.state = BuildState::fetch(&self.client, &self.api_url)?;
        Ok(())
    }

    /// Whether the last fetch returned the build.
    #[must_use]
    pub fn started(&self) -> bool {
        matches!(self.state, BuildState::Started(_))
    }

    /// Started and no longer running.
    #[must_use]
    pub fn complete(&self) -> bool {
        self.info().is_some_and(|info| !info.building)
    }

    /// Complete with a `SUCCESS` result.
    #[must_use]
    pub fn successful(&self) -> bool {
        self.complete() && self.result().is_some_and(BuildResult::is_success)
    }

    /// HTTP status of the last fetch when it did not return the build.
    #[must_use]
    pub fn pending_status(&self) -> Option<StatusCode> {
        match self.state {
            BuildState::Pending { status } => Some(status),
            BuildState::Started(_) => None,
        }
    }

    /// Payload of the last successful fetch.
    #[must_use]
    pub fn info(&self) -> Option<&BuildInfo> {
        match &self.state {
            BuildState::Started(info) => Some(info),
            BuildState::Pending { .. } => None,
        }
    }

    /// Resource URL as requested, always ending in `/`.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.info().and_then(|info| info.id.as_deref())
    }

    #[must_use]
    pub fn number(&self) -> Option<u64> {
        self.info().and_then(|info| info.number)
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.info().and_then(|info| info.display_name.as_deref())
    }

    /// `None` while running or not started.
    #[must_use]
    pub fn result(&self) -> Option<BuildResult> {
        self.info().and_then(|info| info.result)
    }

    #[must_use]
    pub fn building(&self) -> bool {
        self.info().is_some_and(|info| info.building)
    }

    #[must_use]
    pub fn estimated_duration(&self) -> Option<Duration> {
        self.info().and_then(|info| millis(info.estimated_duration))
    }

    /// Zero while the build is still running.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.info().and_then(|info| millis(info.duration))
    }

    #[must_use]
    pub fn timestamp(&self) -> Option<i64> {
        self.info().and_then(|info| info.timestamp)
    }

    #[must_use]
    pub fn actions(&self) -> &[Value] {
        self.info()
            .map(|info| info.actions.as_slice())
            .unwrap_or_default()
    }
}

fn millis(ms: i64) -> Option<Duration> {
    u64::try_from(ms).ok().map(Duration::from_millis)
}

impl BuildSummary {
    /// Fetch the full build this summary points at.
    pub fn resolve(&self, client: &Client) -> Result<Build, Error> {
        Build::new(client, &self.url)
    }
}
