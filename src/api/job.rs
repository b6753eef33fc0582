use crate::{
    Build, BuildSummary, Client, Error, HealthReport, JobInfo, JobSummary,
    transport::Resource,
    util::url::{child_api_url, json_api_url, resource_url},
};
use url::Url;

/// A Jenkins job, as seen through `GET <job>/api/json`.
#[derive(Clone, Debug)]
pub struct Job {
    client: Client,
    url: Url,
    api_url: Url,
    info: JobInfo,
}

impl Job {
    /// Fetch the job at `url` (with or without a trailing `/api/json`).
    pub fn new(client: &Client, url: impl AsRef<str>) -> Result<Self, Error> {
        let api_url = json_api_url(url.as_ref())?;
        Self::from_api_url(client, api_url)
    }

    pub(crate) fn from_api_url(client: &Client, api_url: Url) -> Result<Self, Error> {
        let info = client.fetch_json(&api_url, Resource::Job)?;
        Ok(Self {
            client: client.clone(),
            url: resource_url(&api_url),
            api_url,
            info,
        })
    }

    /// Re-fetch and overwrite every attribute.
    pub fn refresh(&mut self) -> Result<(), Error> {
        self.info = self.client.fetch_json(&self.api_url, Resource::Job)?;
        Ok(())
    }

    /// Fetch build `number` of this job.
    pub fn build(&self, number: u64) -> Result<Build, Error> {
        let number = number.to_string();
        let api_url = child_api_url(&self.url, [number.as_str()])?;
        Build::from_api_url(&self.client, api_url)
    }

    pub fn last_build(&self) -> Result<Option<Build>, Error> {
        self.resolve_pointer(self.info.last_build.as_ref())
    }

    pub fn last_completed_build(&self) -> Result<Option<Build>, Error> {
        self.resolve_pointer(self.info.last_completed_build.as_ref())
    }

    pub fn last_successful_build(&self) -> Result<Option<Build>, Error> {
        self.resolve_pointer(self.info.last_successful_build.as_ref())
    }

    pub fn last_failed_build(&self) -> Result<Option<Build>, Error> {
        self.resolve_pointer(self.info.last_failed_build.as_ref())
    }

    fn resolve_pointer(&self, summary: Option<&BuildSummary>) -> Result<Option<Build>, Error> {
        summary
            .map(|summary| summary.resolve(&self.client))
            .transpose()
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

    /// The `url` field reported by Jenkins, which may differ from [`Job::url`] behind a proxy.
    #[must_use]
    pub fn reported_url(&self) -> Option<&str> {
        self.info.url.as_deref()
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.info.name.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.info.description.as_deref()
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.info.display_name.as_deref()
    }

    /// Ball color, e.g. `blue`, `red`, `notbuilt`; an `_anime` suffix means a build is running.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.info.color.as_deref()
    }

    #[must_use]
    pub fn in_queue(&self) -> bool {
        self.info.in_queue
    }

    #[must_use]
    pub fn buildable(&self) -> Option<bool> {
        self.info.buildable
    }

    #[must_use]
    pub fn health_reports(&self) -> &[HealthReport] {
        &self.info.health_report
    }

    #[must_use]
    pub fn next_build_number(&self) -> Option<u64> {
        self.info.next_build_number
    }

    /// Builds as of the last fetch, newest first (Jenkins order).
    #[must_use]
    pub fn builds(&self) -> &[BuildSummary] {
        &self.info.builds
    }

    #[must_use]
    pub fn info(&self) -> &JobInfo {
        &self.info
    }
}

impl JobSummary {
    /// Fetch the full job this summary points at.
    pub fn resolve(&self, client: &Client) -> Result<Job, Error> {
        Job::new(client, &self.url)
    }
}
