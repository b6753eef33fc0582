use crate::{
    Client, Error, Job, JobPath, JobSummary, ServerInfo,
    transport::Resource,
    util::url::{child_api_url, json_api_url, resource_url},
};
use url::Url;

/// A Jenkins installation, as seen through `GET <base>/api/json`.
#[derive(Clone, Debug)]
pub struct Server {
    client: Client,
    url: Url,
    api_url: Url,
    info: ServerInfo,
}

impl Server {
    /// Fetch the server root at `url` (with or without a trailing `/api/json`).
    pub fn new(client: &Client, url: impl AsRef<str>) -> Result<Self, Error> {
        let api_url = json_api_url(url.as_ref())?;
        let info = client.fetch_json(&api_url, Resource::Server)?;
        Ok(Self {
            client: client.clone(),
            url: resource_url(&api_url),
            api_url,
            info,
        })
    }

    /// Re-fetch and overwrite every attribute.
    pub fn refresh(&mut self) -> Result<(), Error> {
        self.info = self.client.fetch_json(&self.api_url, Resource::Server)?;
        Ok(())
    }

    /// Base URL, always ending in `/`.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Top-level jobs as of the last fetch.
    #[must_use]
    pub fn jobs(&self) -> &[JobSummary] {
        &self.info.jobs
    }

    #[must_use]
    pub fn find_job(&self, name: &str) -> Option<&JobSummary> {
        self.info.jobs.iter().find(|job| job.name == name)
    }

    /// Fetch a job by name or folder path (`team/app`), without consulting [`Server::jobs`].
    ///
    /// A path with no name in it (`""`, `"/"`) is rejected with [`Error::InvalidConfig`].
    pub fn job(&self, path: impl Into<JobPath>) -> Result<Job, Error> {
        let path = path.into();
        if path.url_segments().next().is_none() {
            return Err(Error::invalid_config(format!(
                "job path `{}` names no job",
                path.as_str()
            )));
        }
        let api_url = child_api_url(&self.url, path.url_segments())?;
        Job::from_api_url(&self.client, api_url)
    }

    #[must_use]
    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.info.description.as_deref()
    }

    #[must_use]
    pub fn node_description(&self) -> Option<&str> {
        self.info.node_description.as_deref()
    }

    #[must_use]
    pub fn num_executors(&self) -> Option<u32> {
        self.info.num_executors
    }
}
