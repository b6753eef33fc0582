use super::{JobSummary, common::null_as_default};
use serde::Deserialize;

/// JSON payload of `GET <server>/api/json`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ServerInfo {
    pub mode: Option<String>,
    pub node_name: Option<String>,
    pub node_description: Option<String>,
    pub description: Option<String>,
    pub num_executors: Option<u32>,
    pub use_security: Option<bool>,
    #[serde(deserialize_with = "null_as_default")]
    pub jobs: Vec<JobSummary>,
}
