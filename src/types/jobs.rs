use super::{BuildSummary, HealthReport, common::null_as_default};
use serde::{Deserialize, Serialize};

/// A job as listed by its parent: enough to fetch the full [`crate::Job`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct JobSummary {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    /// Ball color, e.g. `blue`, `red`, `blue_anime`.
    pub color: Option<String>,
}

/// JSON payload of `GET <job>/api/json`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct JobInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub display_name: Option<String>,
    pub url: Option<String>,
    pub color: Option<String>,
    pub buildable: Option<bool>,
    #[serde(deserialize_with = "null_as_default")]
    pub in_queue: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub health_report: Vec<HealthReport>,
    pub next_build_number: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub builds: Vec<BuildSummary>,
    pub last_build: Option<BuildSummary>,
    pub last_completed_build: Option<BuildSummary>,
    pub last_successful_build: Option<BuildSummary>,
    pub last_failed_build: Option<BuildSummary>,
}
