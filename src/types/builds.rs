use super::{BuildResult, common::null_as_default};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A build as listed by its job: enough to fetch the full [`crate::Build`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct BuildSummary {
    #[serde(deserialize_with = "null_as_default")]
    pub number: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// JSON payload of `GET <build>/api/json`.
///
/// Durations are milliseconds as reported by Jenkins; `estimatedDuration` is
/// `-1` when Jenkins has no history to estimate from.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct BuildInfo {
    pub id: Option<String>,
    pub number: Option<u64>,
    pub url: Option<String>,
    pub display_name: Option<String>,
    pub result: Option<BuildResult>,
    #[serde(deserialize_with = "null_as_default")]
    pub building: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub estimated_duration: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: i64,
    /// Milliseconds since the epoch when the build was scheduled.
    pub timestamp: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub actions: Vec<Value>,
}
