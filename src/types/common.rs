use serde::{Deserialize, Deserializer, Serialize};

/// A job path below a server, supporting folders like `team/app`.
///
/// `team/app` maps to the URL segments `job/team/job/app`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobPath(String);

impl JobPath {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn url_segments(&self) -> impl Iterator<Item = &str> {
        self.0
            .split('/')
            .filter(|segment| !segment.is_empty())
            .flat_map(|segment| ["job", segment])
    }
}

impl From<&str> for JobPath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for JobPath {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Reads an explicit JSON `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of a job's `healthReport` array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct HealthReport {
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    pub icon_url: Option<String>,
    /// 0 (worst) to 100 (best).
    #[serde(deserialize_with = "null_as_default")]
    pub score: u8,
}

/// Outcome of a finished build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum BuildResult {
    Success,
    Unstable,
    Failure,
    NotBuilt,
    Aborted,
    #[serde(other)]
    Unknown,
}

impl BuildResult {
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}
