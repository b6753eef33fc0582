use crate::Error;
use url::Url;

const API_SUFFIX: &str = "api/json";

/// Turn any Jenkins resource URL into its JSON API endpoint.
///
/// A single trailing `/` is dropped, then `/api/json` is appended unless the
/// path already ends with it. Applying this twice yields the same URL.
///
/// ```
/// let url = jenkins_lite::json_api_url("https://ci.example.com/job/core/").unwrap();
/// assert_eq!(url.as_str(), "https://ci.example.com/job/core/api/json");
/// ```
pub fn json_api_url(raw: &str) -> Result<Url, Error> {
    let url = Url::parse(raw).map_err(|err| Error::InvalidConfig {
        message: format!("invalid Jenkins URL `{raw}`").into_boxed_str(),
        source: Some(Box::new(err)),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_config(format!(
            "Jenkins URL must use http or https, got `{}`",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() {
        return Err(Error::invalid_config(
            "Jenkins URL must be a hierarchical URL",
        ));
    }

    Ok(to_json_api(url))
}

pub(crate) fn to_json_api(mut url: Url) -> Url {
    let path = url.path();
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    if trimmed.ends_with(API_SUFFIX) {
        let trimmed = trimmed.to_owned();
        url.set_path(&trimmed);
        return url;
    }

    let path = format!("{trimmed}/{API_SUFFIX}");
    url.set_path(&path);
    url
}

/// Inverse of [`json_api_url`]: the resource URL, always ending in `/`.
pub(crate) fn resource_url(api_url: &Url) -> Url {
    let mut url = api_url.clone();
    url.set_query(None);
    url.set_fragment(None);

    let path = url.path();
    let base = path.strip_suffix(API_SUFFIX).unwrap_or(path);
    let base = if base.ends_with('/') {
        base.to_owned()
    } else {
        format!("{base}/")
    };
    url.set_path(&base);
    url
}

/// Append percent-encoded path segments below `resource` and return the JSON API URL.
pub(crate) fn child_api_url<'a, I>(resource: &Url, segments: I) -> Result<Url, Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut url = resource.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| Error::invalid_config("Jenkins URL must be a hierarchical URL"))?;
        path.pop_if_empty();
        for seg in segments {
            path.push(seg);
        }
    }
    Ok(to_json_api(url))
}

pub(crate) fn sanitize_url_for_error(url: &Url) -> Url {
    let mut safe = url.clone();
    safe.set_query(None);
    safe.set_fragment(None);
    let _ = safe.set_username("");
    let _ = safe.set_password(None);
    safe
}
