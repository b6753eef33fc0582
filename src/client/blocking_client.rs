//! High-level blocking Jenkins client.

use crate::{
    BodySnippetConfig, Build, Credentials, Error, HttpError, Job, SecretString, Server,
    transport::{
        BlockingTransport, DynBlockingTransport, Resource, TransportRequest, TransportResponse,
        UreqBlocking,
    },
    util::{
        diagnostics,
        redact::redact_text,
        url::{json_api_url, sanitize_url_for_error},
    },
};
use http::HeaderMap;
use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Duration};
use url::Url;

#[cfg(feature = "tracing")]
use tracing::field;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configures and constructs [`Client`].
pub struct ClientBuilder {
    username: Option<String>,
    password: Option<SecretString>,
    insecure: bool,
    user_agent: String,
    timeout: Duration,
    connect_timeout: Duration,
    read_timeout: Duration,
    no_proxy: bool,
    default_headers: HeaderMap,
    body_snippet: BodySnippetConfig,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            insecure: false,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            no_proxy: false,
            default_headers: HeaderMap::new(),
            body_snippet: BodySnippetConfig::default(),
        }
    }
}

impl ClientBuilder {
    /// User name for HTTP basic auth. Requires [`ClientBuilder::password`] too.
    pub fn username(mut self, user: impl Into<String>) -> Self {
        self.username = Some(user.into());
        self
    }

    /// Password or API token for HTTP basic auth. Requires [`ClientBuilder::username`] too.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(SecretString::new(password));
        self
    }

    pub fn auth_basic(self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.username(user).password(password)
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.username = Some(credentials.username);
        self.password = Some(credentials.password);
        self
    }

    pub fn no_system_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    pub fn danger_accept_invalid_certs(mut self, yes: bool) -> Self {
        self.insecure = yes;
        self
    }

    /// Override the default `User-Agent` header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = value;
        self
    }

    pub fn connect_timeout(mut self, value: Duration) -> Self {
        self.connect_timeout = value;
        self
    }

    pub fn read_timeout(mut self, value: Duration) -> Self {
        self.read_timeout = value;
        self
    }

    pub fn default_header(
        mut self,
        name: http::header::HeaderName,
        value: http::HeaderValue,
    ) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers.extend(headers);
        self
    }

    pub fn capture_body_snippet(mut self, enabled: bool) -> Self {
        self.body_snippet.enabled = enabled;
        self
    }

    pub fn max_body_snippet_bytes(mut self, max_bytes: usize) -> Self {
        self.body_snippet.max_bytes = max_bytes;
        self
    }

    /// Fails with [`Error::InvalidConfig`] when only one half of the credentials was set.
    pub fn build(self) -> Result<Client, Error> {
        let credentials = Credentials::from_parts(self.username, self.password)?;

        let transport: DynBlockingTransport = Arc::new(UreqBlocking::try_new(
            self.insecure,
            &self.user_agent,
            self.timeout,
            self.connect_timeout,
            self.read_timeout,
            self.no_proxy,
        )?);

        Ok(Client {
            inner: Arc::new(Inner {
                credentials,
                timeout: self.timeout,
                default_headers: self.default_headers,
                body_snippet: self.body_snippet,
                transport,
            }),
        })
    }
}

/// Cheaply clonable handle shared by every entity fetched through it.
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

struct Inner {
    credentials: Option<Credentials>,
    timeout: Duration,
    default_headers: HeaderMap,
    body_snippet: BodySnippetConfig,
    transport: DynBlockingTransport,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("credentials", &self.inner.credentials)
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl Client {
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Anonymous client with default settings.
    pub fn new() -> Result<Self, Error> {
        Self::builder().build()
    }

    /// Fetch the server root at `url`.
    pub fn server(&self, url: impl AsRef<str>) -> Result<Server, Error> {
        Server::new(self, url)
    }

    /// Fetch the job at `url`.
    pub fn job(&self, url: impl AsRef<str>) -> Result<Job, Error> {
        Job::new(self, url)
    }

    /// Fetch the build at `url`; see [`Build::started`] for missing builds.
    pub fn build(&self, url: impl AsRef<str>) -> Result<Build, Error> {
        Build::new(self, url)
    }

    /// GET an arbitrary Jenkins resource and decode its JSON API payload.
    pub fn get_json<T: DeserializeOwned>(&self, url: impl AsRef<str>) -> Result<T, Error> {
        let api_url = json_api_url(url.as_ref())?;
        self.fetch_json(&api_url, Resource::Other)
    }

    #[cfg_attr(
        not(any(feature = "tracing", feature = "metrics")),
        allow(unused_variables)
    )]
    pub(crate) fn fetch_json<T: DeserializeOwned>(
        &self,
        api_url: &Url,
        resource: Resource,
    ) -> Result<T, Error> {
        #[cfg(feature = "metrics")]
        let recorder = crate::transport::metrics::FetchMetrics::start(resource);

        #[cfg(feature = "tracing")]
        let start = std::time::Instant::now();
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "jenkins.request",
            jenkins.resource = resource.as_str(),
            http.method = "GET",
            http.host = %api_url.host_str().unwrap_or_default(),
            http.path = %api_url.path(),
            http.status = field::Empty,
            request_id = field::Empty,
            latency_ms = field::Empty,
            error_kind = field::Empty,
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let result = self
            .execute(api_url)
            .and_then(|resp| self.decode(api_url, &resp));

        #[cfg(feature = "tracing")]
        {
            span.record("latency_ms", start.elapsed().as_millis() as i64);
            if let Err(err) = &result {
                span.record("error_kind", field::debug(err.kind()));
            }
        }
        #[cfg(feature = "metrics")]
        recorder.finish(result.as_ref().err().map(Error::kind));

        result
    }

    fn decode<T: DeserializeOwned>(
        &self,
        api_url: &Url,
        resp: &TransportResponse,
    ) -> Result<T, Error> {
        serde_json::from_slice(&resp.body).map_err(|source| Error::Decode {
            status: resp.status,
            path: api_url.path().to_string().into_boxed_str(),
            request_id: diagnostics::request_id(&resp.headers),
            body_snippet: diagnostics::body_snippet(
                &resp.body,
                self.inner.body_snippet,
                self.inner.credentials.as_ref(),
            ),
            source: Box::new(source),
        })
    }

    /// One GET; a non-2xx status becomes the matching [`Error`] variant.
    fn execute(&self, url: &Url) -> Result<TransportResponse, Error> {
        let mut headers = self.inner.default_headers.clone();
        if let Some(credentials) = &self.inner.credentials {
            credentials.apply(&mut headers)?;
        }

        let resp = self.inner.transport.get(TransportRequest {
            url: url.clone(),
            headers,
            timeout: self.inner.timeout,
        })?;

        let request_id = diagnostics::request_id(&resp.headers);

        #[cfg(feature = "tracing")]
        {
            let span = tracing::Span::current();
            span.record("http.status", resp.status.as_u16() as i64);
            if let Some(rid) = request_id.as_deref() {
                span.record("request_id", field::display(rid));
            }
        }

        if resp.status.is_success() {
            return Ok(resp);
        }

        let credentials = self.inner.credentials.as_ref();
        let message = diagnostics::extract_message(&resp.body)
            .map(|msg| redact_text(msg.into(), credentials).into_boxed_str());
        let http_error = HttpError {
            status: resp.status,
            url: Box::new(sanitize_url_for_error(url)),
            message,
            request_id,
            body_snippet: diagnostics::body_snippet(
                &resp.body,
                self.inner.body_snippet,
                credentials,
            ),
        };
        let retry_after =
            diagnostics::parse_retry_after(&resp.headers, std::time::SystemTime::now());
        Err(Error::from_http(http_error, retry_after))
    }
}
