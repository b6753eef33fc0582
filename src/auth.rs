use crate::Error;
use base64::{Engine, engine::general_purpose::STANDARD as B64};
use http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use std::fmt;

#[derive(Clone, Default, Eq, PartialEq)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// HTTP basic-auth credentials (user name plus password or API token).
#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password),
        }
    }

    /// Pair up separately supplied halves.
    ///
    /// Both absent means anonymous access. Exactly one present is a
    /// configuration error: the request must not silently go out unauthenticated.
    pub fn from_parts(
        username: Option<String>,
        password: Option<SecretString>,
    ) -> Result<Option<Self>, Error> {
        match (username, password) {
            (None, None) => Ok(None),
            (Some(username), Some(password)) => Ok(Some(Self { username, password })),
            (Some(username), None) => Err(Error::invalid_config(format!(
                "username `{username}` was given without a password"
            ))),
            (None, Some(_)) => Err(Error::invalid_config(
                "password was given without a username",
            )),
        }
    }

    pub(crate) fn secrets(&self) -> Vec<&str> {
        vec![self.password.expose()]
    }

    pub(crate) fn apply(&self, headers: &mut HeaderMap) -> Result<(), Error> {
        let raw = format!(
            "Basic {}",
            B64.encode(format!("{}:{}", self.username, self.password.expose()))
        );
        let mut value = HeaderValue::from_str(&raw).map_err(|err| Error::InvalidConfig {
            message: "invalid Authorization header value".into(),
            source: Some(Box::new(err)),
        })?;
        value.set_sensitive(true);

        headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}
