//! Validated newtype wrappers for configuration values.
//!
//! Invalid values are rejected on construction with a [`ConfigError`].

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated API endpoint URL.
///
/// The URL must carry an alphabetic scheme and a non-empty host, which may be
/// a bracketed IPv6 literal such as `[::1]`. When the URL
/// has no path, [`Endpoint::DEFAULT_PATH`] is appended, so
/// `http://localhost:9000` becomes `http://localhost:9000/api`.
///
/// # Example
///
/// ```rust
/// use tinyhouse_client::Endpoint;
///
/// let endpoint = Endpoint::new("http://localhost:9000").unwrap();
/// assert_eq!(endpoint.as_ref(), "http://localhost:9000/api");
/// assert_eq!(endpoint.scheme(), "http");
/// assert_eq!(endpoint.host_name(), "localhost");
/// assert_eq!(endpoint.path(), "/api");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
    path_start: usize,
}

impl Endpoint {
    /// Path used when the URL does not name one.
    pub const DEFAULT_PATH: &'static str = "/api";

    /// Creates a new validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyEndpoint`] for an empty string and
    /// [`ConfigError::InvalidEndpoint`] when the scheme or host is missing.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let mut url = url.trim().to_string();
        if url.is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidEndpoint { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidEndpoint { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = if remainder.starts_with('[') {
            // Bracketed IPv6 literal, kept with its brackets.
            match remainder.find(']') {
                Some(i) if i > 1 => host_start + i + 1,
                _ => return Err(ConfigError::InvalidEndpoint { url: url.clone() }),
            }
        } else {
            remainder
                .find([':', '/', '?', '#'])
                .map_or(url.len(), |i| host_start + i)
        };
        if host_end == host_start {
            return Err(ConfigError::InvalidEndpoint { url: url.clone() });
        }

        // Path begins after an optional port.
        let path_start = url[host_end..]
            .find(['/', '?', '#'])
            .map_or(url.len(), |i| host_end + i);
        let port_part = &url[host_end..path_start];
        if !port_part.is_empty() {
            let port = port_part
                .strip_prefix(':')
                .ok_or_else(|| ConfigError::InvalidEndpoint { url: url.clone() })?;
            if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
                return Err(ConfigError::InvalidEndpoint { url: url.clone() });
            }
        }

        if !url[path_start..].starts_with('/') {
            url.insert_str(path_start, Self::DEFAULT_PATH);
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
            path_start,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Returns the path portion of the URL, including any query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.url[self.path_start..]
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for Endpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for Endpoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
