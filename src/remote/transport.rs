//! Artifact transport
//!
//! Fetches a single URL into a writer. `http`/`https` go through a blocking
//! `reqwest` client with optional basic auth; `file` URLs are read from disk,
//! which makes local mirrors and tests work without a server.

use std::io::Write;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use url::Url;

use super::contract::Credentials;
use crate::error::{Result, resolve as resolve_error};

/// Default TCP connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default whole-request timeout
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(300);

/// Result of a fetch that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The body was written to the sink
    Fetched,
    /// The repository does not have this path
    Missing,
}

/// Fetches one URL
pub trait Transport {
    /// Write the content at `url` into `sink`
    ///
    /// # Errors
    ///
    /// Returns an error for anything other than success or "not found".
    fn fetch(
        &self,
        url: &Url,
        credentials: Option<&Credentials>,
        sink: &mut dyn Write,
    ) -> Result<FetchOutcome>;
}

/// Transport for `http`, `https` and `file` URLs
pub struct UrlTransport {
    client: Client,
}

impl UrlTransport {
    /// Build a transport with the default timeouts
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized (e.g. no TLS backend).
    pub fn new() -> Result<Self> {
        Self::with_timeouts(DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT)
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_timeouts(connect: Duration, read: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("rtdep/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(connect)
            .timeout(read)
            .build()?;
        Ok(Self { client })
    }

    fn fetch_http(
        &self,
        url: &Url,
        credentials: Option<&Credentials>,
        sink: &mut dyn Write,
    ) -> Result<FetchOutcome> {
        let mut request = self.client.get(url.clone());
        if let Some(creds) = credentials {
            request = request.basic_auth(&creds.username, Some(&creds.password));
        }

        let mut response = request.send()?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(FetchOutcome::Missing);
        }
        if !status.is_success() {
            return Err(resolve_error::transport_failed(
                url.as_str(),
                format!("HTTP {status}"),
            ));
        }

        response.copy_to(sink)?;
        Ok(FetchOutcome::Fetched)
    }
}

fn fetch_file(url: &Url, sink: &mut dyn Write) -> Result<FetchOutcome> {
    let path = url
        .to_file_path()
        .map_err(|()| resolve_error::transport_failed(url.as_str(), "not a local file path"))?;
    if !path.is_file() {
        return Ok(FetchOutcome::Missing);
    }

    let mut file = std::fs::File::open(&path)
        .map_err(|e| resolve_error::transport_failed(url.as_str(), e.to_string()))?;
    std::io::copy(&mut file, sink)
        .map_err(|e| resolve_error::transport_failed(url.as_str(), e.to_string()))?;
    Ok(FetchOutcome::Fetched)
}

impl Transport for UrlTransport {
    fn fetch(
        &self,
        url: &Url,
        credentials: Option<&Credentials>,
        sink: &mut dyn Write,
    ) -> Result<FetchOutcome> {
        match url.scheme() {
            "http" | "https" => self.fetch_http(url, credentials, sink),
            "file" => fetch_file(url, sink),
            other => Err(resolve_error::transport_failed(
                url.as_str(),
                format!("unsupported scheme '{other}'"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RtdepError;
    use crate::test_fixtures::{create_temp_dir, write_file};

    #[test]
    fn test_file_url_fetch() {
        let temp = create_temp_dir();
        let path = write_file(temp.path(), "lib-1.0.jar", b"contents");
        let url = Url::from_file_path(&path).unwrap();

        let transport = UrlTransport::new().unwrap();
        let mut sink = Vec::new();
        let outcome = transport.fetch(&url, None, &mut sink).unwrap();
        assert_eq!(outcome, FetchOutcome::Fetched);
        assert_eq!(sink, b"contents");
    }

    #[test]
    fn test_file_url_missing() {
        let temp = create_temp_dir();
        let url = Url::from_file_path(temp.path().join("absent.jar")).unwrap();

        let transport = UrlTransport::new().unwrap();
        let mut sink = Vec::new();
        assert_eq!(
            transport.fetch(&url, None, &mut sink).unwrap(),
            FetchOutcome::Missing
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unsupported_scheme() {
        let url = Url::parse("ftp://mirror.example.com/lib.jar").unwrap();
        let transport = UrlTransport::new().unwrap();
        let result = transport.fetch(&url, None, &mut Vec::new());
        assert!(matches!(result, Err(RtdepError::TransportFailed { .. })));
    }
}
