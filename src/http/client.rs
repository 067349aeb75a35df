//! HTTP client for the configuration API
//!
//! Every call is a single JSON POST. There is no retry or backoff: a
//! transport error or non-success status goes straight back to the caller.

use crate::error::{Error, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Credentials attached to every request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestAuth {
    /// No credentials
    #[default]
    None,
    /// `Authorization: Bearer <token>`
    Bearer(String),
}

/// Options shared by all requests of a service
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Root of the configuration API (e.g. `https://host/api`)
    pub api_url: Url,
    /// Credentials
    pub auth: RequestAuth,
    /// Extra headers for all requests
    pub headers: HashMap<String, String>,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl RequestOptions {
    /// Create options for the given API root
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            auth: RequestAuth::None,
            headers: HashMap::new(),
            timeout: Duration::from_secs(30),
            user_agent: format!("solidafy-console/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Parse the API root and create options for it
    pub fn parse(api_url: &str) -> Result<Self> {
        Ok(Self::new(Url::parse(api_url)?))
    }

    /// Set credentials
    #[must_use]
    pub fn auth(mut self, auth: RequestAuth) -> Self {
        self.auth = auth;
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Thin JSON client over reqwest
pub struct HttpClient {
    client: Client,
    options: RequestOptions,
}

impl HttpClient {
    /// Create a client with the given options
    pub fn new(options: RequestOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(&options.user_agent)
            .build()?;

        Ok(Self { client, options })
    }

    /// Options this client was built with
    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Resolve a path below the API root
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.options.api_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// POST a JSON body
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.endpoint(path)?;

        let mut req = self.client.post(url.clone()).json(body);
        for (key, value) in &self.options.headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if let RequestAuth::Bearer(token) = &self.options.auth {
            req = req.bearer_auth(token);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(%url, status = status.as_u16(), "Request failed");
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!(%url, status = status.as_u16(), "Request succeeded");
        Ok(response)
    }

    /// POST a JSON body and parse the JSON response
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.post(path, body).await?;
        let json: T = response.json().await?;
        Ok(json)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("api_url", &self.options.api_url.as_str())
            .field("has_auth", &(self.options.auth != RequestAuth::None))
            .finish_non_exhaustive()
    }
}
