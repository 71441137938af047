//! HTTP client shared by every service

use crate::error::{ClientError, Result};
use crate::token::TokenProvider;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// A single change to the headers a request would otherwise carry
#[derive(Debug, Clone)]
pub enum HeaderOverride {
    Set(HeaderName, HeaderValue),
    Remove(HeaderName),
}

/// Per-request header overrides, applied after the defaults and the bearer token
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    overrides: Vec<HeaderOverride>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.overrides.push(HeaderOverride::Set(name, value));
        self
    }

    pub fn remove(mut self, name: HeaderName) -> Self {
        self.overrides.push(HeaderOverride::Remove(name));
        self
    }

    /// Options for a call that must not carry this application's credentials
    pub fn without_auth() -> Self {
        Self::new().remove(AUTHORIZATION)
    }

    pub fn overrides(&self) -> &[HeaderOverride] {
        &self.overrides
    }

    fn apply(&self, headers: &mut HeaderMap) {
        for o in &self.overrides {
            match o {
                HeaderOverride::Set(name, value) => {
                    headers.insert(name.clone(), value.clone());
                }
                HeaderOverride::Remove(name) => {
                    headers.remove(name);
                }
            }
        }
    }
}

/// Pre-configured HTTP client: base URL, JSON default headers and an
/// optional bearer-token source.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
    default_headers: HeaderMap,
    tokens: Option<Arc<dyn TokenProvider>>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.tokens.is_some())
            .finish()
    }
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: impl Into<String>, tokens: Option<Arc<dyn TokenProvider>>) -> Result<Self> {
        let client = ReqwestClient::builder().build()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_headers,
            tokens,
        })
    }

    /// Absolute URL for a backend path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Headers a request will carry: defaults, then the bearer token, then overrides
    pub fn headers_for(&self, options: &RequestOptions) -> HeaderMap {
        let mut headers = self.default_headers.clone();

        if let Some(token) = self.tokens.as_ref().and_then(|t| t.bearer_token()) {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(e) => warn!(error = %e, "stored token is not a valid header value; sending without it"),
            }
        }

        options.apply(&mut headers);
        headers
    }

    /// Start a request against an absolute URL with the resolved headers
    pub fn request(&self, method: Method, url: &str, options: &RequestOptions) -> RequestBuilder {
        debug!("Making {} request to {}", method, url);
        self.client
            .request(method, url)
            .headers(self.headers_for(options))
    }

    /// Make a GET request
    pub async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let mut request = self.request(Method::GET, &url, &RequestOptions::default());
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send(request).await
    }

    /// Make a POST request with a JSON body
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = self
            .request(Method::POST, &url, &RequestOptions::default())
            .json(body);
        self.send(request).await
    }

    /// Make a PUT request with query parameters and no body
    pub async fn put<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let mut request = self.request(Method::PUT, &url, &RequestOptions::default());
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send(request).await
    }

    /// Send a prepared request and decode its body
    pub async fn send<T>(&self, request: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(|e| {
            error!("Request failed: {}", e);
            ClientError::Transport(e)
        })?;

        decode_response(response).await
    }
}

/// Turn a backend response into a typed value or a normalized error
async fn decode_response<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = backend_message(&body).unwrap_or(body);
        error!("Request failed with status {}: {}", status.as_u16(), message);
        return Err(ClientError::http(status.as_u16(), message));
    }

    debug!("Request successful: {}", status);
    serde_json::from_str(&body).map_err(|e| {
        error!("Failed to deserialize response: {}", e);
        ClientError::malformed(e.to_string())
    })
}

/// `message` field of a JSON error body, if there is one
fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
