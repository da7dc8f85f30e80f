// Shared request layer for every Kontur Talk facade.
//
// One pooled `reqwest::Client` carries the fixed auth and content headers;
// every facade call funnels through `Transport::send`, which decodes the
// body leniently and classifies failures into `Error`.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::query::Query;

/// Vendor domain under which every tenant lives.
pub const DEFAULT_DOMAIN: &str = "ktalk.ru";

/// Header carrying the raw API key.
pub const AUTH_HEADER: &str = "X-Auth-Token";

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(rename = "errorMessage", default)]
    error_message: Option<String>,
}

// ── Transport config ─────────────────────────────────────────────────

/// Settings for the pooled HTTP client.
///
/// Leaving `timeout` unset keeps reqwest's default (no overall timeout).
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: concat!("ktalk-api/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a `reqwest::Client` with the given default headers.
    pub fn build_client_with_headers(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .default_headers(headers);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().map_err(Error::ClientBuild)
    }
}

// ── Transport ────────────────────────────────────────────────────────

/// The single choke point for network I/O.
///
/// Immutable after construction. Cheap to share behind an `Arc`; the
/// inner reqwest client pools connections across sequential calls.
#[derive(Debug)]
pub struct Transport {
    http: reqwest::Client,
    base_url: Url,
}

impl Transport {
    // ── Constructors ─────────────────────────────────────────────────

    /// Target `https://{tenant}.ktalk.ru/api`. No request is sent.
    pub fn new(
        tenant: &str,
        api_key: &SecretString,
        config: &TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = tenant_base_url(tenant)?;
        Self::with_base_url(base_url.as_str(), api_key, config)
    }

    /// Target an explicit API root, e.g. a self-hosted installation.
    pub fn with_base_url(
        base_url: &str,
        api_key: &SecretString,
        config: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = config.build_client_with_headers(default_headers(api_key)?)?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        Ok(Self { http, base_url })
    }

    /// The API root every relative path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying pooled HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// `{base}/{path}`, with leading slashes on `path` dropped.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub async fn get(&self, path: &str, query: &Query) -> Result<Value, Error> {
        self.send(Method::GET, path, query, None::<&()>).await
    }

    pub async fn post<B: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &B,
        query: &Query,
    ) -> Result<Value, Error> {
        self.send(Method::POST, path, query, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &B,
        query: &Query,
    ) -> Result<Value, Error> {
        self.send(Method::PUT, path, query, Some(body)).await
    }

    pub async fn delete(&self, path: &str, query: &Query) -> Result<Value, Error> {
        self.send(Method::DELETE, path, query, None::<&()>).await
    }

    async fn send<B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: Option<&B>,
    ) -> Result<Value, Error> {
        let url = self.url(path)?;
        debug!("{method} {url}");

        let mut builder: RequestBuilder = self.http.request(method, url);
        if !query.is_empty() {
            builder = builder.query(&query.to_pairs());
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(transport_error)?;
        handle_response(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response(resp: reqwest::Response) -> Result<Value, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(classify(status, resp).await);
    }

    let body = resp.text().await.map_err(transport_error)?;
    trace!(%status, bytes = body.len(), "response received");
    Ok(decode_lenient(&body))
}

/// Empty, `null`, or malformed bodies on a 2xx all decode to `{}`.
fn decode_lenient(body: &str) -> Value {
    if body.trim().is_empty() {
        return empty_object();
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) => empty_object(),
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "ignoring undecodable success body");
            empty_object()
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

async fn classify(status: StatusCode, resp: reqwest::Response) -> Error {
    let code = status.as_u16();

    // 4xx/5xx always produce a status error to chain as the cause.
    let source = match resp.error_for_status_ref() {
        Err(e) => e,
        Ok(_) => {
            return Error::Transport {
                status: Some(code),
                message: format!("unexpected HTTP status {status}"),
                source: None,
            };
        }
    };

    match code {
        429 => Error::RateLimited {
            status: code,
            source,
        },
        404 => Error::NotFound {
            status: code,
            source,
        },
        400..=499 => {
            let raw = resp.text().await.unwrap_or_default();
            Error::Api {
                status: code,
                message: server_message(&raw).unwrap_or_else(|| "API error".to_owned()),
                source,
            }
        }
        _ => Error::Transport {
            status: Some(code),
            message: source.to_string(),
            source: Some(source),
        },
    }
}

fn server_message(raw: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(raw)
        .ok()
        .and_then(|e| e.error_message)
}

fn transport_error(e: reqwest::Error) -> Error {
    Error::Transport {
        status: e.status().map(|s| s.as_u16()),
        message: e.to_string(),
        source: Some(e),
    }
}

// ── Construction helpers ─────────────────────────────────────────────

/// `https://{tenant}.ktalk.ru/api`
pub fn tenant_base_url(tenant: &str) -> Result<Url, Error> {
    let trimmed = tenant.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidTenant {
            tenant: tenant.to_owned(),
        });
    }
    let tenant = trimmed;
    Ok(Url::parse(&format!("https://{tenant}.{DEFAULT_DOMAIN}/api"))?)
}

fn default_headers(api_key: &SecretString) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    let mut key_value = HeaderValue::from_str(api_key.expose_secret())?;
    key_value.set_sensitive(true);
    headers.insert(AUTH_HEADER, key_value);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}
