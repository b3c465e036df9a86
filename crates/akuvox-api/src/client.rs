// Cloud HTTP client and session core
//
// Wraps `reqwest::Client` with Akuvox-specific URL construction,
// result-code classification, and token/profile state. Session operations
// (login, accessors) and endpoint modules (communities, devices) are
// implemented as inherent methods in separate files to keep this module
// focused on dispatch mechanics.

use std::fmt;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use secrecy::SecretString;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::region::Subdomain;
use crate::result_code::{self, Outcome, RESULT_UNKNOWN};
use crate::transport::TransportConfig;

/// Header carrying the session token on authenticated requests.
pub(crate) const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Account credentials for the SmartPlus cloud.
///
/// The password is wrapped in [`SecretString`] and only exposed at the
/// moment the login body is built. `Debug` output redacts both fields.
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    pub(crate) fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &SecretString {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &"<redacted>")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Mutable session state guarded by the client's lock.
///
/// Updates are additive: a login reply only overwrites the fields it
/// actually carries, so a later reply with fewer fields never clears
/// values stored by an earlier one, and nothing is reset on a failed
/// attempt.
#[derive(Default)]
pub(crate) struct SessionState {
    pub token: Option<String>,
    pub grade: Option<String>,
    pub account: Option<String>,
    pub time_zone: Option<String>,
    pub community_id: Option<String>,
    pub role: Option<String>,
}

/// Per-request options for [`CloudClient::request`]: extra headers and an
/// optional JSON body.
#[derive(Debug, Default, Clone)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RequestOptions {
    /// Attach a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a header.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Client for the Akuvox SmartPlus cloud API.
///
/// Owns the account credentials and the session state (token plus profile
/// attributes). Requests authenticate lazily: the first
/// [`request`](Self::request) on an unauthenticated client performs the
/// login POST, stores the token, and injects it as `x-auth-token` on every
/// call from then on. Safe to share behind `Arc`; logins are serialized
/// internally.
pub struct CloudClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
    state: RwLock<SessionState>,
    /// Serializes login attempts so concurrent callers cannot interleave
    /// partial profile updates.
    auth_lock: tokio::sync::Mutex<()>,
}

impl CloudClient {
    /// Create a client for the given region with default transport
    /// settings (system-store TLS verification, 30 s timeout).
    pub fn new(subdomain: Subdomain, credentials: Credentials) -> Result<Self, Error> {
        Self::with_transport(subdomain, credentials, &TransportConfig::default())
    }

    /// Create a client with explicit transport settings.
    pub fn with_transport(
        subdomain: Subdomain,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::assemble(http, subdomain.base_url(), credentials))
    }

    /// Create a client from a raw subdomain string (e.g. from
    /// configuration). Fails with [`Error::InvalidSubdomain`] before any
    /// network I/O when the string is not a known region code.
    pub fn from_subdomain(subdomain: &str, credentials: Credentials) -> Result<Self, Error> {
        Self::new(subdomain.parse()?, credentials)
    }

    /// Create a client against an explicit base URL with a pre-built
    /// `reqwest::Client`. Intended for tests and self-hosted gateways.
    pub fn with_client(http: reqwest::Client, base_url: Url, credentials: Credentials) -> Self {
        Self::assemble(http, base_url, credentials)
    }

    fn assemble(http: reqwest::Client, base_url: Url, credentials: Credentials) -> Self {
        Self {
            http,
            base_url,
            credentials,
            state: RwLock::new(SessionState::default()),
            auth_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// The cluster base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub(crate) fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().expect("session lock poisoned")
    }

    pub(crate) fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().expect("session lock poisoned")
    }

    /// Take the login serialization lock. Held across the whole login
    /// round-trip so two attempts can never interleave.
    pub(crate) async fn lock_auth(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.auth_lock.lock().await
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Join a request path onto the base URL with exactly one separating
    /// slash, whatever combination of slashes the caller supplied.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}")).map_err(Error::InvalidUrl)
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Perform an authenticated request against the cloud API.
    ///
    /// Authenticates first when no token is held, propagating the login
    /// failure verbatim -- wrong credentials surface as
    /// [`Error::NotAuthenticated`] from the very first call. The session
    /// token is injected as `x-auth-token`; the classified response body
    /// is returned as parsed JSON.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, Error> {
        if !self.is_authenticated() {
            let _guard = self.lock_auth().await;
            // Another caller may have finished logging in while we waited.
            if !self.is_authenticated() {
                self.login().await?;
            }
        }
        let token = self.token()?;

        let url = self.endpoint_url(path)?;
        let mut headers = options.headers;
        let token = HeaderValue::from_str(&token).map_err(|_| Error::NotAuthenticated {
            message: "stored session token is not a valid header value".into(),
        })?;
        headers.insert(AUTH_TOKEN_HEADER, token);

        self.dispatch(method, url, headers, options.body.as_ref())
            .await
    }

    /// Perform an HTTP call and classify the response envelope.
    ///
    /// Transport-level failures (DNS, connect, timeout, non-2xx status)
    /// surface as [`Error::Transport`] with the original cause in the
    /// message. The body is parsed as JSON and its result code classified:
    /// invalid credentials become [`Error::NotAuthenticated`], other
    /// mapped codes [`Error::Api`], and codes missing from the registry
    /// pass through untouched.
    pub(crate) async fn dispatch(
        &self,
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<&Value>,
    ) -> Result<Value, Error> {
        debug!("{method} {url}");

        let mut builder = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(Error::Transport)?;
        let resp = resp.error_for_status().map_err(Error::Transport)?;

        let text = resp.text().await.map_err(Error::Transport)?;
        let parsed: Value = serde_json::from_str(&text).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&text)),
            body: text.clone(),
        })?;

        let code = result_code_of(&parsed);
        let message = parsed.get("message").and_then(Value::as_str);
        match result_code::classify(code, message) {
            Outcome::Ok => Ok(parsed),
            Outcome::AuthFailure(message) => Err(Error::NotAuthenticated { message }),
            Outcome::Failure { code, message } => Err(Error::Api { code, message }),
        }
    }
}

impl fmt::Debug for CloudClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudClient")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

/// Result code of a response body: the `result` field (number or numeric
/// string), falling back to the legacy `response` field, else the unknown
/// sentinel.
fn result_code_of(body: &Value) -> i64 {
    code_field(body.get("result"))
        .or_else(|| code_field(body.get("response")))
        .unwrap_or(RESULT_UNKNOWN)
}

fn code_field(value: Option<&Value>) -> Option<i64> {
    match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    }
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
