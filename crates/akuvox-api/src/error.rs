use thiserror::Error;

/// Top-level error type for the `akuvox-api` crate.
///
/// Covers every failure mode: endpoint resolution, authentication,
/// transport, and the cloud's result-code envelope. All errors surface to
/// the caller unchanged; nothing in this crate retries or swallows.
#[derive(Debug, Error)]
pub enum Error {
    // ── Endpoint resolution ─────────────────────────────────────────
    /// The subdomain is not one of the known region codes.
    #[error("Invalid subdomain: {subdomain} (expected one of: ucloud, scloud, ccloud, ecloud, dev39)")]
    InvalidSubdomain { subdomain: String },

    // ── Authentication ──────────────────────────────────────────────
    /// Credentials were rejected, the login reply carried no token, or
    /// the token was read before any successful login.
    #[error("Not authenticated: {message}")]
    NotAuthenticated { message: String },

    // ── Cloud API ───────────────────────────────────────────────────
    /// A mapped, non-success result code from the response envelope.
    #[error("API error (result {code}): {message}")]
    Api { code: i64, message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (DNS failure, connection refused, timeout,
    /// non-2xx status).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the session is not (or no
    /// longer) authenticated and a fresh login might resolve it.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::NotAuthenticated { .. })
    }

    /// Returns `true` if this is a transient transport error worth
    /// retrying at a higher layer. This crate itself never retries.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
