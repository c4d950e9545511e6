//! Error types for client operations.
//!
//! Every failure is terminal for its originating call: there are no automatic
//! retries anywhere in the client. Callers re-trigger on user action.

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Network-level failure (connection refused, DNS, malformed response).
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The call exceeded the configured request timeout.
    #[error("Request timed out: {message}")]
    Timeout { message: String },

    /// HTTP 401. The session has been cleared by the time this surfaces.
    #[error("Session expired: {message}")]
    Unauthorized { message: String },

    /// The backend answered with a non-zero envelope code. Transport
    /// succeeded; the request was rejected at the business level.
    #[error("Request rejected (code {code}): {message}")]
    Domain { code: i64, message: String },

    /// A payload that must be well-formed (write echoes, receipts) was not.
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// Invalid or missing client configuration.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ClientError {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a domain error from an envelope code and message.
    pub fn domain(code: i64, message: impl Into<String>) -> Self {
        Self::Domain {
            code,
            message: message.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error cleared the session (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// The envelope code for domain failures, if any.
    pub fn domain_code(&self) -> Option<i64> {
        match self {
            Self::Domain { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::decode(err.to_string())
    }
}

#[cfg(feature = "http-client")]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::timeout(err.to_string())
        } else if err.is_decode() {
            ClientError::decode(err.to_string())
        } else {
            ClientError::transport(err.to_string())
        }
    }
}
