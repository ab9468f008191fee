use thiserror::Error;

/// Centralized error type for syrinx-net.
#[derive(Debug, Error, Clone)]
pub enum NetError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("HTTP {status} for URL: {url}")]
    HttpStatus { status: u16, url: String },
    #[error("Timeout")]
    Timeout,
    #[error("request failed after {attempts} attempts: {source}")]
    RetryExhausted { attempts: u32, source: Box<NetError> },
}

impl NetError {
    /// Creates an HTTP status error.
    pub fn http_status(status: u16, url: String) -> Self {
        Self::HttpStatus { status, url }
    }

    /// Creates an HTTP error from a generic string.
    pub fn http<S: Into<String>>(msg: S) -> Self {
        Self::Http(msg.into())
    }

    fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout;
        }
        Self::Http(error.to_string())
    }

    /// The rate-limiting signal from the origin, HTTP 429.
    pub fn is_too_many_requests(&self) -> bool {
        self.status_code() == Some(429)
    }

    /// Checks if this error is worth retrying at all.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetError::Timeout => true,
            NetError::HttpStatus { status, .. } => *status >= 500 || *status == 429 || *status == 408,
            NetError::Http(_) | NetError::RetryExhausted { .. } => false,
        }
    }

    /// Gets the HTTP status code if this is an HTTP status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            NetError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NetError {
    fn from(error: reqwest::Error) -> Self {
        Self::from_reqwest(error)
    }
}

pub type NetResult<T> = Result<T, NetError>;
