use std::fmt;

/// Custom error type for context navigation and kubeconfig operations
#[derive(Debug)]
pub enum CtxError {
    /// A referenced kubeconfig entry does not exist
    NotFound { kind: &'static str, name: String },
    /// A path segment cannot be enacted from the current node
    Navigation(String),
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned an error response
    Api { status: u16, message: String },
    /// The prospective kubeconfig was rejected by the health probe
    Verify(String),
    /// No token available for a cloud API call
    Token(String),
    /// Failed to read, parse or write a file
    Config(String),
    /// JSON parsing error
    Json(String),
    /// Interactive terminal failure
    Terminal(String),
}

impl CtxError {
    /// Shorthand for a missing kubeconfig entry
    pub fn not_found(kind: &'static str, name: &str) -> Self {
        CtxError::NotFound {
            kind,
            name: name.to_string(),
        }
    }

    /// True for 404 responses from an API
    pub fn is_not_found(&self) -> bool {
        matches!(self, CtxError::Api { status: 404, .. })
    }

    /// True for 401/403 responses from an API
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, CtxError::Api { status: 401 | 403, .. })
    }
}

impl fmt::Display for CtxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CtxError::NotFound { kind, name } => write!(f, "no {} {:?} found", kind, name),
            CtxError::Navigation(msg) => write!(f, "{}", msg),
            CtxError::Http(e) => write!(f, "HTTP request failed: {}", e),
            CtxError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            CtxError::Verify(msg) => write!(f, "kubeconfig verification failed: {}", msg),
            CtxError::Token(msg) => write!(f, "{}", msg),
            CtxError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CtxError::Json(msg) => write!(f, "JSON error: {}", msg),
            CtxError::Terminal(msg) => write!(f, "terminal error: {}", msg),
        }
    }
}

impl std::error::Error for CtxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CtxError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CtxError {
    fn from(err: reqwest::Error) -> Self {
        CtxError::Http(err)
    }
}

impl From<serde_json::Error> for CtxError {
    fn from(err: serde_json::Error) -> Self {
        CtxError::Json(err.to_string())
    }
}

impl From<serde_yml::Error> for CtxError {
    fn from(err: serde_yml::Error) -> Self {
        CtxError::Config(err.to_string())
    }
}

impl From<std::io::Error> for CtxError {
    fn from(err: std::io::Error) -> Self {
        CtxError::Config(err.to_string())
    }
}

/// Result type alias for context operations
pub type Result<T> = std::result::Result<T, CtxError>;
