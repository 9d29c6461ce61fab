use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Network client (LCD) operations
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Message decode pipeline failures
    #[error("Decoder error: {0}")]
    Decoder(#[from] crate::decoder::DecoderError),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Network client error types
#[derive(Error, Debug)]
pub enum RpcError {
    /// Failed to build the HTTP client or reach the node at all
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Transaction hash is not 64 hex characters
    #[error("Invalid transaction hash: {hash}")]
    InvalidTxHash { hash: String },

    /// Node answered but has no transaction with this hash
    #[error("Transaction not found: {hash}")]
    TransactionNotFound { hash: String },

    /// Contract-info query was rejected by the node
    #[error("Contract info query failed for {address}: {message}")]
    ContractQueryFailed { address: String, message: String },

    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("Request failed: {endpoint} - {message}")]
    RequestFailed { endpoint: String, message: String },

    /// Non-success HTTP status that is not otherwise classified
    #[error("HTTP {status} from {endpoint}: {body}")]
    HttpStatus {
        status: u16,
        endpoint: String,
        body: String,
    },

    /// Node returned unexpected or malformed response data
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request timed out
    #[error("Request timeout: {timeout_seconds}s for {operation}")]
    Timeout {
        timeout_seconds: u64,
        operation: String,
    },

    /// Retry limit exceeded
    #[error("Max retries exceeded: {operation}")]
    MaxRetriesExceeded { operation: String },
}

impl RpcError {
    /// Whether another attempt could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            RpcError::RequestFailed { .. } | RpcError::Timeout { .. } => true,
            RpcError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for network client operations
pub type RpcResult<T> = Result<T, RpcError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
