/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Network error
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// Response decoding error
    Parse(String),
    /// Batch exceeds the store's write cap
    BatchTooLarge(usize),
    /// No record with the given id
    NotFound(String),
    /// Deletion refused: payment already recorded against the record
    PaymentRecorded(String),
}

impl StoreError {
    /// Worth retrying: transport failures and server-side errors.
    /// Client errors and lifecycle refusals are permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Network(_) => true,
            StoreError::Http(code, _) => *code >= 500,
            _ => false,
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Network(msg) => write!(f, "Network error: {}", msg),
            StoreError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            StoreError::Parse(msg) => write!(f, "Parse error: {}", msg),
            StoreError::BatchTooLarge(size) => {
                write!(f, "Batch of {} exceeds the store's write cap", size)
            }
            StoreError::NotFound(id) => write!(f, "No record with id {}", id),
            StoreError::PaymentRecorded(id) => {
                write!(f, "Record {} has payments against it and cannot be deleted", id)
            }
        }
    }
}

impl std::error::Error for StoreError {}
