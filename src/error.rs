use thiserror::Error;

pub type Result<T> = std::result::Result<T, TriageError>;

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("Invalid ticket ID: {0:?}")]
    InvalidTicketId(String),

    #[error("Unknown bucket: {0:?}")]
    InvalidBucket(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Helpdesk API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Could not register {element_id} with the gesture adapter: {message}")]
    GestureRegistration { element_id: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
