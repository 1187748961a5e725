//! Error types for the message context system

pub type Result<T> = std::result::Result<T, MessageError>;

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// Flat key/value argument list with an odd number of items
    #[error("number of arguments must be a multiple of 2, got {count}")]
    InvalidArgumentCount { count: usize },

    /// Malformed format descriptor passed to `set_format`
    #[error("Invalid format configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl MessageError {
    /// Create an invalid-argument-count error
    pub fn argument_count(count: usize) -> Self {
        MessageError::InvalidArgumentCount { count }
    }

    /// Create an invalid configuration error
    pub fn config(message: impl Into<String>) -> Self {
        MessageError::InvalidConfiguration {
            message: message.into(),
        }
    }
}
