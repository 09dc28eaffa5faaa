use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HelioError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{what} {index} out of range (limit {limit})")]
    OutOfRange {
        what: &'static str,
        index: usize,
        limit: usize,
    },

    #[error("Texture size mismatch: expected {expected}px faces, got {actual}px")]
    TextureSizeMismatch { expected: u32, actual: u32 },
}

impl HelioError {
    pub fn config(msg: impl Into<String>) -> Self {
        HelioError::InvalidConfiguration(msg.into())
    }

    pub fn out_of_range(what: &'static str, index: usize, limit: usize) -> Self {
        HelioError::OutOfRange { what, index, limit }
    }
}

pub type Result<T> = std::result::Result<T, HelioError>;
