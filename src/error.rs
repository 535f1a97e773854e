use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuduError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("{0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for TuduError {
    fn from(err: reqwest::Error) -> Self {
        TuduError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TuduError>;
