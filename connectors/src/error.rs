use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Invalid scope: {0}")]
    InvalidScope(String),

    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for ExtractorError {
    fn from(err: reqwest::Error) -> Self {
        ExtractorError::Http(err.to_string())
    }
}

impl From<std::io::Error> for ExtractorError {
    fn from(err: std::io::Error) -> Self {
        ExtractorError::Io(err.to_string())
    }
}

impl From<walkdir::Error> for ExtractorError {
    fn from(err: walkdir::Error) -> Self {
        ExtractorError::Io(err.to_string())
    }
}
