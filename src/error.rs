use std::path::PathBuf;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Required configuration is missing: {0}")]
    ConfigurationMissing(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read content directory {}: {source}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No content found in directory {}", .0.display())]
    EmptyDirectory(PathBuf),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("VK API error: {message} (code: {code})")]
    RemoteApi { code: i64, message: String },

    #[error("Upload server rejected file: {0}")]
    UploadRejected(String),

    #[error("Empty response from {0}")]
    EmptyResult(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to delete {}: {source}", .path.display())]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::MalformedResponse(e.to_string())
    }
}
