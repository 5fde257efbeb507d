use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoachError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("template references undefined variable `{0}`")]
    MissingVariable(String),

    #[error("no input provided - enter a note, an image path, or a metrics file")]
    NoInput,

    #[error("remote model error: {0}")]
    Remote(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoachError {
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoachError>;
