use std::path::PathBuf;

use thiserror::Error;

use crate::core::ParseError;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Usage: {program} <filename.obj> OR {program} demo")]
    Usage { program: String },

    #[error("Failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("No .obj models found in {}", .0.display())]
    NoModelsFound(PathBuf),

    #[error("Window error: {0}")]
    Window(String),
}

impl ViewerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ViewerError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<minifb::Error> for ViewerError {
    fn from(e: minifb::Error) -> Self {
        ViewerError::Window(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
