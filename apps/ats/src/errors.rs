use std::path::PathBuf;

use thiserror::Error;

/// Application-level error type.
/// Parsing and scoring never fail; everything here is about getting bytes in
/// and out, or about rejected configuration.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 text", path.display())]
    InvalidText { path: PathBuf },

    #[error("Cannot extract text from PDF {}: {message}", path.display())]
    PdfExtraction { path: PathBuf, message: String },

    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid report {}: {message}", path.display())]
    InvalidReport { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_path() {
        let err = AppError::InvalidText {
            path: PathBuf::from("resume.md"),
        };
        assert_eq!(err.to_string(), "resume.md is not valid UTF-8 text");

        let err = AppError::Io {
            path: PathBuf::from("missing.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().starts_with("Cannot read missing.pdf"));
    }
}
