//! Reads resume sources from disk: Markdown/text as UTF-8, PDFs through
//! `pdf-extract`.

use std::path::Path;

use tracing::{debug, info};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Pdf,
    Text,
}

impl InputKind {
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => InputKind::Pdf,
            _ => InputKind::Text,
        }
    }
}

/// Loads a UTF-8 text file. Invalid UTF-8 is an error, never lossily decoded.
pub fn read_text(path: &Path) -> Result<String, AppError> {
    let bytes = read_bytes(path)?;
    String::from_utf8(bytes).map_err(|_| AppError::InvalidText {
        path: path.to_path_buf(),
    })
}

/// Text to score: extracted from a PDF, or the file contents otherwise.
pub fn load_scoring_text(path: &Path) -> Result<String, AppError> {
    let text = match InputKind::of(path) {
        InputKind::Pdf => extract_pdf_text(path)?,
        InputKind::Text => read_text(path)?,
    };
    info!(path = %path.display(), chars = text.chars().count(), "loaded text for scoring");
    Ok(text)
}

pub fn extract_pdf_text(path: &Path) -> Result<String, AppError> {
    let bytes = read_bytes(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "extracting PDF text");
    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| AppError::PdfExtraction {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, AppError> {
    std::fs::read(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_input_kind_by_extension() {
        assert_eq!(InputKind::of(Path::new("resume.pdf")), InputKind::Pdf);
        assert_eq!(InputKind::of(Path::new("resume.PDF")), InputKind::Pdf);
        assert_eq!(InputKind::of(Path::new("resume.md")), InputKind::Text);
        assert_eq!(InputKind::of(Path::new("resume")), InputKind::Text);
    }

    #[test]
    fn test_read_text_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Jane Doe\nRésumé").unwrap();
        assert_eq!(read_text(file.path()).unwrap(), "Jane Doe\nRésumé");
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x4a, 0x61, 0xff, 0xfe]).unwrap();
        assert!(matches!(
            read_text(file.path()),
            Err(AppError::InvalidText { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_scoring_text(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn test_garbage_pdf_fails_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"definitely not a pdf").unwrap();
        assert!(matches!(
            load_scoring_text(&path),
            Err(AppError::PdfExtraction { .. })
        ));
    }
}
