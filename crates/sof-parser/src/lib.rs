//! SOF Parser - Text extraction from document containers
//!
//! Supports extraction from:
//! - PDF documents
//! - Microsoft Word (DOCX)
//! - Plain text files
//!
//! Extraction is purely functional over the input bytes: given a
//! document's bytes and original filename, [`TextExtractor::extract`]
//! produces one normalized, newline-joined string. Unrecognized
//! extensions degrade to an empty string rather than an error; a
//! malformed container of a recognized format is a typed error the
//! caller isolates per document.

use thiserror::Error;

mod docx;
mod pdf;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during text extraction
#[derive(Error, Debug)]
pub enum ParserError {
    /// PDF container is malformed or unreadable
    #[error("PDF extraction error: {0}")]
    PdfError(String),

    /// DOCX container is malformed or unreadable
    #[error("DOCX extraction error: {0}")]
    DocxError(String),
}

pub type Result<T> = std::result::Result<T, ParserError>;

// ============================================================================
// File Formats
// ============================================================================

/// Document container formats recognized by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Pdf,
    Docx,
    PlainText,
    Unknown,
}

impl FileFormat {
    /// Detect format from a bare extension, case-insensitive
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "txt" => Self::PlainText,
            _ => Self::Unknown,
        }
    }

    /// Detect format from a filename
    pub fn from_filename(filename: &str) -> Self {
        filename
            .rsplit_once('.')
            .map(|(_, ext)| Self::from_extension(ext))
            .unwrap_or(Self::Unknown)
    }
}

// ============================================================================
// Text Extraction
// ============================================================================

/// Extracts normalized text from raw document bytes
#[derive(Debug, Clone, Default)]
pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract a single newline-joined string from a document
    ///
    /// Format dispatch is driven by the filename's extension. An
    /// unrecognized extension yields `Ok("")`: the document simply
    /// contributes no text, and downstream detection finds no events.
    pub fn extract(&self, bytes: &[u8], filename: &str) -> Result<String> {
        match FileFormat::from_filename(filename) {
            FileFormat::Pdf => pdf::extract_text(bytes),
            FileFormat::Docx => docx::extract_text(bytes),
            FileFormat::PlainText => Ok(Self::extract_plain_text(bytes)),
            FileFormat::Unknown => Ok(String::new()),
        }
    }

    /// Lossy UTF-8 decode; invalid byte sequences are replaced, never raised
    fn extract_plain_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(FileFormat::from_extension("pdf"), FileFormat::Pdf);
        assert_eq!(FileFormat::from_extension("PDF"), FileFormat::Pdf);
        assert_eq!(FileFormat::from_extension("docx"), FileFormat::Docx);
        assert_eq!(FileFormat::from_extension("txt"), FileFormat::PlainText);
        assert_eq!(FileFormat::from_extension("xlsx"), FileFormat::Unknown);
    }

    #[test]
    fn test_format_from_filename() {
        assert_eq!(FileFormat::from_filename("sof_voyage12.PDF"), FileFormat::Pdf);
        assert_eq!(FileFormat::from_filename("notes.txt"), FileFormat::PlainText);
        assert_eq!(FileFormat::from_filename("archive.tar.gz"), FileFormat::Unknown);
        assert_eq!(FileFormat::from_filename("no_extension"), FileFormat::Unknown);
    }

    #[test]
    fn test_unknown_extension_yields_empty_text() {
        let extractor = TextExtractor::new();
        let text = extractor.extract(b"anything at all", "report.xlsx").unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_plain_text_passthrough() {
        let extractor = TextExtractor::new();
        let text = extractor
            .extract(b"VESSEL ARRIVED AT ANCHORAGE\n16:00", "sof.txt")
            .unwrap();
        assert_eq!(text, "VESSEL ARRIVED AT ANCHORAGE\n16:00");
    }

    #[test]
    fn test_plain_text_replaces_invalid_bytes() {
        let extractor = TextExtractor::new();
        let text = extractor.extract(&[0x56, 0xFF, 0xFE, 0x53], "sof.txt").unwrap();
        assert!(text.starts_with('V'));
        assert!(text.ends_with('S'));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_empty_document_returns_empty_string() {
        let extractor = TextExtractor::new();
        assert_eq!(extractor.extract(b"", "empty.txt").unwrap(), "");
        assert_eq!(extractor.extract(b"", "empty.bin").unwrap(), "");
    }

    #[test]
    fn test_corrupt_pdf_is_typed_error() {
        let extractor = TextExtractor::new();
        let result = extractor.extract(b"not a pdf at all", "sof.pdf");
        assert!(matches!(result, Err(ParserError::PdfError(_))));
    }

    #[test]
    fn test_corrupt_docx_is_typed_error() {
        let extractor = TextExtractor::new();
        let result = extractor.extract(b"not a zip archive", "sof.docx");
        assert!(matches!(result, Err(ParserError::DocxError(_))));
    }
}
