//! PDF text extraction using pdf-extract
//!
//! Pages are joined with a single newline. A page with no extractable
//! text still contributes an empty segment, so the page count survives
//! in the joined output.

use crate::{ParserError, Result};

/// Extract newline-joined page text from PDF bytes
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ParserError::PdfError(e.to_string()))?;

    Ok(normalize_page_breaks(&raw))
}

/// Replace form-feed page separators with single newlines
///
/// pdf-extract marks page boundaries with `\x0C`. Empty pages become
/// empty lines rather than being dropped.
fn normalize_page_breaks(raw: &str) -> String {
    raw.split('\x0C')
        .map(|page| page.trim_end_matches('\n'))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_breaks_become_newlines() {
        let joined = normalize_page_breaks("page one\x0Cpage two");
        assert_eq!(joined, "page one\npage two");
    }

    #[test]
    fn test_empty_page_preserved_as_empty_line() {
        let joined = normalize_page_breaks("page one\x0C\x0Cpage three");
        assert_eq!(joined, "page one\n\npage three");
        assert_eq!(joined.split('\n').count(), 3);
    }

    #[test]
    fn test_single_page_untouched() {
        assert_eq!(normalize_page_breaks("only page"), "only page");
    }

    #[test]
    fn test_trailing_page_newlines_collapsed() {
        let joined = normalize_page_breaks("page one\n\x0Cpage two\n");
        assert_eq!(joined, "page one\npage two");
    }
}
