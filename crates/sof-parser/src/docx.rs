//! DOCX text extraction using docx-rs
//!
//! Paragraphs are joined with a single newline. Table rows are
//! flattened to tab-separated lines so that tabular SOF data (loading
//! logs, time sheets) stays visible to downstream event detection.

use docx_rs::read_docx;

use crate::{ParserError, Result};

/// Extract newline-joined paragraph text from DOCX bytes
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let docx = read_docx(bytes).map_err(|e| ParserError::DocxError(e.to_string()))?;

    let mut lines: Vec<String> = Vec::new();

    for child in docx.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => {
                lines.push(paragraph_text(&para));
            }
            docx_rs::DocumentChild::Table(tbl) => {
                for row in &tbl.rows {
                    let docx_rs::TableChild::TableRow(tr) = row;
                    let mut cells: Vec<String> = Vec::new();

                    for cell in &tr.cells {
                        let docx_rs::TableRowChild::TableCell(tc) = cell;
                        let mut cell_text = String::new();

                        for content in &tc.children {
                            if let docx_rs::TableCellContent::Paragraph(para) = content {
                                if !cell_text.is_empty() {
                                    cell_text.push(' ');
                                }
                                cell_text.push_str(&paragraph_text(para));
                            }
                        }

                        cells.push(cell_text.trim().to_string());
                    }

                    lines.push(cells.join("\t"));
                }
            }
            _ => {}
        }
    }

    Ok(lines.join("\n"))
}

/// Collect run text from a paragraph
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();

    for child in &para.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextExtractor;
    use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};
    use std::io::Cursor;

    fn para(text: &str) -> Paragraph {
        Paragraph::new().add_run(Run::new().add_text(text))
    }

    fn cell(text: &str) -> TableCell {
        TableCell::new().add_paragraph(para(text))
    }

    fn docx_bytes(docx: Docx) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_paragraphs_joined_with_newlines() {
        let bytes = docx_bytes(
            Docx::new()
                .add_paragraph(para("STATEMENT OF FACTS"))
                .add_paragraph(para("Vessel arrived at anchorage 16:00")),
        );

        let text = extract_text(&bytes).unwrap();
        assert_eq!(text, "STATEMENT OF FACTS\nVessel arrived at anchorage 16:00");
    }

    #[test]
    fn test_table_rows_flattened_to_tab_separated_lines() {
        let table = Table::new(vec![
            TableRow::new(vec![cell("ON JUNE 08, 2024"), cell("08:00"), cell("16:00")]),
            TableRow::new(vec![cell("ON JUNE 09, 2024"), cell("07:30"), cell("15:30")]),
        ]);
        let bytes = docx_bytes(
            Docx::new()
                .add_paragraph(para("LOADING LOG"))
                .add_table(table),
        );

        // Dispatch through the extractor, as the pipeline does
        let text = TextExtractor::new().extract(&bytes, "loading.docx").unwrap();
        assert_eq!(
            text,
            "LOADING LOG\n\
             ON JUNE 08, 2024\t08:00\t16:00\n\
             ON JUNE 09, 2024\t07:30\t15:30"
        );
    }

    #[test]
    fn test_multiple_runs_concatenated_within_paragraph() {
        let bytes = docx_bytes(Docx::new().add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("NOR tendered "))
                .add_run(Run::new().add_text("at 1600 HRS")),
        ));

        let text = extract_text(&bytes).unwrap();
        assert_eq!(text, "NOR tendered at 1600 HRS");
    }
}
