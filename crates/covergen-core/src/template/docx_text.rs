// crates/covergen-core/src/template/docx_text.rs
//
// Paragraph text of the main document part, as `docx-rs` reads it.
//
// This is the reader's view of the template and is only used to list
// placeholders. Letters are not written through `docx-rs`: building a
// `docx_rs::Docx` back into a file keeps only the elements the crate
// models, so fields, content controls and unknown extensions of a real
// template would be lost. Rendering edits the original XML parts instead
// (see `placeholder`).

use docx_rs::{
    DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild, Table, TableCell,
    TableCellContent, TableChild, TableRowChild,
};

use crate::error::{CoverError, Result};

/// Text of every body paragraph, table cells included, in document order.
pub fn paragraph_texts(bytes: &[u8]) -> Result<Vec<String>> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| CoverError::Template(format!("docx-rs could not read the document: {e}")))?;

    let mut out = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => out.push(paragraph_text(p)),
            DocumentChild::Table(t) => table_texts(t, &mut out),
            _ => {}
        }
    }
    Ok(out)
}

fn paragraph_text(p: &Paragraph) -> String {
    let mut buf = String::new();
    for child in &p.children {
        paragraph_child(child, &mut buf);
    }
    buf
}

fn paragraph_child(child: &ParagraphChild, buf: &mut String) {
    match child {
        ParagraphChild::Run(run) => run_text(run, buf),
        ParagraphChild::Hyperlink(link) => {
            for c in &link.children {
                paragraph_child(c, buf);
            }
        }
        ParagraphChild::Insert(insert) => {
            for c in &insert.children {
                if let InsertChild::Run(run) = c {
                    run_text(run, buf);
                }
            }
        }
        _ => {}
    }
}

fn run_text(run: &Run, buf: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => buf.push_str(&t.text),
            RunChild::Tab(_) => buf.push('\t'),
            RunChild::Break(_) => buf.push('\n'),
            _ => {}
        }
    }
}

fn table_texts(table: &Table, out: &mut Vec<String>) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            cell_texts(cell, out);
        }
    }
}

fn cell_texts(cell: &TableCell, out: &mut Vec<String>) {
    for content in &cell.children {
        match content {
            TableCellContent::Paragraph(p) => out.push(paragraph_text(p)),
            TableCellContent::Table(t) => table_texts(t, out),
            _ => {}
        }
    }
}
