//! Text extraction — turns an uploaded document into a plain UTF-8 string.
//!
//! Everything runs on the in-memory upload buffer; no temporary files are
//! written, so the payload is released on every exit path when the request
//! scope ends. "Extraction failed" and "extraction produced no usable text"
//! are the same outcome for callers: both are an `ExtractError`, and no
//! score is ever computed from them.

use std::io::Read;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// Upload formats accepted at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Doc,
    Docx,
    Txt,
}

impl FileKind {
    /// Parses the kind from a filename extension, case-insensitively.
    /// Returns `None` for filenames without an allowed extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "doc" => Some(FileKind::Doc),
            "docx" => Some(FileKind::Docx),
            "txt" => Some(FileKind::Txt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Doc => "doc",
            FileKind::Docx => "docx",
            FileKind::Txt => "txt",
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("text file is not valid UTF-8")]
    InvalidUtf8,

    #[error("legacy .doc extraction is not implemented")]
    UnimplementedDoc,

    #[error("document contained no extractable text")]
    EmptyText,
}

/// Extracts plain text from an uploaded document.
///
/// Returns `EmptyText` when the document decodes but yields nothing beyond
/// whitespace — callers must treat that identically to a hard failure.
pub fn extract_text(bytes: &[u8], kind: FileKind) -> Result<String, ExtractError> {
    let text = match kind {
        FileKind::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?
        }
        FileKind::Docx => extract_docx(bytes)?,
        FileKind::Txt => {
            String::from_utf8(bytes.to_vec()).map_err(|_| ExtractError::InvalidUtf8)?
        }
        FileKind::Doc => return Err(ExtractError::UnimplementedDoc),
    };

    if text.trim().is_empty() {
        return Err(ExtractError::EmptyText);
    }
    Ok(text)
}

/// Pulls the text runs out of a DOCX body.
///
/// A .docx is a zip archive; the visible text lives in `word/document.xml`
/// as `<w:t>` runs. Paragraph ends and explicit breaks become newlines so
/// downstream keyword matching sees word boundaries.
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let cursor = std::io::Cursor::new(bytes);
    let mut archive =
        zip::ZipArchive::new(cursor).map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Docx(e.to_string()))?
        .read_to_string(&mut document_xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut reader = Reader::from_str(&document_xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text_run = true,
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"br" => text.push('\n'),
                b"tab" => text.push(' '),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let run = t.unescape().map_err(|e| ExtractError::Docx(e.to_string()))?;
                text.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractError::Docx(e.to_string())),
            Ok(_) => {}
        }
    }

    Ok(text)
}
