//! Question extraction from Word documents: container walk, math symbol
//! normalization, paragraph text assembly, and line-structure scanning.

pub mod paragraph_text;
pub mod question_scan;
pub mod reader_docx;
pub mod symbol_map;

use std::io::{Read, Seek};
use std::path::Path;

use question_model::CandidateQuestion;

pub use paragraph_text::{extract_paragraph, ExtractedParagraph, ExtractionTier};
pub use reader_docx::{DocxParagraph, InlineElement};

#[derive(Debug, thiserror::Error)]
pub enum DocxReadError {
    #[error("failed to open document: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a valid .docx (zip) package: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("package has no word/document.xml part")]
    MissingDocumentPart,
    #[error("malformed document xml: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Read a .docx document and recover the candidate questions it contains.
///
/// Paragraph text is extracted in document order and fed to the line scanner;
/// blank paragraphs carry no state and are dropped there.
pub fn extract_candidates<R: Read + Seek>(reader: R) -> Result<Vec<CandidateQuestion>, DocxReadError> {
    let paragraphs = reader_docx::read_paragraphs(reader)?;
    let texts: Vec<String> = paragraphs.iter().map(|p| extract_paragraph(p).text).collect();
    Ok(question_scan::scan_lines(texts.iter().map(|s| s.as_str())))
}

pub fn extract_candidates_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CandidateQuestion>, DocxReadError> {
    let file = std::fs::File::open(path)?;
    extract_candidates(file)
}
