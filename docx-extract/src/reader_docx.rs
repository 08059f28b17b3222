//! Minimal DOCX reader: opens the zip package, streams word/document.xml and
//! collects each body paragraph's inline children in document order.

use std::io::{Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use crate::DocxReadError;

/// One inline child of a paragraph, carrying its concatenated leaf text
/// (`w:t` leaves for the prose kinds, `m:t` leaves for math).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineElement {
    Run(String),
    Hyperlink(String),
    Insertion(String),
    Math(String),
}

impl InlineElement {
    pub fn text(&self) -> &str {
        match self {
            Self::Run(t) | Self::Hyperlink(t) | Self::Insertion(t) | Self::Math(t) => t,
        }
    }

    pub fn is_math(&self) -> bool {
        matches!(self, Self::Math(_))
    }
}

/// A body paragraph: recognized inline children in document order, plus the
/// flat `w:t` text of the whole paragraph for the fallback tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocxParagraph {
    pub inlines: Vec<InlineElement>,
    pub plain_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineKind {
    Run,
    Hyperlink,
    Insertion,
    Math,
}

struct OpenInline {
    kind: InlineKind,
    buf: String,
    depth: u32,
}

/// Open a .docx package and return its body paragraphs in document order.
pub fn read_paragraphs<R: Read + Seek>(reader: R) -> Result<Vec<DocxParagraph>, DocxReadError> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut document_xml = String::new();
    {
        let mut part = match archive.by_name("word/document.xml") {
            Ok(p) => p,
            Err(zip::result::ZipError::FileNotFound) => return Err(DocxReadError::MissingDocumentPart),
            Err(e) => return Err(e.into()),
        };
        part.read_to_string(&mut document_xml)?;
    }
    parse_document_xml(&document_xml)
}

pub fn read_paragraphs_from_path(path: &str) -> Result<Vec<DocxParagraph>, DocxReadError> {
    let file = std::fs::File::open(path)?;
    read_paragraphs(file)
}

fn parse_document_xml(xml: &str) -> Result<Vec<DocxParagraph>, DocxReadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);
    let mut buf = Vec::new();

    let mut out: Vec<DocxParagraph> = Vec::new();
    // `depth` counts currently open elements; an element whose Start fires at
    // depth d is a direct child of the element opened at depth d - 1.
    let mut depth: u32 = 0;
    let mut body_depth: Option<u32> = None;
    let mut para_depth: Option<u32> = None;
    let mut para = DocxParagraph::default();
    let mut inline: Option<OpenInline> = None;
    let mut wt_depth: Option<u32> = None;
    let mut mt_depth: Option<u32> = None;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let at = depth;
                depth += 1;
                let in_para_child = inline.is_none() && para_depth.map_or(false, |d| at == d + 1);
                match e.name().as_ref() {
                    b"w:body" if body_depth.is_none() => body_depth = Some(at),
                    // Only direct children of the body count as paragraphs;
                    // w:p nested in tables or text boxes is out of scope.
                    b"w:p" if para_depth.is_none() && body_depth.map_or(false, |d| at == d + 1) => {
                        para_depth = Some(at);
                        para = DocxParagraph::default();
                    }
                    b"w:r" if in_para_child => {
                        inline = Some(OpenInline { kind: InlineKind::Run, buf: String::new(), depth: at });
                    }
                    b"w:hyperlink" if in_para_child => {
                        inline = Some(OpenInline { kind: InlineKind::Hyperlink, buf: String::new(), depth: at });
                    }
                    b"w:ins" if in_para_child => {
                        inline = Some(OpenInline { kind: InlineKind::Insertion, buf: String::new(), depth: at });
                    }
                    b"m:oMath" | b"m:oMathPara" if in_para_child => {
                        inline = Some(OpenInline { kind: InlineKind::Math, buf: String::new(), depth: at });
                    }
                    b"w:t" if para_depth.is_some() && wt_depth.is_none() => wt_depth = Some(at),
                    b"m:t" if mt_depth.is_none()
                        && matches!(inline, Some(OpenInline { kind: InlineKind::Math, .. })) =>
                    {
                        mt_depth = Some(at)
                    }
                    b"w:pPr" => {}
                    other => {
                        if in_para_child {
                            debug!(
                                element = %String::from_utf8_lossy(other),
                                "skipping unrecognized paragraph child"
                            );
                        }
                    }
                }
            }
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
                let at = depth;
                if wt_depth == Some(at) {
                    wt_depth = None;
                }
                if mt_depth == Some(at) {
                    mt_depth = None;
                }
                if inline.as_ref().map_or(false, |o| o.depth == at) {
                    if let Some(open) = inline.take() {
                        para.inlines.push(match open.kind {
                            InlineKind::Run => InlineElement::Run(open.buf),
                            InlineKind::Hyperlink => InlineElement::Hyperlink(open.buf),
                            InlineKind::Insertion => InlineElement::Insertion(open.buf),
                            InlineKind::Math => InlineElement::Math(open.buf),
                        });
                    }
                }
                if para_depth == Some(at) {
                    para_depth = None;
                    out.push(std::mem::take(&mut para));
                }
                if body_depth == Some(at) {
                    body_depth = None;
                }
            }
            Ok(Event::Text(ref t)) => {
                if wt_depth.is_some() {
                    let text = t.unescape()?;
                    para.plain_text.push_str(&text);
                    if let Some(open) = inline.as_mut() {
                        if open.kind != InlineKind::Math {
                            open.buf.push_str(&text);
                        }
                    }
                } else if mt_depth.is_some() {
                    let text = t.unescape()?;
                    if let Some(open) = inline.as_mut() {
                        if open.kind == InlineKind::Math {
                            open.buf.push_str(&text);
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    Ok(out)
}
