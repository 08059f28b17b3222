//! Merges a paragraph's prose and math children into one render-ready string.

use tracing::debug;

use crate::reader_docx::{DocxParagraph, InlineElement};
use crate::symbol_map::normalize;

/// Which strategy produced an extracted string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionTier {
    /// Document-order walk over recognized inline children.
    Structured,
    /// Whole-paragraph plain text, used when the walk came up blank.
    PlainTextFallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedParagraph {
    pub text: String,
    pub tier: ExtractionTier,
}

/// Extract one paragraph's text. Math spans are normalized, trimmed and
/// wrapped as `" $...$ "` so they do not fuse with adjacent prose; empty math
/// blocks contribute nothing. Prose runs are normalized too, since pasted
/// text can carry stray math glyphs.
pub fn extract_paragraph(para: &DocxParagraph) -> ExtractedParagraph {
    let mut text = String::new();
    for inline in &para.inlines {
        match inline {
            InlineElement::Math(raw) => {
                let cleaned = normalize(raw);
                let cleaned = cleaned.trim();
                if !cleaned.is_empty() {
                    text.push_str(" $");
                    text.push_str(cleaned);
                    text.push_str("$ ");
                }
            }
            InlineElement::Run(raw) | InlineElement::Hyperlink(raw) | InlineElement::Insertion(raw) => {
                text.push_str(&normalize(raw));
            }
        }
    }

    // A paragraph made of only unrecognized markup still must not lose its
    // visible text.
    if text.trim().is_empty() && !para.plain_text.trim().is_empty() {
        debug!("structured walk yielded nothing, falling back to plain paragraph text");
        return ExtractedParagraph {
            text: normalize(&para.plain_text),
            tier: ExtractionTier::PlainTextFallback,
        };
    }

    ExtractedParagraph { text, tier: ExtractionTier::Structured }
}
