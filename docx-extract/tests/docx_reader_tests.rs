use std::io::{Cursor, Write};

use docx_extract::paragraph_text::{extract_paragraph, ExtractionTier};
use docx_extract::reader_docx::{read_paragraphs, InlineElement};
use docx_extract::DocxReadError;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const M_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/math";

fn docx(document_xml: &str) -> Cursor<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default();
    writer
        .start_file("word/document.xml", options)
        .expect("start document part");
    writer
        .write_all(document_xml.as_bytes())
        .expect("write document part");
    writer.finish().expect("finish package")
}

fn document(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"{W_NS}\" xmlns:m=\"{M_NS}\"><w:body>{body}</w:body></w:document>"
    )
}

#[test]
fn collects_inline_children_in_document_order() {
    let xml = document(
        "<w:p>\
           <w:r><w:t xml:space=\"preserve\">Area = </w:t></w:r>\
           <m:oMath><m:r><m:t>A = πr^2</m:t></m:r></m:oMath>\
           <w:r><w:t>.</w:t></w:r>\
         </w:p>",
    );
    let paragraphs = read_paragraphs(docx(&xml)).expect("read synthetic docx");
    assert_eq!(paragraphs.len(), 1);
    assert_eq!(
        paragraphs[0].inlines,
        vec![
            InlineElement::Run("Area = ".into()),
            InlineElement::Math("A = πr^2".into()),
            InlineElement::Run(".".into()),
        ]
    );

    let extracted = extract_paragraph(&paragraphs[0]);
    assert_eq!(extracted.tier, ExtractionTier::Structured);
    assert_eq!(extracted.text, "Area =  $A = \\pi r^2$ .");
}

#[test]
fn empty_math_block_contributes_nothing() {
    let xml = document(
        "<w:p>\
           <w:r><w:t>before</w:t></w:r>\
           <m:oMath><m:r><m:t>   </m:t></m:r></m:oMath>\
           <w:r><w:t>after</w:t></w:r>\
         </w:p>",
    );
    let paragraphs = read_paragraphs(docx(&xml)).expect("read synthetic docx");
    let extracted = extract_paragraph(&paragraphs[0]);
    assert_eq!(extracted.text, "beforeafter");
}

#[test]
fn hyperlink_and_tracked_insertion_text_is_kept_in_order() {
    let xml = document(
        "<w:p>\
           <w:r><w:t xml:space=\"preserve\">see </w:t></w:r>\
           <w:hyperlink><w:r><w:t>the handbook</w:t></w:r></w:hyperlink>\
           <w:ins><w:r><w:t xml:space=\"preserve\"> (revised)</w:t></w:r></w:ins>\
         </w:p>",
    );
    let paragraphs = read_paragraphs(docx(&xml)).expect("read synthetic docx");
    assert_eq!(
        paragraphs[0].inlines,
        vec![
            InlineElement::Run("see ".into()),
            InlineElement::Hyperlink("the handbook".into()),
            InlineElement::Insertion(" (revised)".into()),
        ]
    );
    assert_eq!(extract_paragraph(&paragraphs[0]).text, "see the handbook (revised)");
}

#[test]
fn math_paragraph_container_is_treated_as_math() {
    let xml = document(
        "<w:p>\
           <m:oMathPara><m:oMath><m:r><m:t>∑x</m:t></m:r></m:oMath></m:oMathPara>\
         </w:p>",
    );
    let paragraphs = read_paragraphs(docx(&xml)).expect("read synthetic docx");
    assert_eq!(paragraphs[0].inlines, vec![InlineElement::Math("∑x".into())]);
    assert_eq!(extract_paragraph(&paragraphs[0]).text, " $\\sum x$ ");
}

#[test]
fn unrecognized_markup_falls_back_to_plain_paragraph_text() {
    // The run is wrapped in an element the walk does not recognize, so the
    // structured tier comes up empty while the flat w:t text does not.
    let xml = document(
        "<w:p>\
           <w:fldSimple><w:r><w:t>1. Hidden stem</w:t></w:r></w:fldSimple>\
         </w:p>",
    );
    let paragraphs = read_paragraphs(docx(&xml)).expect("read synthetic docx");
    assert!(paragraphs[0].inlines.is_empty());
    let extracted = extract_paragraph(&paragraphs[0]);
    assert_eq!(extracted.tier, ExtractionTier::PlainTextFallback);
    assert_eq!(extracted.text, "1. Hidden stem");
}

#[test]
fn table_paragraphs_are_not_body_paragraphs() {
    let xml = document(
        "<w:p><w:r><w:t>body paragraph</w:t></w:r></w:p>\
         <w:tbl><w:tr><w:tc>\
           <w:p><w:r><w:t>cell paragraph</w:t></w:r></w:p>\
         </w:tc></w:tr></w:tbl>",
    );
    let paragraphs = read_paragraphs(docx(&xml)).expect("read synthetic docx");
    assert_eq!(paragraphs.len(), 1);
    assert_eq!(paragraphs[0].plain_text, "body paragraph");
}

#[test]
fn garbage_bytes_are_rejected_as_invalid_package() {
    let err = read_paragraphs(Cursor::new(b"not a zip file".to_vec()))
        .expect_err("garbage must not parse");
    assert!(matches!(err, DocxReadError::Zip(_)), "unexpected error: {err:?}");
}

#[test]
fn package_without_document_part_is_rejected() {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default();
    writer
        .start_file("word/styles.xml", options)
        .expect("start unrelated part");
    writer.write_all(b"<styles/>").expect("write unrelated part");
    let cursor = writer.finish().expect("finish package");

    let err = read_paragraphs(cursor).expect_err("missing main part must not parse");
    assert!(
        matches!(err, DocxReadError::MissingDocumentPart),
        "unexpected error: {err:?}"
    );
}
