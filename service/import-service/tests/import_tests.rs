use std::io::{Cursor, Write};

use import_service::{import_questions, ImportError};
use question_model::{AnswerLetter, SubjectId};
use question_store::sqlite_repo::SqliteStore;
use question_store::QuestionStore;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const M_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/math";

fn docx(paragraph_texts: &[&str]) -> Cursor<Vec<u8>> {
    let mut body = String::new();
    for text in paragraph_texts {
        body.push_str("<w:p><w:r><w:t xml:space=\"preserve\">");
        body.push_str(text);
        body.push_str("</w:t></w:r></w:p>");
    }
    let document = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"{W_NS}\" xmlns:m=\"{M_NS}\"><w:body>{body}</w:body></w:document>"
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default();
    writer
        .start_file("word/document.xml", options)
        .expect("start document part");
    writer
        .write_all(document.as_bytes())
        .expect("write document part");
    writer.finish().expect("finish package")
}

fn sample_document() -> Cursor<Vec<u8>> {
    docx(&[
        "1. Câu hỏi số 1 về thủy văn?",
        "a) Đáp án A cho câu hỏi 1",
        "b) Đáp án B cho câu hỏi 1",
        "c) Đáp án C cho câu hỏi 1",
        "d) Đáp án D cho câu hỏi 1",
        "Đáp án: a",
        "",
        "2. Câu hỏi số 2 về lưu vực sông?",
        "a) Đáp án A",
        "b) Đáp án B",
        "Đáp án: b",
    ])
}

#[test]
fn imports_all_complete_questions() {
    let mut store = SqliteStore::new();
    let inserted =
        import_questions(sample_document(), None, &mut store).expect("import succeeds");
    assert_eq!(inserted, 2);
    assert_eq!(store.count_by_subject(None).expect("count"), 2);

    let first = store
        .find_duplicate("Câu hỏi số 1 về thủy văn?", AnswerLetter::A)
        .expect("lookup succeeds")
        .expect("first question persisted");
    assert_eq!(first.options.len(), 4);
}

#[test]
fn importing_the_same_document_twice_inserts_nothing_new() {
    let mut store = SqliteStore::new();
    let first = import_questions(sample_document(), None, &mut store).expect("first import");
    let second = import_questions(sample_document(), None, &mut store).expect("second import");
    assert_eq!(first, 2);
    assert_eq!(second, 0);
    assert_eq!(store.count_by_subject(None).expect("count"), 2);
}

#[test]
fn incomplete_candidates_are_not_persisted() {
    // First question lacks options entirely, second lacks any answer line;
    // neither survives to the store.
    let document = docx(&[
        "1. No options here?",
        "Đáp án: a",
        "2. No answer here?",
        "a) something",
        "b) something else",
        "3. Complete?",
        "a) yes",
        "Đáp án: a",
    ]);
    let mut store = SqliteStore::new();
    let inserted = import_questions(document, None, &mut store).expect("import succeeds");
    assert_eq!(inserted, 1);
    assert!(store
        .find_duplicate("Complete?", AnswerLetter::A)
        .expect("lookup succeeds")
        .is_some());
    assert!(store
        .find_duplicate("No options here?", AnswerLetter::A)
        .expect("lookup succeeds")
        .is_none());
}

#[test]
fn subject_reference_is_attached_to_inserted_questions() {
    let mut store = SqliteStore::new();
    let subject = SubjectId::new("mon-thuy-van");
    let inserted =
        import_questions(sample_document(), Some(&subject), &mut store).expect("import succeeds");
    assert_eq!(inserted, 2);
    assert_eq!(
        store.count_by_subject(Some(&subject)).expect("count subject"),
        2
    );

    let listed = store.list_by_subject(&subject).expect("list subject");
    assert!(listed.iter().all(|q| q.subject_id.as_ref() == Some(&subject)));
    assert!(listed.iter().all(|q| !q.created_at.is_empty()));
}

#[test]
fn unreadable_document_fails_before_touching_the_store() {
    let mut store = SqliteStore::new();
    let err = import_questions(Cursor::new(b"not a docx".to_vec()), None, &mut store)
        .expect_err("garbage must not import");
    assert!(matches!(err, ImportError::Read(_)), "unexpected error: {err:?}");
    assert_eq!(store.count_by_subject(None).expect("count"), 0);
}

#[test]
fn duplicate_detection_ignores_differing_options() {
    // Same stem and answer, different option text: treated as a duplicate.
    let variant_a = docx(&["1. Same stem?", "a) old option", "Đáp án: a"]);
    let variant_b = docx(&["1. Same stem?", "a) brand new option", "Đáp án: a"]);

    let mut store = SqliteStore::new();
    assert_eq!(import_questions(variant_a, None, &mut store).expect("first import"), 1);
    assert_eq!(import_questions(variant_b, None, &mut store).expect("second import"), 0);

    let kept = store
        .find_duplicate("Same stem?", AnswerLetter::A)
        .expect("lookup succeeds")
        .expect("record present");
    assert_eq!(
        kept.options.get(&AnswerLetter::A).map(String::as_str),
        Some("old option")
    );
}
