//! Import orchestration: extract candidate questions from a document, apply
//! the persistence filter, deduplicate against the store, insert the rest.

use std::io::{Read, Seek};
use std::path::Path;

use chrono::Utc;
use docx_extract::DocxReadError;
use question_model::{NewQuestion, SubjectId};
use question_store::{QuestionStore, StoreError};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("document read error: {0}")]
    Read(#[from] DocxReadError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Import questions from a .docx document and return the number of newly
/// persisted records.
///
/// Candidates missing a stem, options, or answer are dropped silently; a
/// candidate whose stem and answer already exist in the store is skipped.
/// A store failure aborts the remaining candidates without rolling back the
/// ones already inserted in this call.
pub fn import_questions<R, S>(
    reader: R,
    subject: Option<&SubjectId>,
    store: &mut S,
) -> Result<usize, ImportError>
where
    R: Read + Seek,
    S: QuestionStore + ?Sized,
{
    let candidates = docx_extract::extract_candidates(reader)?;
    let total = candidates.len();

    let mut inserted = 0usize;
    for candidate in candidates {
        if !candidate.is_persistable() {
            debug!(stem = %candidate.stem, "dropping incomplete candidate");
            continue;
        }
        let correct_answer = match candidate.correct_answer {
            Some(a) => a,
            None => continue,
        };

        if store.find_duplicate(&candidate.stem, correct_answer)?.is_some() {
            debug!(stem = %candidate.stem, "skipping duplicate question");
            continue;
        }

        let question = NewQuestion {
            stem: candidate.stem,
            options: candidate.options,
            correct_answer,
            category: candidate.category,
            difficulty: candidate.difficulty,
            subject_id: subject.cloned(),
            created_at: Utc::now().to_rfc3339(),
        };
        store.insert(&question)?;
        inserted += 1;
    }

    info!(total, inserted, "document import finished");
    Ok(inserted)
}

/// Convenience wrapper opening the document from a filesystem path.
pub fn import_questions_from_path<P, S>(
    path: P,
    subject: Option<&SubjectId>,
    store: &mut S,
) -> Result<usize, ImportError>
where
    P: AsRef<Path>,
    S: QuestionStore + ?Sized,
{
    let file = std::fs::File::open(path).map_err(DocxReadError::from)?;
    import_questions(file, subject, store)
}
