//! Question persistence: storage trait and SQLite implementation.

pub mod sqlite_repo;

use question_model::{AnswerLetter, NewQuestion, QuestionId, QuestionRecord, SubjectId};

/// Thin abstraction over the question store (DB-agnostic).
///
/// The importer treats stem + correct answer as the natural key for
/// duplicate detection; `find_duplicate` must match on exactly that pair.
pub trait QuestionStore {
    fn find_duplicate(
        &self,
        stem: &str,
        correct_answer: AnswerLetter,
    ) -> Result<Option<QuestionRecord>, StoreError>;

    fn insert(&mut self, question: &NewQuestion) -> Result<QuestionId, StoreError>;

    /// Count questions for one subject, or all questions when `subject` is absent.
    fn count_by_subject(&self, subject: Option<&SubjectId>) -> Result<u64, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),
}
