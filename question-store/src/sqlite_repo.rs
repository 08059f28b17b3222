use std::path::Path;

use question_model::{AnswerLetter, NewQuestion, QuestionId, QuestionRecord, SubjectId};
use rusqlite::{params, Connection, OptionalExtension};

use crate::{QuestionStore, StoreError};

const QUESTION_COLS: &str =
    "id, stem, options_json, correct_answer, category, difficulty, subject_id, created_at";

/// SQLite-backed question store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open an in-memory store and initialize schema.
    pub fn new() -> Self {
        let conn = Connection::open_in_memory().expect("open in-memory sqlite");
        let store = Self { conn };
        store.init().expect("initialize schema");
        store
    }

    /// Open a file-backed store at `path` and initialize schema if absent.
    pub fn open<P: AsRef<Path>>(path: P) -> rusqlite::Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    fn init(&self) -> rusqlite::Result<()> {
        // Pragmas for durability and concurrency
        self.conn.pragma_update(None, "journal_mode", &"WAL")?;
        self.conn.pragma_update(None, "synchronous", &"FULL")?;
        self.conn.pragma_update(None, "foreign_keys", &"ON")?;

        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY,
                stem TEXT NOT NULL,
                options_json TEXT NOT NULL,
                correct_answer TEXT NOT NULL,
                category TEXT NOT NULL,
                difficulty TEXT NOT NULL,
                subject_id TEXT,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_questions_stem ON questions(stem);
            CREATE INDEX IF NOT EXISTS idx_questions_subject_id ON questions(subject_id);
            "#,
        )?;
        Ok(())
    }

    /// List a subject's questions in insertion order.
    pub fn list_by_subject(&self, subject: &SubjectId) -> Result<Vec<QuestionRecord>, StoreError> {
        let sql = format!(
            "SELECT {QUESTION_COLS} FROM questions WHERE subject_id = ?1 ORDER BY id"
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let rows = stmt
            .query_map([subject.0.as_str()], row_to_record)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r.map_err(|e| StoreError::Backend(e.to_string()))?);
        }
        Ok(out)
    }

    /// Draw up to `limit` random questions, optionally restricted to a subject.
    /// Used for exam assembly.
    pub fn sample_random(
        &self,
        limit: usize,
        subject: Option<&SubjectId>,
    ) -> Result<Vec<QuestionRecord>, StoreError> {
        let (sql, subject_param) = match subject {
            Some(s) => (
                format!(
                    "SELECT {QUESTION_COLS} FROM questions WHERE subject_id = ?1 ORDER BY RANDOM() LIMIT ?2"
                ),
                Some(s.0.as_str()),
            ),
            None => (
                format!("SELECT {QUESTION_COLS} FROM questions ORDER BY RANDOM() LIMIT ?1"),
                None,
            ),
        };
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let mut out = Vec::new();
        match subject_param {
            Some(s) => {
                let rows = stmt
                    .query_map(params![s, limit as i64], row_to_record)
                    .map_err(|e| StoreError::Backend(e.to_string()))?;
                for r in rows {
                    out.push(r.map_err(|e| StoreError::Backend(e.to_string()))?);
                }
            }
            None => {
                let rows = stmt
                    .query_map(params![limit as i64], row_to_record)
                    .map_err(|e| StoreError::Backend(e.to_string()))?;
                for r in rows {
                    out.push(r.map_err(|e| StoreError::Backend(e.to_string()))?);
                }
            }
        }
        Ok(out)
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<QuestionRecord> {
    let id: i64 = row.get(0)?;
    let stem: String = row.get(1)?;
    let options_json: String = row.get(2)?;
    let correct: String = row.get(3)?;
    let category: String = row.get(4)?;
    let difficulty: String = row.get(5)?;
    let subject_id: Option<String> = row.get(6)?;
    let created_at: String = row.get(7)?;

    let options = serde_json::from_str(&options_json).unwrap_or_default();
    let correct_answer = correct
        .chars()
        .next()
        .and_then(AnswerLetter::from_char)
        .ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                format!("invalid answer letter {correct:?}").into(),
            )
        })?;

    Ok(QuestionRecord {
        id: QuestionId(id),
        stem,
        options,
        correct_answer,
        category,
        difficulty,
        subject_id: subject_id.map(SubjectId),
        created_at,
    })
}

impl QuestionStore for SqliteStore {
    fn find_duplicate(
        &self,
        stem: &str,
        correct_answer: AnswerLetter,
    ) -> Result<Option<QuestionRecord>, StoreError> {
        let sql = format!(
            "SELECT {QUESTION_COLS} FROM questions WHERE stem = ?1 AND correct_answer = ?2 LIMIT 1"
        );
        self.conn
            .query_row(&sql, params![stem, correct_answer.as_str()], row_to_record)
            .optional()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn insert(&mut self, question: &NewQuestion) -> Result<QuestionId, StoreError> {
        let options_json = serde_json::to_string(&question.options)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.conn
            .execute(
                r#"
                INSERT INTO questions (
                    stem, options_json, correct_answer, category, difficulty, subject_id, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    question.stem,
                    options_json,
                    question.correct_answer.as_str(),
                    question.category,
                    question.difficulty,
                    question.subject_id.as_ref().map(|s| s.0.as_str()),
                    question.created_at,
                ],
            )
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(QuestionId(self.conn.last_insert_rowid()))
    }

    fn count_by_subject(&self, subject: Option<&SubjectId>) -> Result<u64, StoreError> {
        let n: i64 = match subject {
            Some(s) => self.conn.query_row(
                "SELECT count(*) FROM questions WHERE subject_id = ?1",
                [s.0.as_str()],
                |r| r.get(0),
            ),
            None => self
                .conn
                .query_row("SELECT count(*) FROM questions", [], |r| r.get(0)),
        }
        .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(n as u64)
    }
}
