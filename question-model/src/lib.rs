//! Shared models used across crates

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed category applied to every imported question.
pub const DEFAULT_CATEGORY: &str = "Thủy văn công trình";
/// Fixed difficulty applied to every imported question.
pub const DEFAULT_DIFFICULTY: &str = "medium";

/// One of the four allowed option letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
}

impl AnswerLetter {
    /// Parse an option letter, accepting either case. Anything outside a-d is rejected.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(Self::A),
            'b' => Some(Self::B),
            'c' => Some(Self::C),
            'd' => Some(Self::D),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::A => 'a',
            Self::B => 'b',
            Self::C => 'c',
            Self::D => 'd',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
        }
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque reference to the subject a question belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectId(pub String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Row id assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionId(pub i64);

/// A question under construction during the structural scan of a document.
///
/// Built up line by line; committed only once both the stem and the correct
/// answer are known. Option completeness is checked later, at persist time.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateQuestion {
    pub stem: String,
    pub options: BTreeMap<AnswerLetter, String>,
    pub correct_answer: Option<AnswerLetter>,
    pub category: String,
    pub difficulty: String,
}

impl CandidateQuestion {
    pub fn new(stem: impl Into<String>) -> Self {
        Self {
            stem: stem.into(),
            options: BTreeMap::new(),
            correct_answer: None,
            category: DEFAULT_CATEGORY.to_string(),
            difficulty: DEFAULT_DIFFICULTY.to_string(),
        }
    }

    /// Good enough to keep when the scan moves on to the next question.
    pub fn is_committable(&self) -> bool {
        !self.stem.is_empty() && self.correct_answer.is_some()
    }

    /// Stricter check applied before writing to the store.
    pub fn is_persistable(&self) -> bool {
        self.is_committable() && !self.options.is_empty()
    }
}

/// Insert payload for the question store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub stem: String,
    pub options: BTreeMap<AnswerLetter, String>,
    pub correct_answer: AnswerLetter,
    pub category: String,
    pub difficulty: String,
    pub subject_id: Option<SubjectId>,
    /// RFC 3339 creation timestamp, stamped by the importer.
    pub created_at: String,
}

/// A question as persisted in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub stem: String,
    pub options: BTreeMap<AnswerLetter, String>,
    pub correct_answer: AnswerLetter,
    pub category: String,
    pub difficulty: String,
    pub subject_id: Option<SubjectId>,
    pub created_at: String,
}
