//! Recovers question structure from the ordered paragraph text stream.
//!
//! The stream carries no explicit tagging; each line is classified against an
//! ordered list of patterns (first match wins) and folded into the question
//! currently under construction.

use once_cell::sync::Lazy;
use question_model::{AnswerLetter, CandidateQuestion};
use regex::Regex;

// "1. ...", "2) ...", "3] ...": whitespace after the separator is required.
static NUMBERED_QUESTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)[.)\]]\s+(.*)").expect("valid question pattern"));
// "Câu 1: ...", "câu 2 - ...": this separator set also admits bare whitespace.
static CAU_QUESTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Câu\s+(\d+)[.):\-\s]+(.*)").expect("valid Câu pattern"));
// "a. text", "B] text": whitespace required after the separator...
static OPTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-dA-D])[.)\]]\s+(.*)").expect("valid option pattern"));
// ...except for the paren form, where "a)text" is accepted as well.
static OPTION_PAREN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-dA-D])\)\s*(.*)").expect("valid paren option pattern"));
// Answer declarations may sit anywhere in the line, in either language.
static ANSWER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:đáp án|answer)[:\s]+([a-dA-D])").expect("valid answer pattern"));
static BARE_ANSWER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-dA-D]$").expect("valid bare answer pattern"));

/// Classification of one non-blank line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineClass {
    QuestionStart { number: u32, stem: String },
    OptionLine { key: AnswerLetter, text: String },
    AnswerDecl { key: AnswerLetter },
    BareAnswer { key: AnswerLetter },
    Noise,
}

fn letter_capture(caps: &regex::Captures<'_>, group: usize) -> Option<AnswerLetter> {
    caps.get(group)
        .and_then(|m| m.as_str().chars().next())
        .and_then(AnswerLetter::from_char)
}

/// Classify a single trimmed line. The order of attempts is a contract: a
/// line never falls into more than one category.
pub fn classify_line(line: &str) -> LineClass {
    if let Some(caps) = NUMBERED_QUESTION_RE
        .captures(line)
        .or_else(|| CAU_QUESTION_RE.captures(line))
    {
        let number = caps[1].parse().unwrap_or(0);
        return LineClass::QuestionStart {
            number,
            stem: caps[2].trim().to_string(),
        };
    }

    if let Some(caps) = OPTION_RE.captures(line).or_else(|| OPTION_PAREN_RE.captures(line)) {
        if let Some(key) = letter_capture(&caps, 1) {
            return LineClass::OptionLine {
                key,
                text: caps[2].trim().to_string(),
            };
        }
    }

    if let Some(caps) = ANSWER_RE.captures(line) {
        if let Some(key) = letter_capture(&caps, 1) {
            return LineClass::AnswerDecl { key };
        }
    }

    if BARE_ANSWER_RE.is_match(line) {
        if let Some(key) = line.chars().next().and_then(AnswerLetter::from_char) {
            return LineClass::BareAnswer { key };
        }
    }

    LineClass::Noise
}

/// Fold the ordered paragraph texts into committed candidate questions.
///
/// Blank lines are skipped. A question-start line commits the current
/// candidate (stem and answer both present) and begins a new one; option
/// lines upsert per letter with the last occurrence winning; an explicit
/// answer declaration always overwrites, while a bare letter only fills an
/// answer that is still absent. The final candidate is committed under the
/// same condition at end of input.
pub fn scan_lines<'a, I>(lines: I) -> Vec<CandidateQuestion>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut committed: Vec<CandidateQuestion> = Vec::new();
    let mut current: Option<CandidateQuestion> = None;

    for raw in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match classify_line(line) {
            LineClass::QuestionStart { stem, .. } => {
                if let Some(prev) = current.take() {
                    if prev.is_committable() {
                        committed.push(prev);
                    }
                }
                current = Some(CandidateQuestion::new(stem));
            }
            LineClass::OptionLine { key, text } => {
                if let Some(q) = current.as_mut() {
                    q.options.insert(key, text);
                }
            }
            LineClass::AnswerDecl { key } => {
                if let Some(q) = current.as_mut() {
                    q.correct_answer = Some(key);
                }
            }
            LineClass::BareAnswer { key } => {
                if let Some(q) = current.as_mut() {
                    if q.correct_answer.is_none() {
                        q.correct_answer = Some(key);
                    }
                }
            }
            LineClass::Noise => {}
        }
    }

    if let Some(last) = current {
        if last.is_committable() {
            committed.push(last);
        }
    }

    committed
}
