//! Core data model types for termquiz.
//!
//! A [`Quiz`] is an ordered set of multiple-choice [`Question`]s plus the
//! score needed to pass.

use serde::{Deserialize, Serialize};

use crate::seq::Sequence;

/// Share of questions that must be answered correctly when a quiz does not
/// set its own threshold (26 of 40 on the practice exams).
pub const DEFAULT_PASS_RATIO: f64 = 0.65;

/// A quiz: questions asked in order, one point per correct answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique identifier for this quiz.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Shown before the first question.
    #[serde(default)]
    pub description: String,
    /// Points needed to pass. `None` means [`DEFAULT_PASS_RATIO`] of the
    /// question count, rounded up.
    #[serde(default)]
    pub pass_threshold: Option<u32>,
    /// The questions, in presentation order.
    #[serde(default)]
    pub questions: Sequence<Question>,
}

impl Quiz {
    /// Points needed to pass.
    pub fn threshold(&self) -> u32 {
        self.pass_threshold
            .unwrap_or_else(|| (self.questions.len() as f64 * DEFAULT_PASS_RATIO).ceil() as u32)
    }

    /// Whether `score` is enough to pass.
    pub fn passes(&self, score: u32) -> bool {
        score >= self.threshold()
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within the quiz.
    pub id: String,
    /// The question text. May span several lines.
    pub prompt: String,
    /// Lettered options, in display order.
    pub choices: Sequence<Choice>,
    /// Letters that earn the point. Usually one, occasionally several.
    pub correct: Vec<char>,
}

impl Question {
    /// The choice an answer selects.
    ///
    /// Answers are compared case-insensitively after trimming; the first
    /// choice, in display order, whose letter appears anywhere in the answer
    /// wins. `None` means the answer matched nothing and should be asked
    /// again.
    pub fn match_answer(&self, answer: &str) -> Option<&Choice> {
        let answer = answer.trim().to_lowercase();
        if answer.is_empty() {
            return None;
        }
        self.choices
            .iter()
            .find(|choice| answer.contains(choice.letter.to_ascii_lowercase()))
    }

    /// Whether `letter` earns the point.
    pub fn is_correct(&self, letter: char) -> bool {
        let letter = letter.to_ascii_lowercase();
        self.correct
            .iter()
            .any(|c| c.to_ascii_lowercase() == letter)
    }
}

/// One lettered option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Letter the user types to pick this option.
    pub letter: char,
    /// Option text.
    pub text: String,
}

impl Choice {
    pub fn new(letter: char, text: impl Into<String>) -> Self {
        Self {
            letter,
            text: text.into(),
        }
    }
}
