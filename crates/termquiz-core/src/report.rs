//! Quiz run report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Quiz;

/// The outcome of one quiz run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the quiz.
    pub quiz: QuizSummary,
    /// One record per question, in the order asked.
    pub answers: Vec<AnswerRecord>,
    /// Questions answered correctly.
    pub score: u32,
    /// Questions asked.
    pub total: usize,
    /// Whether `score` reached the quiz's threshold.
    pub passed: bool,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of a quiz (without the questions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
    pub pass_threshold: u32,
}

impl From<&Quiz> for QuizSummary {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id.clone(),
            name: quiz.name.clone(),
            question_count: quiz.questions.len(),
            pass_threshold: quiz.threshold(),
        }
    }
}

/// What happened on a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    /// Letter of the selected choice. `None` if the question was given up
    /// after too many unrecognized answers.
    pub selected: Option<char>,
    pub correct: bool,
    /// Unrecognized answers before the question was settled.
    pub invalid_attempts: u32,
}

impl QuizReport {
    /// Score as a percentage of questions asked.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.score) * 100.0 / self.total as f64
    }

    /// Questions answered wrongly or not at all.
    pub fn missed(&self) -> impl Iterator<Item = &AnswerRecord> {
        self.answers.iter().filter(|a| !a.correct)
    }

    /// File name used when saving into an output directory. Carries part of
    /// the run id so two runs in the same second do not collide.
    pub fn file_name(&self) -> String {
        let run = self.id.simple().to_string();
        format!(
            "{}-{}-{}.json",
            self.quiz.id,
            self.created_at.format("%Y%m%dT%H%M%S"),
            &run[..8]
        )
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: QuizReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
