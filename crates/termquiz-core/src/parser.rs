//! TOML quiz parser.
//!
//! Loads quizzes from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Choice, Question, Quiz};
use crate::seq::Sequence;
use crate::text::{chr, ord};

/// Intermediate TOML structure for parsing quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    pass_threshold: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    #[serde(default)]
    id: Option<String>,
    prompt: String,
    choices: Vec<String>,
    correct: Vec<String>,
}

/// Letter of the first choice; later choices count up from here.
const FIRST_LETTER: &str = "a";

/// Parse a single TOML file into a `Quiz`.
pub fn parse_quiz(path: &Path) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a TOML string into a `Quiz` (useful for testing).
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<Quiz> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let first = ord(FIRST_LETTER)?;
    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, q)| {
            let id = q.id.unwrap_or_else(|| format!("q{}", index + 1));

            let choices = q
                .choices
                .into_iter()
                .enumerate()
                .map(|(offset, text)| Ok(Choice::new(chr(first + offset as u32)?, text)))
                .collect::<Result<Sequence<_>>>()?;

            let correct = q
                .correct
                .iter()
                .map(|letter| {
                    let code = ord(letter.trim()).with_context(|| {
                        format!("question {id}: correct answer {letter:?} is not a single letter")
                    })?;
                    Ok(chr(code)?.to_ascii_lowercase())
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(Question {
                id,
                prompt: q.prompt,
                choices,
                correct,
            })
        })
        .collect::<Result<Sequence<_>>>()?;

    Ok(Quiz {
        id: parsed.quiz.id,
        name: parsed.quiz.name,
        description: parsed.quiz.description,
        pass_threshold: parsed.quiz.pass_threshold,
        questions,
    })
}

/// Recursively load all `.toml` quiz files from a directory.
///
/// Quizzes come back ordered by file path so the picker letters stay
/// stable between runs. Files that fail to parse are skipped with a
/// warning.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<Quiz>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = Vec::new();
    collect_toml_files(dir, &mut paths)?;
    paths.sort();

    let mut quizzes = Vec::new();
    for path in paths {
        match parse_quiz(&path) {
            Ok(quiz) => quizzes.push(quiz),
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(quizzes)
}

/// Load a quiz file, or every quiz in a directory.
pub fn load_quizzes(path: &Path) -> Result<Vec<Quiz>> {
    if path.is_dir() {
        load_quiz_directory(path)
    } else {
        Ok(vec![parse_quiz(path)?])
    }
}

fn collect_toml_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            collect_toml_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            out.push(path);
        }
    }
    Ok(())
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn quiz(message: impl Into<String>) -> Self {
        Self {
            question_id: None,
            message: message.into(),
        }
    }

    fn question(question: &Question, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(question.id.clone()),
            message: message.into(),
        }
    }
}

/// Validate a quiz for common issues.
pub fn validate_quiz(quiz: &Quiz) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if quiz.questions.is_empty() {
        warnings.push(ValidationWarning::quiz("quiz has no questions"));
    }

    let mut seen_ids = HashSet::new();
    for question in &quiz.questions {
        if !seen_ids.insert(&question.id) {
            warnings.push(ValidationWarning::question(
                question,
                format!("duplicate question ID: {}", question.id),
            ));
        }
    }

    for question in &quiz.questions {
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning::question(question, "prompt is empty"));
        }

        if question.choices.len() < 2 {
            warnings.push(ValidationWarning::question(
                question,
                format!("only {} choice(s); at least 2 needed", question.choices.len()),
            ));
        }

        let mut letters = HashSet::new();
        for choice in &question.choices {
            if !letters.insert(choice.letter.to_ascii_lowercase()) {
                warnings.push(ValidationWarning::question(
                    question,
                    format!("duplicate choice letter: {}", choice.letter),
                ));
            }
        }

        if question.correct.is_empty() {
            warnings.push(ValidationWarning::question(
                question,
                "no correct answer given",
            ));
        }
        for letter in &question.correct {
            if !letters.contains(&letter.to_ascii_lowercase()) {
                warnings.push(ValidationWarning::question(
                    question,
                    format!("correct answer {letter} is not among the choices"),
                ));
            }
        }
    }

    if let Some(threshold) = quiz.pass_threshold {
        if threshold as usize > quiz.questions.len() {
            warnings.push(ValidationWarning::quiz(format!(
                "pass_threshold {threshold} is above the question count {}",
                quiz.questions.len()
            )));
        }
    }

    warnings
}
