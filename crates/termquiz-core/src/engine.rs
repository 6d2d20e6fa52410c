//! Quiz runner.
//!
//! Walks a quiz question by question through a [`Terminal`], scores the
//! answers, and produces a [`QuizReport`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use crate::eventual::Eventual;
use crate::model::{Question, Quiz};
use crate::report::{AnswerRecord, QuizReport, QuizSummary};
use crate::seq::Sequence;
use crate::traits::{Terminal, ANSWER_PROMPT, IDLE_PROMPT, INVALID_ANSWER_MESSAGE};

/// Printed when the score reaches the threshold.
pub const WIN_MESSAGE: &str = "You win";
/// Printed when it does not.
pub const LOSE_MESSAGE: &str = "You lose";
pub const WIN_ENCOURAGEMENT: &str = "Congratulations, you are on the right track, keep practicing!";
pub const LOSE_ENCOURAGEMENT: &str = "Keep trying, Rome wasn't built in a day!";

/// Configuration for the quiz runner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Per-character delay for typed output. Zero prints immediately.
    pub typing_delay: Duration,
    /// Ask the questions in random order.
    pub shuffle_questions: bool,
    /// Seed for the question shuffle. `None` uses the thread RNG.
    pub seed: Option<u64>,
    /// Unrecognized answers allowed per question before it is given up.
    /// Zero means keep asking.
    pub max_invalid_answers: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            typing_delay: Duration::from_millis(2),
            shuffle_questions: false,
            seed: None,
            max_invalid_answers: 3,
        }
    }
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_question_start(&self, number: usize, total: usize, question_id: &str);
    fn on_answer(&self, record: &AnswerRecord);
    fn on_quiz_complete(&self, report: &QuizReport);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_question_start(&self, _: usize, _: usize, _: &str) {}
    fn on_answer(&self, _: &AnswerRecord) {}
    fn on_quiz_complete(&self, _: &QuizReport) {}
}

/// Runs quizzes against a terminal.
pub struct QuizRunner {
    terminal: Arc<dyn Terminal>,
    config: RunnerConfig,
}

impl QuizRunner {
    pub fn new(terminal: Arc<dyn Terminal>, config: RunnerConfig) -> Self {
        Self { terminal, config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn terminal(&self) -> &Arc<dyn Terminal> {
        &self.terminal
    }

    /// Run one quiz from the rules to the verdict.
    pub async fn run(&self, quiz: &Quiz, progress: &dyn ProgressReporter) -> Result<QuizReport> {
        let start = Instant::now();
        let run_id = Uuid::new_v4();
        let term = &self.terminal;
        let delay = self.config.typing_delay;

        let mut questions = quiz.questions.clone();
        if self.config.shuffle_questions {
            match self.config.seed {
                Some(seed) => questions.shuffle_with(&mut StdRng::seed_from_u64(seed)),
                None => questions.shuffle(),
            };
        }
        tracing::info!(quiz = %quiz.id, questions = questions.len(), %run_id, "starting quiz");

        self.print_rules(quiz).await?;

        let total = questions.len();
        let mut answers = Sequence::with_capacity(total);
        for (index, question) in questions.iter().enumerate() {
            progress.on_question_start(index + 1, total, &question.id);
            let record = self.ask_question(index + 1, question).await?;
            tracing::debug!(
                question = %record.question_id,
                selected = ?record.selected,
                correct = record.correct,
                "answer recorded"
            );
            progress.on_answer(&record);
            answers.push(record);
        }

        let score = answers
            .reduce(
                |score, record, _| Ok(Eventual::ready(score + u32::from(record.correct))),
                0u32,
            )?
            .resolve()
            .await?
            .first()
            .copied()
            .unwrap_or(0);
        let passed = quiz.passes(score);

        term.echo("");
        if passed {
            term.echo_typed(WIN_MESSAGE, delay).await?;
        } else {
            term.echo_typed(LOSE_MESSAGE, delay).await?;
        }
        term.echo_typed("result:", delay).await?;
        term.echo(&format!("{score}/{total}"));
        let encouragement = if passed {
            WIN_ENCOURAGEMENT
        } else {
            LOSE_ENCOURAGEMENT
        };
        term.echo_typed(encouragement, delay).await?;
        term.echo("");

        let elapsed = start.elapsed();
        tracing::info!(quiz = %quiz.id, score, total, passed, "quiz finished");

        let report = QuizReport {
            id: run_id,
            created_at: chrono::Utc::now(),
            quiz: QuizSummary::from(quiz),
            answers: answers.into_vec(),
            score,
            total,
            passed,
            duration_ms: elapsed.as_millis() as u64,
        };
        progress.on_quiz_complete(&report);
        Ok(report)
    }

    async fn print_rules(&self, quiz: &Quiz) -> Result<()> {
        let term = &self.terminal;
        let delay = self.config.typing_delay;

        term.echo("");
        term.echo_typed(&quiz.name, delay).await?;
        if !quiz.description.trim().is_empty() {
            term.echo_typed(quiz.description.trim(), delay).await?;
        }
        term.echo("");
        term.echo_typed("Rules:", delay).await?;
        term.echo_typed("1) Each correct question gives you 1 point", delay)
            .await?;
        term.echo_typed(
            &format!(
                "2) If you get {} questions or more correct you pass",
                quiz.threshold()
            ),
            delay,
        )
        .await?;
        term.echo("");
        term.echo_typed("Good luck", delay).await?;
        Ok(())
    }

    /// Present one question and read answers until one is recognized or
    /// the invalid-answer budget runs out.
    async fn ask_question(&self, number: usize, question: &Question) -> Result<AnswerRecord> {
        let term = &self.terminal;
        let delay = self.config.typing_delay;
        let mut invalid_attempts = 0u32;

        loop {
            term.echo("");
            term.echo_typed(&format!("Question #{number}"), delay).await?;
            term.echo_typed(question.prompt.trim_end(), delay).await?;
            term.echo("");
            for choice in &question.choices {
                term.echo_typed(&format!("{}) {}", choice.letter, choice.text), delay)
                    .await?;
            }
            term.echo("");

            let answer = term.ask(ANSWER_PROMPT).await?;
            term.prompt(IDLE_PROMPT);

            if let Some(choice) = question.match_answer(&answer) {
                return Ok(AnswerRecord {
                    question_id: question.id.clone(),
                    selected: Some(choice.letter),
                    correct: question.is_correct(choice.letter),
                    invalid_attempts,
                });
            }

            invalid_attempts += 1;
            tracing::debug!(question = %question.id, %answer, invalid_attempts, "unrecognized answer");
            term.echo_typed(INVALID_ANSWER_MESSAGE, delay).await?;

            let limit = self.config.max_invalid_answers;
            if limit > 0 && invalid_attempts >= limit {
                tracing::warn!(question = %question.id, "giving up after {invalid_attempts} unrecognized answers");
                return Ok(AnswerRecord {
                    question_id: question.id.clone(),
                    selected: None,
                    correct: false,
                    invalid_attempts,
                });
            }
        }
    }
}
