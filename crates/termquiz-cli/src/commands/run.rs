//! The `termquiz run` command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use termquiz_core::config::load_config_from;
use termquiz_core::engine::{ProgressReporter, QuizRunner};
use termquiz_core::parser;
use termquiz_core::report::{AnswerRecord, QuizReport};
use termquiz_core::session::run_session;

use crate::terminal::ConsoleTerminal;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_question_start(&self, number: usize, total: usize, question_id: &str) {
        tracing::debug!("question {number}/{total}: {question_id}");
    }

    fn on_answer(&self, record: &AnswerRecord) {
        if record.selected.is_none() {
            tracing::info!(
                "question {} skipped after {} unrecognized answers",
                record.question_id,
                record.invalid_attempts
            );
        }
    }

    fn on_quiz_complete(&self, report: &QuizReport) {
        eprintln!(
            "Complete: {} {}/{} ({:.1}s)",
            report.quiz.name,
            report.score,
            report.total,
            report.duration_ms as f64 / 1000.0
        );
    }
}

pub async fn execute(
    quiz_path: PathBuf,
    shuffle: bool,
    seed: Option<u64>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    no_typing: bool,
) -> Result<()> {
    // Load config
    let config = load_config_from(config_path.as_deref())?;

    // Load quizzes
    let quizzes = parser::load_quizzes(&quiz_path)?;
    anyhow::ensure!(
        !quizzes.is_empty(),
        "no quizzes found in {}",
        quiz_path.display()
    );
    for quiz in &quizzes {
        for w in parser::validate_quiz(quiz) {
            match &w.question_id {
                Some(id) => tracing::warn!("{} [{id}]: {}", quiz.id, w.message),
                None => tracing::warn!("{}: {}", quiz.id, w.message),
            }
        }
    }

    let mut runner_config = config.runner_config();
    if shuffle {
        runner_config.shuffle_questions = true;
    }
    if seed.is_some() {
        runner_config.seed = seed;
    }
    if no_typing {
        runner_config.typing_delay = Duration::ZERO;
    }

    let terminal = Arc::new(ConsoleTerminal::new(config.newline));
    let runner = QuizRunner::new(terminal, runner_config);
    let reports = run_session(&runner, &quizzes, &ConsoleReporter).await?;

    if reports.is_empty() {
        return Ok(());
    }

    print_summary(&reports);

    // Save outputs
    let output = output.unwrap_or(config.output_dir);
    for report in &reports {
        let path = output.join(report.file_name());
        report.save_json(&path)?;
        eprintln!("Results saved to: {}", path.display());
    }

    Ok(())
}

fn print_summary(reports: &[QuizReport]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Quiz", "Score", "Pass at", "Result", "Time"]);

    for report in reports {
        table.add_row(vec![
            Cell::new(&report.quiz.name),
            Cell::new(format!(
                "{}/{} ({:.1}%)",
                report.score,
                report.total,
                report.percentage()
            )),
            Cell::new(report.quiz.pass_threshold),
            Cell::new(if report.passed { "PASS" } else { "FAIL" }),
            Cell::new(format!("{:.1}s", report.duration_ms as f64 / 1000.0)),
        ]);
    }

    eprintln!("\n{table}");
}
