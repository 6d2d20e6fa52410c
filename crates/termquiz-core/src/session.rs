//! Quiz picker loop.
//!
//! Offers the loaded quizzes by letter (A, B, C, ...), runs the one picked,
//! then offers them again until the user declines.

use anyhow::Result;

use crate::engine::{ProgressReporter, QuizRunner};
use crate::model::Quiz;
use crate::report::QuizReport;
use crate::text::{chr, ord};
use crate::traits::INVALID_ANSWER_MESSAGE;

const FIRST_PICK_MESSAGE: &str = "Type the exam letter that you want:";
const AGAIN_MESSAGE: &str = "Let's keep practicing, type the exam letter that you want:";

/// Answers that end the session. No single letters, since those pick quizzes.
const QUIT_WORDS: [&str; 3] = ["no", "quit", "exit"];

/// One quiz per letter, `A` to `Z`.
pub const MAX_PICKABLE: usize = 26;

/// Letter shown next to the quiz at `index`.
pub fn pick_letter(index: usize) -> Result<char> {
    if index >= MAX_PICKABLE {
        anyhow::bail!(
            "no letter for quiz #{}, at most {MAX_PICKABLE} can be offered",
            index + 1
        );
    }
    Ok(chr(ord("A")? + index as u32)?)
}

/// Prompt listing the choices, e.g. `A, B or C `.
fn pick_prompt(count: usize) -> Result<String> {
    let letters = (0..count)
        .map(|i| pick_letter(i).map(String::from))
        .collect::<Result<Vec<_>>>()?;
    Ok(match letters.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {last} ", rest.join(", ")),
        Some((last, _)) => format!("{last} "),
        None => String::new(),
    })
}

/// Which quiz an answer selects, with the same rules as answers to
/// questions: the first letter, in listed order, found in the answer.
fn match_pick(answer: &str, count: usize) -> Result<Option<usize>> {
    let answer = answer.trim().to_ascii_uppercase();
    for index in 0..count {
        if answer.contains(pick_letter(index)?) {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

fn is_quit(answer: &str) -> bool {
    let answer = answer.trim().to_ascii_lowercase();
    answer.is_empty() || QUIT_WORDS.contains(&answer.as_str())
}

/// Run the picker loop over `quizzes`.
///
/// A single quiz is run directly, once. Otherwise the user picks by letter;
/// after each run they may pick again, and an empty answer or "no" ends the
/// session. More than [`MAX_PICKABLE`] quizzes is an error. Returns the
/// reports of every completed run.
pub async fn run_session(
    runner: &QuizRunner,
    quizzes: &[Quiz],
    progress: &dyn ProgressReporter,
) -> Result<Vec<QuizReport>> {
    let mut reports = Vec::new();
    match quizzes {
        [] => anyhow::bail!("no quizzes to run"),
        [only] => {
            reports.push(runner.run(only, progress).await?);
            return Ok(reports);
        }
        many if many.len() > MAX_PICKABLE => anyhow::bail!(
            "{} quizzes loaded, at most {MAX_PICKABLE} can be offered at once",
            many.len()
        ),
        _ => {}
    }

    let term = runner.terminal();
    let delay = runner.config().typing_delay;
    let prompt = pick_prompt(quizzes.len())?;

    term.echo("");
    term.echo_typed("Which exam would you like to practice?", delay)
        .await?;
    for (index, quiz) in quizzes.iter().enumerate() {
        term.echo(&format!("{}) {}", pick_letter(index)?, quiz.name));
    }
    term.echo("");
    let mut message = FIRST_PICK_MESSAGE;

    loop {
        term.echo_typed(message, delay).await?;
        let answer = term.ask(&prompt).await?;

        if is_quit(&answer) {
            tracing::debug!("session ended after {} run(s)", reports.len());
            return Ok(reports);
        }

        match match_pick(&answer, quizzes.len())? {
            Some(index) => {
                let quiz = &quizzes[index];
                term.echo("");
                term.echo_typed(&format!("Starting {}", quiz.name), delay)
                    .await?;
                reports.push(runner.run(quiz, progress).await?);
                message = AGAIN_MESSAGE;
            }
            None => {
                term.echo_typed(INVALID_ANSWER_MESSAGE, delay).await?;
            }
        }
    }
}
