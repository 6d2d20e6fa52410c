//! Scripted terminal for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::traits::Terminal;

/// One line of terminal traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Text echoed to the user.
    Output(String),
    /// A question asked and the answer that came back.
    Asked { prompt: String, answer: String },
}

/// A terminal that answers from a fixed script and records everything.
///
/// Runs out of answers with an error, the way a closed stdin would.
pub struct ScriptedTerminal {
    /// Answers handed out in order.
    answers: Mutex<VecDeque<String>>,
    /// Everything echoed or asked so far.
    transcript: Mutex<Vec<Line>>,
    /// Current idle prompt.
    current_prompt: Mutex<String>,
    /// Number of `ask` calls made.
    ask_count: AtomicU32,
}

impl ScriptedTerminal {
    /// Create a terminal that will answer with `answers`, in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            transcript: Mutex::new(Vec::new()),
            current_prompt: Mutex::new(String::new()),
            ask_count: AtomicU32::new(0),
        }
    }

    /// Get the number of questions asked.
    pub fn ask_count(&self) -> u32 {
        self.ask_count.load(Ordering::Relaxed)
    }

    /// Get everything echoed or asked so far.
    pub fn transcript(&self) -> Vec<Line> {
        self.transcript.lock().unwrap().clone()
    }

    /// Only the echoed lines, in order.
    pub fn output(&self) -> Vec<String> {
        self.transcript
            .lock()
            .unwrap()
            .iter()
            .filter_map(|line| match line {
                Line::Output(text) => Some(text.clone()),
                Line::Asked { .. } => None,
            })
            .collect()
    }

    /// The idle prompt most recently set.
    pub fn current_prompt(&self) -> String {
        self.current_prompt.lock().unwrap().clone()
    }

    /// Answers not handed out yet.
    pub fn remaining_answers(&self) -> usize {
        self.answers.lock().unwrap().len()
    }
}

#[async_trait]
impl Terminal for ScriptedTerminal {
    fn echo(&self, text: &str) {
        self.transcript
            .lock()
            .unwrap()
            .push(Line::Output(text.to_string()));
    }

    async fn echo_typed(&self, text: &str, delay: Duration) -> anyhow::Result<()> {
        if !delay.is_zero() {
            tokio::time::sleep(delay * text.chars().count() as u32).await;
        }
        self.echo(text);
        Ok(())
    }

    async fn ask(&self, prompt: &str) -> anyhow::Result<String> {
        self.ask_count.fetch_add(1, Ordering::Relaxed);
        let answer = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("input closed while asking {prompt:?}"))?;
        self.transcript.lock().unwrap().push(Line::Asked {
            prompt: prompt.to_string(),
            answer: answer.clone(),
        });
        Ok(answer)
    }

    fn prompt(&self, text: &str) {
        *self.current_prompt.lock().unwrap() = text.to_string();
    }
}
