//! Core trait definitions for the terminal the quiz talks through.
//!
//! The runner only ever echoes lines, asks for an answer, and sets the idle
//! prompt. Line editing, colors, and other presentation live in the
//! implementations (`ConsoleTerminal` in the CLI, [`ScriptedTerminal`] for
//! tests).
//!
//! [`ScriptedTerminal`]: crate::scripted::ScriptedTerminal

use std::time::Duration;

use async_trait::async_trait;

// ---------------------------------------------------------------------------
// Terminal trait
// ---------------------------------------------------------------------------

/// A conversational terminal: echo output, ask for input, set the prompt.
#[async_trait]
pub trait Terminal: Send + Sync {
    /// Print a line.
    fn echo(&self, text: &str);

    /// Print a line one character at a time, waiting `delay` between
    /// characters. A zero delay prints the whole line at once.
    async fn echo_typed(&self, text: &str, delay: Duration) -> anyhow::Result<()>;

    /// Show `prompt` and read one line of input.
    async fn ask(&self, prompt: &str) -> anyhow::Result<String>;

    /// Set the prompt shown while the terminal is idle.
    fn prompt(&self, text: &str);
}

// ---------------------------------------------------------------------------
// Fixed messages
// ---------------------------------------------------------------------------

/// Shown when an answer matches none of the choices.
pub const INVALID_ANSWER_MESSAGE: &str = "Looks like you typed an incorrect letter or word...";

/// Prompt used when asking for an answer.
pub const ANSWER_PROMPT: &str = "Select ONE option. ";

/// Idle prompt set after each answer.
pub const IDLE_PROMPT: &str = "Answer> ";

/// Strip `[[;color;]text]` style markup, leaving only the text.
///
/// Quiz files may carry the markup of the web terminal they were written
/// for; plain terminals print the text alone.
pub fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("[[") {
        let Some(style_end) = rest[start..].find(";]").map(|i| start + i + 2) else {
            break;
        };
        let Some(text_end) = rest[style_end..].find(']').map(|i| style_end + i) else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push_str(&rest[style_end..text_end]);
        rest = &rest[text_end + 1..];
    }
    out.push_str(rest);
    out
}
