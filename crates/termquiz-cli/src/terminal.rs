//! Console implementation of [`Terminal`] over stdin/stdout.

use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use termquiz_core::traits::{strip_markup, Terminal};

/// Reads answers line by line from stdin and prints to stdout. Web-terminal
/// color markup in quiz text is stripped before printing.
pub struct ConsoleTerminal {
    input: tokio::sync::Mutex<Lines<BufReader<Stdin>>>,
    newline: bool,
    idle_prompt: Mutex<String>,
}

impl ConsoleTerminal {
    pub fn new(newline: bool) -> Self {
        Self {
            input: tokio::sync::Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            newline,
            idle_prompt: Mutex::new(String::new()),
        }
    }

    fn write(&self, text: &str) -> Result<()> {
        let mut out = std::io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn end_line(&self) -> &'static str {
        if self.newline {
            "\n"
        } else {
            ""
        }
    }
}

#[async_trait]
impl Terminal for ConsoleTerminal {
    fn echo(&self, text: &str) {
        let line = format!("{}{}", strip_markup(text), self.end_line());
        if let Err(e) = self.write(&line) {
            tracing::warn!("failed to write to stdout: {e}");
        }
    }

    async fn echo_typed(&self, text: &str, delay: Duration) -> Result<()> {
        if delay.is_zero() {
            self.echo(text);
            return Ok(());
        }
        let mut buf = [0u8; 4];
        for c in strip_markup(text).chars() {
            self.write(c.encode_utf8(&mut buf))?;
            tokio::time::sleep(delay).await;
        }
        self.write(self.end_line())
    }

    async fn ask(&self, prompt: &str) -> Result<String> {
        let shown = if prompt.is_empty() {
            self.idle_prompt
                .lock()
                .map(|p| p.clone())
                .unwrap_or_default()
        } else {
            strip_markup(prompt)
        };
        self.write(&shown)?;

        let line = self
            .input
            .lock()
            .await
            .next_line()
            .await
            .context("failed to read from stdin")?;
        line.ok_or_else(|| anyhow::anyhow!("input closed while asking {:?}", shown.trim()))
    }

    fn prompt(&self, text: &str) {
        if let Ok(mut idle) = self.idle_prompt.lock() {
            *idle = strip_markup(text);
        }
    }
}
