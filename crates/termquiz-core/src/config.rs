//! termquiz configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::RunnerConfig;

/// Top-level termquiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermquizConfig {
    /// Per-character delay for typed output, in milliseconds.
    #[serde(default = "default_typing_delay")]
    pub typing_delay_ms: u64,
    /// Ask questions in random order.
    #[serde(default)]
    pub shuffle_questions: bool,
    /// Fixed seed for the question shuffle.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Unrecognized answers allowed per question (0 = unlimited).
    #[serde(default = "default_max_invalid")]
    pub max_invalid_answers: u32,
    /// Where run reports are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// End every echoed line with a newline.
    #[serde(default = "default_true")]
    pub newline: bool,
}

fn default_typing_delay() -> u64 {
    2
}
fn default_max_invalid() -> u32 {
    3
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./termquiz-results")
}
fn default_true() -> bool {
    true
}

impl Default for TermquizConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: default_typing_delay(),
            shuffle_questions: false,
            seed: None,
            max_invalid_answers: default_max_invalid(),
            output_dir: default_output_dir(),
            newline: true,
        }
    }
}

impl TermquizConfig {
    /// Runner settings derived from this configuration.
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            typing_delay: Duration::from_millis(self.typing_delay_ms),
            shuffle_questions: self.shuffle_questions,
            seed: self.seed,
            max_invalid_answers: self.max_invalid_answers,
        }
    }

    /// Apply `TERMQUIZ_*` overrides read through `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("TERMQUIZ_TYPING_DELAY_MS") {
            self.typing_delay_ms = value
                .trim()
                .parse()
                .with_context(|| format!("invalid TERMQUIZ_TYPING_DELAY_MS: {value:?}"))?;
        }
        if let Some(value) = lookup("TERMQUIZ_SEED") {
            self.seed = Some(
                value
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid TERMQUIZ_SEED: {value:?}"))?,
            );
        }
        let output_dir = self.output_dir.to_string_lossy();
        if output_dir.contains("${") {
            self.output_dir = PathBuf::from(resolve_vars(&output_dir, &lookup));
        }
        Ok(())
    }
}

/// Resolve variable references like `${VAR_NAME}` in a string. Unset
/// variables resolve to the empty string.
fn resolve_vars<F>(s: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&lookup(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `termquiz.toml` in the current directory
/// 2. `~/.config/termquiz/config.toml`
///
/// Environment variable overrides: `TERMQUIZ_TYPING_DELAY_MS`, `TERMQUIZ_SEED`.
pub fn load_config() -> Result<TermquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<TermquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("termquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            config_dir()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TermquizConfig::default(),
    };

    config.apply_overrides(|name| std::env::var(name).ok())?;
    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<TermquizConfig> {
    Ok(toml::from_str(content)?)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("termquiz"))
}
