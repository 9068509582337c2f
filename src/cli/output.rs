//! Human and CI renderings of command results

use colored::*;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Prose for people, identifiers on their own lines
    Human,
    /// `key=value` lines only, for GitHub Actions and other CI runners
    Github,
}

impl OutputMode {
    pub fn from_flag(github: bool) -> Self {
        if github {
            OutputMode::Github
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Debug, Clone)]
struct Field {
    key: &'static str,
    label: &'static str,
    value: String,
}

/// Result of a create-style command
#[derive(Debug, Clone)]
pub struct Report {
    headline: String,
    fields: Vec<Field>,
}

impl Report {
    pub fn new(headline: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            fields: Vec::new(),
        }
    }

    /// Add a value, emitted as `key=value` in CI mode and `label: value` otherwise
    pub fn field(mut self, key: &'static str, label: &'static str, value: impl Display) -> Self {
        self.fields.push(Field {
            key,
            label,
            value: value.to_string(),
        });
        self
    }

    pub fn render(&self, mode: OutputMode) -> String {
        let mut out = String::new();
        match mode {
            OutputMode::Github => {
                for field in &self.fields {
                    out.push_str(&format!("{}={}\n", field.key, field.value));
                }
            }
            OutputMode::Human => {
                out.push_str(&format!("{}\n", self.headline.green().bold()));
                for field in &self.fields {
                    out.push_str(&format!("{}: {}\n", field.label, field.value.cyan()));
                }
            }
        }
        out
    }
}

/// Pretty JSON followed by a newline
pub fn render_json<T: serde::Serialize>(value: &T) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    Ok(out)
}
