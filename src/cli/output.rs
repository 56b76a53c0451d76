//! Robot envelopes and human layouts shared by every command.

use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// `{"status":"ok","timestamp":...,"version":...,"data":...}`
#[derive(Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: "ok",
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION"),
            data,
        }
    }
}

/// Print `data` wrapped in an [`Envelope`], or bare when metadata is off.
pub fn emit_robot<T: Serialize>(data: T, include_metadata: bool) -> Result<()> {
    let payload = if include_metadata {
        serde_json::to_string_pretty(&Envelope::ok(data))?
    } else {
        serde_json::to_string_pretty(&data)?
    };
    println!("{payload}");
    Ok(())
}

/// Line-oriented record view: a bold title, aligned `key value` rows and
/// optional sub-sections.
pub struct HumanLayout {
    rows: Vec<String>,
    label_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    pub const fn new() -> Self {
        Self {
            rows: Vec::new(),
            label_width: 16,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.rows.push(style(text).bold().cyan().to_string());
        self
    }

    pub fn section(&mut self, text: &str) -> &mut Self {
        self.rows.push(style(format!("{text}:")).bold().to_string());
        self
    }

    pub fn kv(&mut self, label: &str, value: &str) -> &mut Self {
        let padded = format!("{label:<width$}", width = self.label_width);
        self.rows.push(format!("  {} {value}", style(padded).dim()));
        self
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.rows.push(format!("  • {text}"));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.rows.push(String::new());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.rows.push(line.into());
        self
    }

    pub fn render(&self) -> String {
        self.rows.join("\n")
    }
}

pub fn emit_human(layout: &HumanLayout) {
    println!("{}", layout.render());
}

/// Render an optional value, `-` when absent.
pub fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// `$40.00` style amount, `-` when absent.
pub fn money(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("${v:.2}"))
}
