//! User-facing display settings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_DATE_FORMAT: &str = "DD/MM/YYYY";
pub const DEFAULT_PRIMARY_COLOR: &str = "#6366f1";

/// Display settings persisted as one JSON object.
///
/// Every field has a default, so a partial stored object is completed with
/// defaults when loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub language: String,
    pub date_format: String,
    pub dark_mode: bool,
    pub primary_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            dark_mode: false,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
        }
    }
}

impl Settings {
    /// Parses a stored JSON blob, filling missing fields with defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Renders a date with the configured `DD/MM/YYYY`-style pattern.
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&to_chrono_pattern(&self.date_format)).to_string()
    }
}

/// Translates `YYYY`, `YY`, `MM`, `M`, `DD` and `D` tokens into chrono
/// specifiers. Everything else is copied literally.
fn to_chrono_pattern(pattern: &str) -> String {
    const TOKENS: &[(&str, &str)] = &[
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MM", "%m"),
        ("M", "%-m"),
        ("DD", "%d"),
        ("D", "%-d"),
    ];

    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;
    'scan: while let Some(c) = rest.chars().next() {
        for (token, chrono_fmt) in TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                out.push_str(chrono_fmt);
                rest = after;
                continue 'scan;
            }
        }
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}
