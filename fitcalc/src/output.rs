use std::{fmt::Display, io::Write};

/// Result of a command, ready to print as text or JSON.
#[derive(Debug, Clone)]
pub struct Output {
    text: String,
    json: serde_json::Value,
}

impl Output {
    pub fn new<T: serde::Serialize>(value: &T, text: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            text: text.into(),
            json: serde_json::to_value(value)?,
        })
    }

    /// Append advisory lines below the result.
    pub fn with_warnings<W: Display>(mut self, warnings: impl IntoIterator<Item = W>) -> Self {
        for warning in warnings {
            self.text.push_str(&format!("\nwarning: {warning}"));
        }

        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn json(&self) -> &serde_json::Value {
        &self.json
    }

    pub fn write_to(&self, w: &mut impl Write, json: bool) -> std::io::Result<()> {
        match json {
            true => {
                serde_json::to_writer_pretty(&mut *w, &self.json)?;
                writeln!(w)
            }
            false => writeln!(w, "{}", self.text),
        }
    }
}
