//! In-memory surfaces that remember everything written to them.

use super::{DisplaySurface, StatusSurface, ViewRenderer};
use anyhow::Result;

#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    display_history: Vec<String>,
    status_history: Vec<String>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value shown on the display, empty before the first render
    pub fn display(&self) -> &str {
        self.display_history.last().map_or("", String::as_str)
    }

    /// Last text shown on the status line
    pub fn status(&self) -> &str {
        self.status_history.last().map_or("", String::as_str)
    }

    pub fn display_history(&self) -> &[String] {
        &self.display_history
    }

    pub fn status_history(&self) -> &[String] {
        &self.status_history
    }
}

impl DisplaySurface for RecordingView {
    fn show_value(&mut self, value: &str) -> Result<()> {
        self.display_history.push(value.to_string());
        Ok(())
    }
}

impl StatusSurface for RecordingView {
    fn show_status(&mut self, text: &str) -> Result<()> {
        self.status_history.push(text.to_string());
        Ok(())
    }
}

impl ViewRenderer for RecordingView {}
