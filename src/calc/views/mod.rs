//! # View Layer
//!
//! The controller writes to two text sinks: the display, mirroring the value
//! under entry, and the status line, reporting the remote request lifecycle.
//! Any front end implements both surfaces; [`TerminalRenderer`] draws them
//! with crossterm and [`RecordingView`] keeps them in memory for tests.

use anyhow::Result;

pub mod recording;
pub mod terminal_renderer;

pub use recording::RecordingView;
pub use terminal_renderer::TerminalRenderer;

/// Write-only sink mirroring the current value
pub trait DisplaySurface {
    fn show_value(&mut self, value: &str) -> Result<()>;
}

/// Write-only sink for request status, correlation id and error text
pub trait StatusSurface {
    fn show_status(&mut self, text: &str) -> Result<()>;
}

/// Lifecycle of a front end that owns both surfaces
pub trait ViewRenderer: DisplaySurface + StatusSurface {
    /// Prepare the output device before the first render
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Restore the output device on exit
    fn cleanup(&mut self) -> Result<()> {
        Ok(())
    }
}
