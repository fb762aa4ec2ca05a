//! # Mock I/O Implementations for Testing
//!
//! Scripted input events and an in-memory screen that records what the
//! renderer drew, so the terminal front end can be tested headless.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Mock event stream that yields pre-programmed events
#[derive(Debug, Default)]
pub struct MockEventStream {
    events: VecDeque<Event>,
}

impl MockEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into(),
        }
    }

    /// One key press per character, e.g. `"7+5="`
    pub fn from_keys(keys: &str) -> Self {
        Self::new(
            keys.chars()
                .map(|ch| Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)))
                .collect(),
        )
    }

    pub fn pending_count(&self) -> usize {
        self.events.len()
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }

    fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }
}

/// Recorded render command for verification
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ClearScreen,
    ClearLine,
    MoveCursor(u16, u16),
    HideCursor,
    ShowCursor,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    Write(String),
    Flush,
}

#[derive(Debug, Default)]
struct ScreenState {
    rows: Vec<String>,
    cursor: (u16, u16),
    commands: Vec<RenderCommand>,
    raw_mode: bool,
    alternate_screen: bool,
    cursor_visible: bool,
}

impl ScreenState {
    fn row_mut(&mut self, y: u16) -> &mut String {
        let y = usize::from(y);
        if self.rows.len() <= y {
            self.rows.resize(y + 1, String::new());
        }
        &mut self.rows[y]
    }

    /// Overwrite characters starting at the cursor
    fn put(&mut self, text: &str) {
        let (x, y) = self.cursor;
        let row = self.row_mut(y);
        let mut chars: Vec<char> = row.chars().collect();
        let start = usize::from(x);
        if chars.len() < start {
            chars.resize(start, ' ');
        }
        for (i, ch) in text.chars().enumerate() {
            match chars.get_mut(start + i) {
                Some(slot) => *slot = ch,
                None => chars.push(ch),
            }
        }
        *row = chars.into_iter().collect();
        self.cursor.0 = x.saturating_add(text.chars().count() as u16);
    }
}

/// Shared view of a [`MockRenderStream`]'s screen.
///
/// Stays readable after the stream has been moved into a renderer.
#[derive(Debug, Clone, Default)]
pub struct MockScreen {
    state: Arc<Mutex<ScreenState>>,
}

impl MockScreen {
    fn lock(&self) -> MutexGuard<'_, ScreenState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Text of row `y`, trailing spaces trimmed
    pub fn row(&self, y: u16) -> String {
        self.lock()
            .rows
            .get(usize::from(y))
            .map(|row| row.trim_end().to_string())
            .unwrap_or_default()
    }

    /// All rows joined with newlines
    pub fn contents(&self) -> String {
        self.lock()
            .rows
            .iter()
            .map(|row| row.trim_end())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn contains(&self, text: &str) -> bool {
        self.contents().contains(text)
    }

    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.lock().commands.contains(command)
    }

    pub fn is_raw_mode(&self) -> bool {
        self.lock().raw_mode
    }

    pub fn is_alternate_screen(&self) -> bool {
        self.lock().alternate_screen
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.lock().cursor_visible
    }
}

/// Mock render stream drawing into an in-memory screen
#[derive(Debug)]
pub struct MockRenderStream {
    screen: MockScreen,
    terminal_size: TerminalSize,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        let screen = MockScreen::default();
        screen.lock().cursor_visible = true;
        Self {
            screen,
            terminal_size: size,
        }
    }

    /// Handle for inspecting the screen later
    pub fn screen(&self) -> MockScreen {
        self.screen.clone()
    }

    fn record(&self, command: RenderCommand) -> MutexGuard<'_, ScreenState> {
        let mut state = self.screen.lock();
        state.commands.push(command);
        state
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let text = String::from_utf8_lossy(buf).to_string();
        let mut state = self.record(RenderCommand::Write(text.clone()));
        state.put(&text);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        drop(self.record(RenderCommand::Flush));
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        self.record(RenderCommand::ClearScreen).rows.clear();
        Ok(())
    }

    fn clear_line(&mut self) -> Result<()> {
        let mut state = self.record(RenderCommand::ClearLine);
        let y = state.cursor.1;
        state.row_mut(y).clear();
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.record(RenderCommand::MoveCursor(x, y)).cursor = (x, y);
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::HideCursor).cursor_visible = false;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::ShowCursor).cursor_visible = true;
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(self.terminal_size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.record(RenderCommand::EnterAlternateScreen).alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.record(RenderCommand::LeaveAlternateScreen).alternate_screen = false;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        self.record(RenderCommand::EnableRawMode).raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        self.record(RenderCommand::DisableRawMode).raw_mode = false;
        Ok(())
    }
}
