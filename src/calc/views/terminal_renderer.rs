//! # Terminal Renderer
//!
//! Draws the calculator on a terminal through a [`RenderStream`]:
//!
//! ```text
//! row 0  calcline  http://localhost:8080
//! row 2                                 12
//! row 4  ID: abc123
//! row 6  0-9 .  + - * /  Enter =  Esc clear  n ±  % percent  q quit
//! ```

use super::{DisplaySurface, StatusSurface, ViewRenderer};
use crate::calc::io::RenderStream;
use anyhow::Result;

const TITLE_ROW: u16 = 0;
const DISPLAY_ROW: u16 = 2;
const STATUS_ROW: u16 = 4;
const HELP_ROW: u16 = 6;

const HELP_TEXT: &str = "0-9 .  + - * /  Enter =  Esc clear  n ±  % percent  q quit";

/// Shown in front of a value cut to fit the display row
const OVERFLOW_MARK: char = '…';

/// Terminal-based view renderer
pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: (u16, u16),
    title: String,
    /// Last drawn surface contents, kept for full redraws
    display: String,
    status: String,
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    /// Create a renderer that takes ownership of the render stream
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
            title: "calcline".to_string(),
            display: "0".to_string(),
            status: String::new(),
        })
    }

    /// Text for the top row, e.g. the service address
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    fn width(&self) -> usize {
        usize::from(self.terminal_size.0)
    }

    /// Redraw every row from the remembered state
    pub fn render_full(&mut self) -> Result<()> {
        self.render_stream.clear_screen()?;
        let title = self.title.clone();
        self.write_row(TITLE_ROW, &title)?;
        self.render_display()?;
        self.render_status()?;
        self.write_row(HELP_ROW, HELP_TEXT)?;
        Ok(())
    }

    fn render_display(&mut self) -> Result<()> {
        let line = fit_right(&self.display, self.width());
        self.write_row(DISPLAY_ROW, &line)
    }

    fn render_status(&mut self) -> Result<()> {
        let status = self.status.clone();
        self.write_row(STATUS_ROW, &status)
    }

    fn write_row(&mut self, row: u16, text: &str) -> Result<()> {
        let text: String = text.chars().take(self.width()).collect();
        self.render_stream.move_cursor(0, row)?;
        self.render_stream.clear_line()?;
        self.render_stream.write_all(text.as_bytes())?;
        self.render_stream.flush()?;
        Ok(())
    }
}

/// Right-align `text` in `width` columns. Text that does not fit keeps its
/// tail, which holds the exponent of large values, behind [`OVERFLOW_MARK`].
fn fit_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return format!("{text:>width$}");
    }
    let tail: String = text.chars().skip(len + 1 - width.max(1)).collect();
    format!("{OVERFLOW_MARK}{tail}")
}

impl<RS: RenderStream> DisplaySurface for TerminalRenderer<RS> {
    fn show_value(&mut self, value: &str) -> Result<()> {
        self.display = value.to_string();
        self.render_display()
    }
}

impl<RS: RenderStream> StatusSurface for TerminalRenderer<RS> {
    fn show_status(&mut self, text: &str) -> Result<()> {
        self.status = text.to_string();
        self.render_status()
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.hide_cursor()?;
        self.render_full()
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.show_cursor()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::io::{MockRenderStream, MockScreen};

    fn renderer(width: u16) -> (TerminalRenderer<MockRenderStream>, MockScreen) {
        let stream = MockRenderStream::with_size((width, 10));
        let screen = stream.screen();
        (TerminalRenderer::with_render_stream(stream).unwrap(), screen)
    }

    #[test]
    fn initialize_should_prepare_terminal_and_draw_frame() -> Result<()> {
        let (mut renderer, screen) = renderer(40);
        renderer.set_title("calcline  http://calc.local");
        renderer.initialize()?;

        assert!(screen.is_raw_mode());
        assert!(screen.is_alternate_screen());
        assert!(!screen.is_cursor_visible());
        assert_eq!(screen.row(TITLE_ROW), "calcline  http://calc.local");
        assert_eq!(screen.row(DISPLAY_ROW).trim_start(), "0");
        assert!(screen.row(HELP_ROW).starts_with("0-9"));
        Ok(())
    }

    #[test]
    fn show_value_should_right_align_display() -> Result<()> {
        let (mut renderer, screen) = renderer(10);
        renderer.show_value("12")?;
        assert_eq!(screen.row(DISPLAY_ROW), "        12");

        renderer.show_value("7")?;
        assert_eq!(screen.row(DISPLAY_ROW), "         7");
        Ok(())
    }

    #[test]
    fn show_value_should_keep_tail_of_too_wide_value() -> Result<()> {
        let (mut renderer, screen) = renderer(8);
        renderer.show_value("1.2345678901e300")?;
        assert_eq!(screen.row(DISPLAY_ROW), "…901e300");

        renderer.show_value("12345678")?;
        assert_eq!(screen.row(DISPLAY_ROW), "12345678");
        Ok(())
    }

    #[test]
    fn fit_right_should_handle_narrow_widths() {
        assert_eq!(fit_right("123", 1), "…");
        assert_eq!(fit_right("123", 2), "…3");
        assert_eq!(fit_right("", 3), "   ");
    }

    #[test]
    fn show_status_should_replace_previous_text() -> Result<()> {
        let (mut renderer, screen) = renderer(40);
        renderer.show_status("Calculando...")?;
        renderer.show_status("ID: abc123")?;
        assert_eq!(screen.row(STATUS_ROW), "ID: abc123");

        renderer.show_status("")?;
        assert_eq!(screen.row(STATUS_ROW), "");
        Ok(())
    }

    #[test]
    fn render_full_should_redraw_remembered_state() -> Result<()> {
        let (mut renderer, screen) = renderer(30);
        renderer.show_value("ERR")?;
        renderer.show_status("Erro: overflow")?;
        renderer.update_size(20, 10);
        renderer.render_full()?;

        assert_eq!(screen.row(DISPLAY_ROW), format!("{:>20}", "ERR"));
        assert_eq!(screen.row(STATUS_ROW), "Erro: overflow");
        Ok(())
    }

    #[test]
    fn cleanup_should_restore_terminal() -> Result<()> {
        let (mut renderer, screen) = renderer(40);
        renderer.initialize()?;
        renderer.cleanup()?;

        assert!(!screen.is_raw_mode());
        assert!(!screen.is_alternate_screen());
        assert!(screen.is_cursor_visible());
        Ok(())
    }
}
