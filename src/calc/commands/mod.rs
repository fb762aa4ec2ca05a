//! # Key Commands
//!
//! Maps terminal key events to calculator inputs. Each binding is a small
//! [`Command`]; the [`CommandRegistry`] asks them in order and the first
//! relevant one decides what the key means.

use crate::calc::models::Operator;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Discrete triggers exposed by the input surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorInput {
    Digit(char),
    Point,
    Operator(Operator),
    Equals,
    Clear,
    ToggleSign,
    Percent,
    /// Leave the terminal front end
    Quit,
}

/// A key binding
pub trait Command: Send + Sync {
    /// Whether this binding handles the key event
    fn is_relevant(&self, event: &KeyEvent) -> bool;

    /// Input produced by a relevant key event
    fn input(&self, event: &KeyEvent) -> Option<CalculatorInput>;

    fn name(&self) -> &'static str;
}

fn plain_char(event: &KeyEvent) -> Option<char> {
    if event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match event.code {
        KeyCode::Char(ch) => Some(ch),
        _ => None,
    }
}

/// `0`-`9`
pub struct DigitCommand;

impl Command for DigitCommand {
    fn is_relevant(&self, event: &KeyEvent) -> bool {
        plain_char(event).is_some_and(|ch| ch.is_ascii_digit())
    }

    fn input(&self, event: &KeyEvent) -> Option<CalculatorInput> {
        plain_char(event).map(CalculatorInput::Digit)
    }

    fn name(&self) -> &'static str {
        "Digit"
    }
}

/// `.` or `,`
pub struct PointCommand;

impl Command for PointCommand {
    fn is_relevant(&self, event: &KeyEvent) -> bool {
        matches!(plain_char(event), Some('.' | ','))
    }

    fn input(&self, _event: &KeyEvent) -> Option<CalculatorInput> {
        Some(CalculatorInput::Point)
    }

    fn name(&self) -> &'static str {
        "Point"
    }
}

/// `+`, `-`, `*` or `x`, `/`
pub struct OperatorCommand;

impl OperatorCommand {
    fn operator(event: &KeyEvent) -> Option<Operator> {
        match plain_char(event)? {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' | 'x' | 'X' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }
}

impl Command for OperatorCommand {
    fn is_relevant(&self, event: &KeyEvent) -> bool {
        Self::operator(event).is_some()
    }

    fn input(&self, event: &KeyEvent) -> Option<CalculatorInput> {
        Self::operator(event).map(CalculatorInput::Operator)
    }

    fn name(&self) -> &'static str {
        "Operator"
    }
}

/// `Enter` or `=`
pub struct EqualsCommand;

impl Command for EqualsCommand {
    fn is_relevant(&self, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Enter) || plain_char(event) == Some('=')
    }

    fn input(&self, _event: &KeyEvent) -> Option<CalculatorInput> {
        Some(CalculatorInput::Equals)
    }

    fn name(&self) -> &'static str {
        "Equals"
    }
}

/// `Esc`, `Delete` or `c`
pub struct ClearCommand;

impl Command for ClearCommand {
    fn is_relevant(&self, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Esc | KeyCode::Delete)
            || matches!(plain_char(event), Some('c' | 'C'))
    }

    fn input(&self, _event: &KeyEvent) -> Option<CalculatorInput> {
        Some(CalculatorInput::Clear)
    }

    fn name(&self) -> &'static str {
        "Clear"
    }
}

/// `n` or `_`
pub struct ToggleSignCommand;

impl Command for ToggleSignCommand {
    fn is_relevant(&self, event: &KeyEvent) -> bool {
        matches!(plain_char(event), Some('n' | 'N' | '_'))
    }

    fn input(&self, _event: &KeyEvent) -> Option<CalculatorInput> {
        Some(CalculatorInput::ToggleSign)
    }

    fn name(&self) -> &'static str {
        "ToggleSign"
    }
}

/// `%`
pub struct PercentCommand;

impl Command for PercentCommand {
    fn is_relevant(&self, event: &KeyEvent) -> bool {
        plain_char(event) == Some('%')
    }

    fn input(&self, _event: &KeyEvent) -> Option<CalculatorInput> {
        Some(CalculatorInput::Percent)
    }

    fn name(&self) -> &'static str {
        "Percent"
    }
}

/// `q` or `Ctrl+C`
pub struct QuitCommand;

impl Command for QuitCommand {
    fn is_relevant(&self, event: &KeyEvent) -> bool {
        let ctrl_c = event.code == KeyCode::Char('c')
            && event.modifiers.contains(KeyModifiers::CONTROL);
        ctrl_c || matches!(plain_char(event), Some('q' | 'Q'))
    }

    fn input(&self, _event: &KeyEvent) -> Option<CalculatorInput> {
        Some(CalculatorInput::Quit)
    }

    fn name(&self) -> &'static str {
        "Quit"
    }
}

/// Ordered set of key bindings
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    /// Registry with the default bindings
    pub fn new() -> Self {
        // Quit first so Ctrl+C never reads as clear
        let commands: Vec<Box<dyn Command>> = vec![
            Box::new(QuitCommand),
            Box::new(DigitCommand),
            Box::new(PointCommand),
            Box::new(OperatorCommand),
            Box::new(EqualsCommand),
            Box::new(ClearCommand),
            Box::new(ToggleSignCommand),
            Box::new(PercentCommand),
        ];
        Self { commands }
    }

    /// Translate a key event; release and repeat events are ignored
    pub fn process_event(&self, event: &KeyEvent) -> Option<CalculatorInput> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        let command = self.commands.iter().find(|c| c.is_relevant(event))?;
        tracing::debug!("Key {:?} handled by {}", event.code, command.name());
        command.input(event)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
