//! # Entry Model
//!
//! The operand currently being typed, or the last computed/returned result.
//! Edits are string-level so that what the user typed is shown back verbatim.

/// Literal shown in place of a value when a computation fails
pub const ERROR_MARKER: &str = "ERR";

const ZERO: &str = "0";

/// Magnitudes outside `[EXPONENT_BELOW, EXPONENT_ABOVE)` are written as `1.5e300`
const EXPONENT_ABOVE: f64 = 1e21;
const EXPONENT_BELOW: f64 = 1e-6;

/// Text of the value under entry, plus whether the next keystroke starts over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    text: String,
    /// Set after a result lands so the next digit begins a fresh entry
    overwrite: bool,
}

impl Entry {
    /// Create a new entry holding `"0"`
    pub fn new() -> Self {
        Self {
            text: ZERO.to_string(),
            overwrite: false,
        }
    }

    /// Current text, always non-empty
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_zero(&self) -> bool {
        self.text == ZERO
    }

    pub fn is_error(&self) -> bool {
        self.text == ERROR_MARKER
    }

    /// Whether the next digit will replace the current text
    pub fn is_overwrite_pending(&self) -> bool {
        self.overwrite
    }

    /// Append a digit or decimal point.
    ///
    /// Returns false when the keystroke was ignored (second decimal point).
    pub fn push(&mut self, ch: char) -> bool {
        debug_assert!(ch.is_ascii_digit() || ch == '.');

        if self.overwrite {
            self.text = ZERO.to_string();
            self.overwrite = false;
        }

        if ch == '.' {
            if self.text.contains('.') {
                return false;
            }
            self.text.push('.');
        } else if self.is_zero() {
            self.text = ch.to_string();
        } else {
            self.text.push(ch);
        }
        true
    }

    /// Prepend or strip a leading minus sign without reparsing.
    ///
    /// Returns false for `"0"` and the error marker, which are left untouched.
    pub fn toggle_sign(&mut self) -> bool {
        if self.is_zero() || self.is_error() {
            return false;
        }
        match self.text.strip_prefix('-') {
            Some(rest) => self.text = rest.to_string(),
            None => self.text.insert(0, '-'),
        }
        true
    }

    /// Divide the value by 100 and re-stringify it
    pub fn percent(&mut self) -> bool {
        let Some(value) = self.value() else {
            return false;
        };
        match format_number(value / 100.0) {
            Some(text) => self.text = text,
            None => self.set_error(),
        }
        true
    }

    /// Parse the text as a floating-point number
    pub fn value(&self) -> Option<f64> {
        if self.is_error() {
            return None;
        }
        self.text.parse::<f64>().ok()
    }

    /// Replace the text with a result; the next digit starts a fresh entry
    pub fn set_result(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.text = if text.is_empty() { ZERO.to_string() } else { text };
        self.overwrite = true;
    }

    /// Keep the text on screen but start over on the next digit
    pub fn mark_consumed(&mut self) {
        self.overwrite = true;
    }

    pub fn set_error(&mut self) {
        self.set_result(ERROR_MARKER);
    }

    /// Take the text out, leaving `"0"` behind
    pub fn take(&mut self) -> String {
        self.overwrite = false;
        std::mem::replace(&mut self.text, ZERO.to_string())
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

/// Shortest decimal form of a finite number; `None` for NaN and infinities.
///
/// Negative zero is shown as `"0"`. Very large and very small magnitudes use
/// exponent notation, which still parses back as an operand.
pub fn format_number(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    if value == 0.0 {
        return Some(ZERO.to_string());
    }
    let magnitude = value.abs();
    if (EXPONENT_BELOW..EXPONENT_ABOVE).contains(&magnitude) {
        Some(value.to_string())
    } else {
        Some(format!("{value:e}"))
    }
}
