//! # Calculator Model
//!
//! Pure calculator state: the entry under edit and the pending binary
//! operation. No rendering and no I/O happen here; the controller drives
//! this model and mirrors it onto the surfaces.

use super::entry::{format_number, Entry};
use super::operator::Operator;

/// Whether a binary operation is waiting for its right-hand operand
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PendingOperation {
    #[default]
    Idle,
    Pending {
        operator: Operator,
        left_operand: String,
    },
}

impl PendingOperation {
    pub fn operator(&self) -> Option<Operator> {
        match self {
            PendingOperation::Idle => None,
            PendingOperation::Pending { operator, .. } => Some(*operator),
        }
    }

    pub fn left_operand(&self) -> Option<&str> {
        match self {
            PendingOperation::Idle => None,
            PendingOperation::Pending { left_operand, .. } => Some(left_operand),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, PendingOperation::Pending { .. })
    }
}

/// One binary operation to be resolved by the remote service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    pub operator: Operator,
    pub operand1: String,
    pub operand2: String,
}

/// Entry plus pending operation
#[derive(Debug, Clone, Default)]
pub struct CalculatorModel {
    entry: Entry,
    pending: PendingOperation,
}

impl CalculatorModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_text(&self) -> &str {
        self.entry.text()
    }

    pub fn pending(&self) -> &PendingOperation {
        &self.pending
    }

    /// Append a digit or decimal point to the entry
    pub fn append(&mut self, ch: char) -> bool {
        self.entry.push(ch)
    }

    /// Capture the entry as the left operand of `operator`.
    ///
    /// A previously pending operation is collapsed locally first. When that
    /// leaves the error marker in the entry, the operator is not taken.
    pub fn choose_operator(&mut self, operator: Operator) -> bool {
        if self.pending.is_pending() {
            self.compute_local();
        }
        if self.entry.is_error() {
            tracing::debug!("Ignoring operator {operator} on error marker");
            return false;
        }
        let left_operand = self.entry.take();
        tracing::debug!("Pending {operator} with left operand {left_operand}");
        self.pending = PendingOperation::Pending {
            operator,
            left_operand,
        };
        true
    }

    /// Resolve the pending operation in-process and return to idle
    pub fn compute_local(&mut self) {
        let PendingOperation::Pending {
            operator,
            left_operand,
        } = std::mem::take(&mut self.pending)
        else {
            return;
        };

        let lhs = left_operand.parse::<f64>().ok();
        let rhs = self.entry.value();
        let result = match (lhs, rhs) {
            (Some(lhs), Some(rhs)) => operator.apply(lhs, rhs).and_then(format_number),
            _ => None,
        };

        match result {
            Some(text) => {
                tracing::debug!(
                    "Local {operator}: {left_operand} {} {} = {text}",
                    operator.symbol(),
                    self.entry.text()
                );
                self.entry.set_result(text);
            }
            None => {
                tracing::debug!("Local {operator} of {left_operand} failed");
                self.entry.set_error();
            }
        }
    }

    /// Consume the pending operation for a remote call.
    ///
    /// Returns `None` when no operator is pending. The right operand stays on
    /// the display, but the next digit starts a new entry.
    pub fn take_remote_request(&mut self) -> Option<OperationRequest> {
        let PendingOperation::Pending {
            operator,
            left_operand,
        } = std::mem::take(&mut self.pending)
        else {
            return None;
        };

        let request = OperationRequest {
            operator,
            operand1: left_operand,
            operand2: self.entry.text().to_string(),
        };
        self.entry.mark_consumed();
        Some(request)
    }

    pub fn toggle_sign(&mut self) -> bool {
        self.entry.toggle_sign()
    }

    pub fn percent(&mut self) -> bool {
        self.entry.percent()
    }

    pub fn set_result(&mut self, text: impl Into<String>) {
        self.entry.set_result(text);
    }

    pub fn set_error(&mut self) {
        self.entry.set_error();
    }

    /// Back to `"0"` with nothing pending
    pub fn clear(&mut self) {
        self.entry.reset();
        self.pending = PendingOperation::Idle;
    }
}
