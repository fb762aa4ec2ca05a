//! # Models
//!
//! Calculator state with no knowledge of rendering or networking.

pub mod calculator_model;
pub mod entry;
pub mod operator;
pub mod status_line;

pub use calculator_model::{CalculatorModel, OperationRequest, PendingOperation};
pub use entry::{format_number, Entry, ERROR_MARKER};
pub use operator::Operator;
pub use status_line::StatusLine;
