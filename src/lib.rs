//! # calcline - Terminal Calculator Backed by a Remote Arithmetic Service
//!
//! Digits, the decimal point, sign toggle and percent are handled locally.
//! Chained operators are collapsed locally too. The final "equals" is sent
//! to a remote HTTP service, whose result and correlation id are shown.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  KeyEvent  ┌─────────────────┐  CalculatorInput  ┌──────────────────────┐
//! │ EventStream  │───────────▶│ CommandRegistry │──────────────────▶│ CalculatorController │
//! └──────────────┘            └─────────────────┘                   │  - CalculatorModel   │
//!                                                                   │  - StatusLine        │
//! ┌──────────────┐  show_value / show_status                        │                      │
//! │ ViewRenderer │◀─────────────────────────────────────────────────│                      │
//! └──────────────┘                                                  └──────────┬───────────┘
//!                                                                   ticketed   │ GET /<op>?...
//!                                                                   messages   ▼
//!                                                                   ┌──────────────────────┐
//!                                                                   │  ArithmeticService   │
//!                                                                   └──────────────────────┘
//! ```

pub mod calc;
pub mod cmd_args;
pub mod config;

// Re-export main types for easy access
pub use calc::*;
