//! Step definitions for Cucumber tests
//!
//! - `service` - mock arithmetic service setup and request checks
//! - `calculator` - key input, display and status line

pub mod calculator;
pub mod service;
