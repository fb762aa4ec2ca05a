//! # Controllers Module
//!
//! [`CalculatorController`] owns calculator state and the remote handoff;
//! [`AppController`] drives it from a terminal event loop.

pub mod app_controller;
pub mod calculator_controller;

pub use app_controller::AppController;
pub use calculator_controller::CalculatorController;
