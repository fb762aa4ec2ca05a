//! # Calculator Front End
//!
//! Models hold the calculator state, the controller mutates it in response
//! to inputs and mirrors it onto the views, and the arithmetic service
//! resolves the final operation remotely.

pub mod commands;
pub mod controllers;
pub mod io;
pub mod models;
pub mod services;
pub mod views;

pub use commands::{CalculatorInput, CommandRegistry};
pub use controllers::{AppController, CalculatorController};
pub use models::{CalculatorModel, Operator, PendingOperation, StatusLine, ERROR_MARKER};
pub use services::{ArithmeticService, RemoteOutcome};
pub use views::{DisplaySurface, RecordingView, StatusSurface, TerminalRenderer, ViewRenderer};
