//! # Services Layer
//!
//! Services encapsulate access to external resources so that the
//! controller only deals with calculator state and outcomes.

pub mod arithmetic;

pub use arithmetic::{
    ArithmeticService, ComputeMessage, RemoteOutcome, MISSING_REQUEST_ID, MISSING_RESULT_MESSAGE,
};
