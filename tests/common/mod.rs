//! Shared cucumber world for the integration tests

pub mod world;

pub use world::CalclineWorld;
