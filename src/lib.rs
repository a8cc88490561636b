//! mediadex - media catalog aggregation and daily trivia
//!
//! This library crate exposes the core functionality for integration testing.

pub mod catalog;
pub mod config;
pub mod server;
pub mod trivia;
