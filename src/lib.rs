//! REST load-test scenarios
//!
//! Declarative HTTP scenarios for the mirror node REST API, built on a small
//! harness: a fluent scenario builder, parameter bootstrap, named checks and
//! a runner for concurrent virtual users.

pub mod cli;
pub mod commands;
pub mod common;
pub mod rest;
pub mod scenario;

// Re-export commonly used types for tests
pub use common::{Config, Error, Result};
pub use scenario::{Scenario, TestParameters, TestScenarioBuilder};
