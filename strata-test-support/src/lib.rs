//! Shared test utilities used across strata crates.
//!
//! [`tracing::RecordingLayer`] captures spans and events so tests can assert
//! instrumentation, and [`ci::property_test_profile`] lets CI tune proptest
//! suites through the environment.

pub mod ci;
pub mod tracing;
