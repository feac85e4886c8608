//! Benchmark support for strata.
//!
//! Seeded synthetic vector sources and parameter types shared by the
//! Criterion benches for spanning tree construction, hierarchy extraction and
//! the end-to-end HDBSCAN pipeline.

pub mod error;
pub mod params;
pub mod source;
