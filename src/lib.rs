//! Hegemon engine library.
//!
//! Exposes the map representation, site valuation, tactical rankers,
//! turn driver, and host protocol modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod engine;
pub mod eval;
pub mod map;
pub mod protocol;
pub mod tactics;
