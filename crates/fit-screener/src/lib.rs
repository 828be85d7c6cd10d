//! Candidate fit screener.
//!
//! The [`screening`] module holds the pure scoring engine; [`config`], [`telemetry`] and
//! [`error`] provide the ambient service plumbing shared with the API binary.

pub mod config;
pub mod error;
pub mod screening;
pub mod telemetry;
