//! Core shared library for the alerting historian.
//!
//! Holds the primitives the service crate depends on: the error taxonomy,
//! configuration loading, tracing setup and the caller identity attached to
//! every request.

pub mod config;
pub mod errors;
pub mod identity;
pub mod logging;

pub use errors::{HistorianError, SchemaError};
pub use identity::{CallerIdentity, RequestContext};
