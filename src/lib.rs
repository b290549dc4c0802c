//! Alerting historian.
//!
//! Facade over the workspace crates: shared primitives, wire types
//! (`protocol`) and the query service (`service`).

pub use historian_core::{config, identity, logging};
pub use historian_protocol as protocol;
pub use historian_service as service;

pub use historian_core::{CallerIdentity, HistorianError, RequestContext, SchemaError};
pub use historian_protocol::prelude::*;
pub use historian_service::{AlertStateHandlers, Historian, HistoryQuery};
