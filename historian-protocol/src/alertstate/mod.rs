mod request;
mod response;

pub use request::{AlertState, AlertStateQueryRequest};
pub use response::{AlertStateLogEntry, QueryResponse};
