pub mod alertstate;
pub mod frame;

pub mod prelude {
    pub use crate::alertstate::{
        AlertState, AlertStateLogEntry, AlertStateQueryRequest, QueryResponse,
    };
    pub use crate::frame::{Field, FieldValue, Frame};
}
