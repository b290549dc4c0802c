mod field;
mod value;

pub use field::{Field, Frame};
pub use value::FieldValue;
