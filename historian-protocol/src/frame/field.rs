use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FieldValue;

/// Named column of a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub values: Vec<FieldValue>,
}

impl Field {
    pub fn new(name: impl Into<String>, values: Vec<FieldValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn times<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        Self::new(name, values.into_iter().map(FieldValue::Time).collect())
    }

    pub fn strings<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            values
                .into_iter()
                .map(|value| FieldValue::String(value.into()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Column-oriented result set returned by the historian engine.
///
/// Cells are addressed by `(field index, row)` and only carry their type at
/// read time. Nothing here checks that all fields have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Frame {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Row count, taken from the first field.
    pub fn rows(&self) -> usize {
        self.fields.first().map(Field::len).unwrap_or(0)
    }

    /// Index of the first field called `name`.
    pub fn field_by_name(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    pub fn at(&self, field_idx: usize, row: usize) -> Option<&FieldValue> {
        self.fields
            .get(field_idx)
            .and_then(|field| field.values.get(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_frame_has_no_rows() {
        assert_eq!(Frame::new("empty").rows(), 0);
    }

    #[test]
    fn looks_up_fields_by_name() {
        let frame = Frame::new("test")
            .with_field(Field::strings("Line", ["a", "b"]))
            .with_field(Field::new("Count", vec![1i64.into(), 2i64.into()]));

        assert_eq!(frame.rows(), 2);
        assert_eq!(frame.field_by_name("Count"), Some(1));
        assert_eq!(frame.field_by_name("Time"), None);
        assert_eq!(frame.at(0, 1).and_then(FieldValue::as_str), Some("b"));
        assert!(frame.at(0, 2).is_none());
        assert!(frame.at(5, 0).is_none());
    }
}
