use historian_core::SchemaError;
use historian_protocol::alertstate::{AlertStateLogEntry, QueryResponse};
use historian_protocol::frame::{FieldValue, Frame};

pub const LINE_FIELD: &str = "Line";
pub const TIME_FIELD: &str = "Time";

/// Projects the engine's frame into log entries, one per row, in row order.
///
/// A frame without rows is the "no history" outcome and is accepted even
/// when it has no fields at all. Otherwise the `Line` and `Time` fields must
/// exist and every cell must carry the expected type; the first violation
/// fails the whole projection.
pub fn project_frame(frame: &Frame) -> Result<QueryResponse, SchemaError> {
    let rows = frame.rows();
    let mut response = QueryResponse::with_capacity(rows);

    if rows == 0 {
        return Ok(response);
    }

    let line_idx = frame
        .field_by_name(LINE_FIELD)
        .ok_or(SchemaError::MissingLineField)?;
    let time_idx = frame
        .field_by_name(TIME_FIELD)
        .ok_or(SchemaError::MissingTimeField)?;

    for row in 0..rows {
        let time_cell = frame.at(time_idx, row);
        let timestamp = time_cell
            .and_then(FieldValue::as_time)
            .ok_or_else(|| SchemaError::TimeFieldType {
                row,
                found: cell_type(time_cell),
            })?;
        let line_cell = frame.at(line_idx, row);
        let line = line_cell
            .and_then(FieldValue::as_str)
            .ok_or_else(|| SchemaError::LineFieldType {
                row,
                found: cell_type(line_cell),
            })?;

        response.entries.push(AlertStateLogEntry {
            timestamp: unix_nanos(timestamp),
            line: line.to_string(),
        });
    }

    Ok(response)
}

fn cell_type(cell: Option<&FieldValue>) -> &'static str {
    cell.map(FieldValue::type_name).unwrap_or("missing")
}

// Outside roughly 1677..2262 nanoseconds overflow i64; clamp like a saturating cast.
fn unix_nanos(timestamp: &chrono::DateTime<chrono::Utc>) -> i64 {
    timestamp.timestamp_nanos_opt().unwrap_or_else(|| {
        if timestamp.timestamp() < 0 {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}
