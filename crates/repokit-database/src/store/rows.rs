//! Decoding of untyped result rows.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

use repokit_core::result::StoreResult;
use repokit_core::types::RawRow;

/// Convert a row into a JSON object keyed by column name.
///
/// Dispatches on the storage class of each value, not the declared column
/// type, so expressions such as `COUNT(*)` decode as well.
pub(crate) fn to_raw_row(row: &SqliteRow) -> StoreResult<RawRow> {
    let mut out = RawRow::new();
    for (index, column) in row.columns().iter().enumerate() {
        let storage_class = {
            let raw = row.try_get_raw(index)?;
            if raw.is_null() {
                None
            } else {
                Some(raw.type_info().name().to_string())
            }
        };

        let value = match storage_class.as_deref() {
            None => serde_json::Value::Null,
            Some("INTEGER") => serde_json::Value::from(row.try_get::<i64, _>(index)?),
            Some("REAL") => serde_json::Value::from(row.try_get::<f64, _>(index)?),
            Some("BLOB") => {
                serde_json::Value::String(STANDARD.encode(row.try_get::<Vec<u8>, _>(index)?))
            }
            Some(_) => serde_json::Value::String(row.try_get::<String, _>(index)?),
        };
        out.insert(column.name().to_string(), value);
    }
    Ok(out)
}
