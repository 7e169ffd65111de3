use crate::types::{Field, SqlValue};

/// MySQL's `binary` collation id; text types carrying it hold raw bytes.
const BINARY_CHARSET: u32 = 63;

/// Default conversion of a raw column value, keyed on the server's type name.
pub fn cast(field: &Field, value: Option<&[u8]>) -> SqlValue {
    let Some(value) = value else {
        return SqlValue::Null;
    };

    match field.field_type.as_str() {
        "INT8" | "INT16" | "INT24" | "INT32" | "UINT8" | "UINT16" | "UINT24" | "UINT32"
        | "YEAR" => text(value)
            .parse()
            .map(SqlValue::Int)
            .unwrap_or_else(|_| SqlValue::Text(text(value))),
        "FLOAT32" | "FLOAT64" => text(value)
            .parse()
            .map(SqlValue::Float)
            .unwrap_or_else(|_| SqlValue::Text(text(value))),
        // Values that do not fit a double are kept as text.
        "DECIMAL" | "INT64" | "UINT64" | "DATE" | "TIME" | "DATETIME" | "TIMESTAMP" => {
            SqlValue::Text(text(value))
        }
        "BIT" | "GEOMETRY" => SqlValue::Bytes(value.to_vec()),
        "BLOB" | "BINARY" | "VARBINARY" if is_binary(field) => SqlValue::Bytes(value.to_vec()),
        "JSON" => serde_json::from_slice(value)
            .map(SqlValue::Json)
            .unwrap_or_else(|_| SqlValue::Text(text(value))),
        _ => SqlValue::Text(text(value)),
    }
}

fn is_binary(field: &Field) -> bool {
    field.charset.map_or(true, |charset| charset == BINARY_CHARSET)
}

fn text(value: &[u8]) -> String {
    String::from_utf8_lossy(value).into_owned()
}
