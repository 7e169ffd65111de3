use serde::Deserialize;

/// Column metadata reported alongside a result.
///
/// `field_type` carries the server's type name, e.g. `INT64`, `VARCHAR` or `DATETIME`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type", default = "null_type")]
    pub field_type: String,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub org_table: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub org_name: Option<String>,
    #[serde(default)]
    pub column_length: Option<u32>,
    #[serde(default)]
    pub charset: Option<u32>,
    #[serde(default)]
    pub flags: Option<u32>,
}

// protojson omits enum fields holding their zero value
fn null_type() -> String {
    "NULL_TYPE".to_string()
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            table: None,
            org_table: None,
            database: None,
            org_name: None,
            column_length: None,
            charset: None,
            flags: None,
        }
    }
}
