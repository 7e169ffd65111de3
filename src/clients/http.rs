use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use reqwest::StatusCode;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::clients::cast::cast as default_cast;
use crate::clients::format::format as default_format;
use crate::clients::ClientConfig;
use crate::error::{DatabaseError, DialectError, Result};
use crate::traits::{Execute, ServerlessClient};
use crate::types::{ExecutedQuery, Field, Row, SqlValue};

const EXECUTE_PATH: &str = "/psdb.v1alpha1.Database/Execute";
const USER_AGENT: &str = concat!("planetscale-dialect-rs/", env!("CARGO_PKG_VERSION"));

/// Client for PlanetScale's HTTP API.
///
/// `execute` runs every statement on its own short-lived connection. Use
/// `connection()` when statements must share a session, e.g. a transaction.
pub struct HttpClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn new_connection(&self) -> HttpConnection {
        HttpConnection {
            config: self.config.clone(),
            http: self.http.clone(),
            session: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Execute for HttpClient {
    async fn execute(&self, query: &str, args: &[SqlValue]) -> Result<ExecutedQuery> {
        self.new_connection().execute(query, args).await
    }
}

impl ServerlessClient for HttpClient {
    fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn connection(&self) -> Arc<dyn Execute> {
        Arc::new(self.new_connection())
    }
}

/// One session on the HTTP API. Session state returned by the server is sent
/// back with the next statement, so statements on a connection run in order.
pub struct HttpConnection {
    config: ClientConfig,
    http: reqwest::Client,
    session: Mutex<Option<JsonValue>>,
}

#[derive(Serialize)]
struct ExecuteRequest<'a> {
    query: &'a str,
    session: Option<&'a JsonValue>,
}

#[derive(Deserialize)]
struct ExecuteResponse {
    #[serde(default)]
    session: Option<JsonValue>,
    #[serde(default)]
    result: Option<WireResult>,
    #[serde(default)]
    error: Option<DatabaseError>,
    /// Seconds
    #[serde(default)]
    timing: Option<f64>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct WireResult {
    #[serde(default)]
    fields: Vec<Field>,
    #[serde(default)]
    rows: Vec<WireRow>,
    #[serde(default)]
    rows_affected: Option<WireInt>,
    #[serde(default)]
    insert_id: Option<WireInt>,
}

/// protojson encodes 64-bit integers as strings; accept plain numbers as well.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireInt {
    Text(String),
    Number(u64),
    Signed(i64),
}

impl WireInt {
    fn into_string(self) -> String {
        match self {
            WireInt::Text(s) => s,
            WireInt::Number(n) => n.to_string(),
            WireInt::Signed(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct WireRow {
    #[serde(default)]
    lengths: Vec<WireInt>,
    #[serde(default)]
    values: Option<String>,
}

#[async_trait]
impl Execute for HttpConnection {
    async fn execute(&self, query: &str, args: &[SqlValue]) -> Result<ExecutedQuery> {
        let endpoint = self.config.endpoint()?;
        let sql = if args.is_empty() {
            query.to_string()
        } else {
            match self.config.format {
                Some(ref format) => format(query, args),
                None => default_format(query, args),
            }
        };

        let mut session = self.session.lock().await;
        trace!(host = %endpoint.host, sql = %sql, "sending statement");

        let mut request = self
            .http
            .post(execute_url(&endpoint.host))
            .basic_auth(&endpoint.username, Some(&endpoint.password))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .json(&ExecuteRequest {
                query: &sql,
                session: session.as_ref(),
            });
        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body).into());
        }

        let body: ExecuteResponse = response.json().await?;
        apply_response(&mut session, body, &self.config)
    }
}

/// Endpoint for `host`; hosts given with a scheme (e.g. a local proxy) keep it.
fn execute_url(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        format!("{}{}", host.trim_end_matches('/'), EXECUTE_PATH)
    } else {
        format!("https://{host}{EXECUTE_PATH}")
    }
}

/// Error for a non-2xx response. The body is usually a JSON `{message, code}`.
fn status_error(status: StatusCode, body: String) -> DatabaseError {
    serde_json::from_str::<DatabaseError>(&body)
        .unwrap_or_else(|_| DatabaseError::new(body, status.as_u16().to_string()))
}

/// Stores the returned session, even when the statement failed, then decodes the result.
fn apply_response(
    session: &mut Option<JsonValue>,
    body: ExecuteResponse,
    config: &ClientConfig,
) -> Result<ExecutedQuery> {
    *session = body.session;
    if let Some(error) = body.error {
        debug!(error = %error, "statement failed");
        return Err(error.into());
    }

    let timing = body.timing.unwrap_or_default();
    decode_result(body.result.unwrap_or_default(), timing, config)
}

fn decode_result(result: WireResult, timing: f64, config: &ClientConfig) -> Result<ExecutedQuery> {
    let columns: Arc<[String]> = result.fields.iter().map(|f| f.name.clone()).collect();
    let rows = result
        .rows
        .into_iter()
        .map(|row| decode_row(row, &result.fields, Arc::clone(&columns), config))
        .collect::<Result<Vec<_>>>()?;

    let rows_affected = match result.rows_affected.map(WireInt::into_string) {
        Some(n) => n
            .parse()
            .map_err(|_| DialectError::Decode(format!("invalid rowsAffected: {n}")))?,
        None => 0,
    };

    Ok(ExecutedQuery {
        fields: result.fields,
        rows,
        rows_affected: Some(rows_affected),
        insert_id: Some(
            result
                .insert_id
                .map(WireInt::into_string)
                .unwrap_or_else(|| "0".to_string()),
        ),
        time: timing * 1000.0,
        error: None,
    })
}

/// Splits the concatenated row payload using the per-column lengths; `-1` is NULL.
fn decode_row(
    row: WireRow,
    fields: &[Field],
    columns: Arc<[String]>,
    config: &ClientConfig,
) -> Result<Row> {
    let payload = BASE64
        .decode(row.values.unwrap_or_default())
        .map_err(|e| DialectError::Decode(format!("invalid row payload: {e}")))?;

    if row.lengths.len() != fields.len() {
        return Err(DialectError::Decode(format!(
            "row has {} column lengths for {} fields",
            row.lengths.len(),
            fields.len()
        )));
    }

    let mut offset = 0usize;
    let mut values = Vec::with_capacity(fields.len());
    for (field, length) in fields.iter().zip(row.lengths) {
        let length = length.into_string();
        let length: i64 = length
            .parse()
            .map_err(|_| DialectError::Decode(format!("invalid column length: {length}")))?;

        let raw = if length < 0 {
            None
        } else {
            let end = offset + length as usize;
            let bytes = payload.get(offset..end).ok_or_else(|| {
                DialectError::Decode(format!("row payload too short for column {}", field.name))
            })?;
            offset = end;
            Some(bytes)
        };

        values.push(match config.cast {
            Some(ref cast) => cast(field, raw),
            None => default_cast(field, raw),
        });
    }

    Ok(Row::new(columns, values))
}
