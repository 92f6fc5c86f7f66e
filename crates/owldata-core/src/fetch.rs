//! The fetch-JSON-to-table primitive shared by every data endpoint.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::auth::Credential;
use crate::http_client::{status_message, HttpClient, HttpRequest};
use crate::{FetchError, Table};

/// Wire shape of a data endpoint response.
#[derive(Debug, Deserialize)]
struct TablePayload {
    #[serde(rename = "Data", default)]
    data: Option<Vec<Vec<Value>>>,
    #[serde(rename = "Title", default)]
    title: Option<Vec<String>>,
}

/// Decodes a `{"Data": [[...]], "Title": [...]}` body.
pub fn parse_table(body: &str) -> Result<Table, FetchError> {
    let payload: TablePayload =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    let columns = payload.title.unwrap_or_default();
    let data = payload.data.unwrap_or_default();
    Table::from_json_rows(columns, data).map_err(|e| FetchError::Decode(e.to_string()))
}

/// GETs `url` with the session's bearer token and decodes the table.
pub async fn fetch_table(
    http: &dyn HttpClient,
    url: &str,
    credential: &Credential,
    timeout_ms: u64,
) -> Result<Table, FetchError> {
    debug!(url, "fetching table");
    let request = HttpRequest::get(url)
        .with_auth(&credential.bearer())
        .with_timeout_ms(timeout_ms);

    let response = http
        .execute(request)
        .await
        .map_err(|e| FetchError::Transport(e.message().to_owned()))?;

    if !response.is_ok() {
        warn!(url, status = response.status, "data request failed");
        return Err(match status_message(response.status) {
            Some(message) => FetchError::Status {
                status: response.status,
                message,
            },
            None => FetchError::UnexpectedStatus {
                status: response.status,
            },
        });
    }

    let table = parse_table(&response.body)?;
    debug!(url, rows = table.len(), "fetched table");
    Ok(table)
}
