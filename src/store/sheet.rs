/// Worksheet service client, the live-mode backend.
///
/// Talks to the shared worksheet service over HTTP/JSON:
///
///   GET  {base_url}/worksheets/{name}   -> { "columns": [...], "rows": [[...]] }
///   PUT  {base_url}/worksheets/{name}   with the same payload shape,
///                                          replacing the worksheet wholesale
///
/// Authentication is a bearer token read from the `LARVALOG_SHEET_TOKEN`
/// environment variable (loaded from `.env` at startup). The service has no
/// row-append or version primitive; replace-all is the only write.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::logging::Source;
use crate::model::{StoreError, Table, CANONICAL_COLUMNS};
use crate::store::{decode_rows, encode_row, verify_header, RecordStore};

/// Environment variable holding the worksheet service bearer token.
pub const SHEET_TOKEN_VAR: &str = "LARVALOG_SHEET_TOKEN";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Wire payload
// ---------------------------------------------------------------------------

/// The worksheet payload as the service sends and receives it.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct WorksheetPayload {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct SheetStore {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl SheetStore {
    /// Builds a client for the given service base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> SheetStore {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        SheetStore {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// URL for one named worksheet.
    pub fn worksheet_url(&self, worksheet: &str) -> String {
        format!("{}/worksheets/{}", self.base_url, worksheet)
    }

    fn bearer_token() -> Option<String> {
        std::env::var(SHEET_TOKEN_VAR).ok().filter(|t| !t.is_empty())
    }

    fn authorize(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match Self::bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl RecordStore for SheetStore {
    fn fetch_all(&self, worksheet: &str) -> Result<Table, StoreError> {
        let url = self.worksheet_url(worksheet);
        let response = self
            .authorize(self.client.get(&url))
            .header("Accept", "application/json")
            .send()
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::ReadFailed(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let payload: WorksheetPayload = response
            .json()
            .map_err(|e| StoreError::ReadFailed(format!("bad payload: {}", e)))?;
        verify_header(&payload.columns)?;

        // The service counts the header as line 1, matching the CSV layout.
        Ok(decode_rows(Source::Sheet, worksheet, 2, &payload.rows))
    }

    fn replace_all(&self, worksheet: &str, table: &Table) -> Result<(), StoreError> {
        let url = self.worksheet_url(worksheet);
        let payload = WorksheetPayload {
            columns: CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: table.iter().map(encode_row).collect(),
        };

        let response = self
            .authorize(self.client.put(&url))
            .json(&payload)
            .send()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::WriteFailed(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }
        Ok(())
    }

    fn source(&self) -> Source {
        Source::Sheet
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
