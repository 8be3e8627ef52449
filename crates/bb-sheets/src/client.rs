//! Google Sheets append client

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use bb_core::SheetsSettings;

use crate::error::{Result, SheetsError};

/// Range every booking row is appended under.
const APPEND_RANGE: &str = "Citas!A1";

/// The booking log collaborator. Append-only; no reads, no decisions.
#[async_trait]
pub trait BookingLog: Send + Sync {
    /// Append one row of cells.
    async fn append_row(&self, row: Vec<String>) -> Result<()>;
}

/// Log that drops every row. Used when no spreadsheet is configured.
pub struct NullLog;

#[async_trait]
impl BookingLog for NullLog {
    async fn append_row(&self, _row: Vec<String>) -> Result<()> {
        debug!("No spreadsheet configured, booking row dropped");
        Ok(())
    }
}

/// REST client for the Google Sheets values.append endpoint.
pub struct SheetsClient {
    client: Client,
    api_base: String,
    access_token: String,
    spreadsheet_id: String,
}

impl SheetsClient {
    /// Create a new client from sheet settings.
    pub fn new(settings: &SheetsSettings) -> Result<Self> {
        let spreadsheet_id = settings.spreadsheet_id.clone().ok_or_else(|| {
            SheetsError::Configuration("spreadsheet id is not set".to_string())
        })?;
        let access_token = settings.access_token.clone().ok_or_else(|| {
            SheetsError::Configuration("sheets access token is not set".to_string())
        })?;

        let client = Client::builder()
            .build()
            .map_err(|e| SheetsError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            access_token,
            spreadsheet_id,
        })
    }
}

#[derive(Serialize)]
struct AppendBody {
    values: Vec<Vec<String>>,
}

#[async_trait]
impl BookingLog for SheetsClient {
    async fn append_row(&self, row: Vec<String>) -> Result<()> {
        let url = format!(
            "{}/spreadsheets/{}/values/{}:append",
            self.api_base, self.spreadsheet_id, APPEND_RANGE
        );
        debug!("Appending booking row to {}", self.spreadsheet_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .query(&[("valueInputOption", "RAW")])
            .json(&AppendBody { values: vec![row] })
            .send()
            .await
            .map_err(|e| SheetsError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SheetsError::Status { status, message });
        }

        info!("Booking row appended to {}", self.spreadsheet_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_log_accepts_rows() {
        let log = NullLog;
        assert!(log.append_row(vec!["Ana".to_string()]).await.is_ok());
    }

    #[test]
    fn test_client_requires_configuration() {
        let settings = SheetsSettings::default();
        assert!(SheetsClient::new(&settings).is_err());

        let settings = SheetsSettings {
            spreadsheet_id: Some("sheet-id".to_string()),
            access_token: Some("token".to_string()),
            ..Default::default()
        };
        assert!(SheetsClient::new(&settings).is_ok());
    }
}
