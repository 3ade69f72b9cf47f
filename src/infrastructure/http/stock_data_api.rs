use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{ApiResult, AppError};

/// One row of the downloaded-data summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSummaryRow {
    pub symbol: String,
    pub start_date: String,
    pub end_date: String,
    pub resolution: String,
    pub row_count: u64,
}

#[derive(Debug, Deserialize)]
struct SummaryEnvelope {
    #[serde(default)]
    data: Vec<StockSummaryRow>,
}

/// Encode summary rows for the wasm boundary; the data-management page UI
/// consumes them as a JSON array.
pub fn summary_to_json(rows: &[StockSummaryRow]) -> ApiResult<String> {
    serde_json::to_string(rows)
        .map_err(|e| AppError::Network(format!("Failed to encode stock summary: {e}")))
}

/// Payload for `POST /api/stocks/download`.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadRequest {
    pub symbols: Vec<String>,
    pub start_date: String,
    pub end_date: String,
    pub resolution: String,
}

/// Thin CRUD client for the stock data management endpoints.
#[derive(Debug, Clone, Default)]
pub struct StockDataApi {
    base: String,
}

impl StockDataApi {
    pub fn new() -> Self {
        Self { base: String::new() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn summary(&self) -> ApiResult<Vec<StockSummaryRow>> {
        let response = Request::get(&self.url("/api/stocks/summary"))
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Failed to fetch stock summary: {e}")))?;
        if !response.ok() {
            return Err(AppError::Network(format!("HTTP error: {}", response.status())));
        }
        let envelope: SummaryEnvelope = response
            .json()
            .await
            .map_err(|e| AppError::Network(format!("Failed to parse stock summary: {e}")))?;
        Ok(envelope.data)
    }

    pub async fn download(&self, request: &DownloadRequest) -> ApiResult<()> {
        let response = Request::post(&self.url("/api/stocks/download"))
            .json(request)
            .map_err(|e| AppError::Network(format!("Failed to encode download request: {e}")))?
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Failed to request download: {e}")))?;
        if !response.ok() {
            return Err(AppError::Network(format!("HTTP error: {}", response.status())));
        }
        Ok(())
    }

    pub async fn delete_symbol(&self, symbol: &str) -> ApiResult<()> {
        let response = Request::delete(&self.url(&format!("/api/data/delete/{symbol}")))
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Failed to delete data for {symbol}: {e}")))?;
        if !response.ok() {
            return Err(AppError::Network(format!("HTTP error: {}", response.status())));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_rows_parse_from_the_envelope() {
        let envelope: SummaryEnvelope = serde_json::from_value(json!({
            "data": [{
                "symbol": "AAPL",
                "start_date": "2024-01-01",
                "end_date": "2024-03-01",
                "resolution": "1d",
                "row_count": 42
            }]
        }))
        .expect("valid envelope");
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].symbol, "AAPL");
        assert_eq!(envelope.data[0].row_count, 42);
    }

    #[test]
    fn empty_envelope_defaults_to_no_rows() {
        let envelope: SummaryEnvelope = serde_json::from_value(json!({})).expect("valid envelope");
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn summary_rows_encode_as_a_json_array() {
        let rows = vec![StockSummaryRow {
            symbol: "AAPL".to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-03-01".to_string(),
            resolution: "1d".to_string(),
            row_count: 42,
        }];
        let json = summary_to_json(&rows).expect("encodable");
        let decoded: Vec<StockSummaryRow> = serde_json::from_str(&json).expect("round-trip");
        assert_eq!(decoded, rows);
        assert!(summary_to_json(&[]).expect("encodable").starts_with('['));
    }

    #[test]
    fn download_request_encodes_the_expected_shape() {
        let request = DownloadRequest {
            symbols: vec!["AAPL".to_string(), "MSFT".to_string()],
            start_date: "2024-01-01".to_string(),
            end_date: "2024-03-01".to_string(),
            resolution: "1h".to_string(),
        };
        let encoded = serde_json::to_value(&request).expect("encodable");
        assert_eq!(
            encoded,
            json!({
                "symbols": ["AAPL", "MSFT"],
                "start_date": "2024-01-01",
                "end_date": "2024-03-01",
                "resolution": "1h"
            })
        );
    }
}
