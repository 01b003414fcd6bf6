//! Railway-bridge referential: types and HTTP client.
//!
//! The bridges API is a separate collaborator from Hub'Eau: a single
//! parameterless endpoint returning every bridge as a JSON array of
//! `{ lat, lon, name?, bridge_id? }`. Records without finite coordinates
//! are skipped at ingestion and never become markers.

use serde::Serialize;
use serde_json::Value;

/// Default bridges endpoint of the local referential service.
pub const BRIDGES_BASE_URL: &str = "http://127.0.0.1:8000/api/bridges/";

/// Errors that can occur when fetching the bridge list.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum FetchError {
    HttpRequestError,
    HttpStatusError,
    HttpResponseParseError,
}

/// A bridge with usable coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bridge {
    pub bridge_id: Option<String>,
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl Bridge {
    /// Normalize a raw bridge record; `None` when either coordinate is
    /// missing or non-finite.
    pub fn from_value(record: &Value) -> Option<Bridge> {
        let lat = finite_number(record.get("lat")?)?;
        let lon = finite_number(record.get("lon")?)?;
        Some(Bridge {
            bridge_id: string_field(record, "bridge_id"),
            name: string_field(record, "name"),
            lat,
            lon,
        })
    }

    /// Tooltip label: the name, falling back to the id.
    pub fn display_label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.bridge_id.as_deref())
            .unwrap_or("Bridge")
    }
}

/// Client for the bridges referential endpoint.
#[derive(Debug, Clone)]
pub struct BridgesClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for BridgesClient {
    fn default() -> Self {
        Self::new()
    }
}

impl BridgesClient {
    pub fn new() -> Self {
        Self::with_base_url(BRIDGES_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch every bridge, dropping records without usable coordinates.
    pub async fn list(&self) -> Result<Vec<Bridge>, FetchError> {
        let response = self.client.get(&self.base_url).send().await.map_err(|e| {
            log::warn!("bridges request failed: {e}");
            FetchError::HttpRequestError
        })?;
        if !response.status().is_success() {
            log::warn!("bridges endpoint returned {}", response.status());
            return Err(FetchError::HttpStatusError);
        }
        let records = response
            .json::<Vec<Value>>()
            .await
            .map_err(|_| FetchError::HttpResponseParseError)?;
        Ok(records.iter().filter_map(Bridge::from_value).collect())
    }
}

fn string_field(record: &Value, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn finite_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bridge_from_full_record() {
        let record = json!({
            "bridge_id": "PT-017",
            "name": "Pont du Var",
            "lat": 43.66,
            "lon": 7.2,
        });
        let bridge = Bridge::from_value(&record).unwrap();
        assert_eq!(bridge.display_label(), "Pont du Var");
        assert_eq!(bridge.lat, 43.66);
        assert_eq!(bridge.lon, 7.2);
    }

    #[test]
    fn test_records_without_coordinates_are_skipped() {
        assert_eq!(Bridge::from_value(&json!({ "bridge_id": "PT-018" })), None);
        assert_eq!(
            Bridge::from_value(&json!({ "bridge_id": "PT-019", "lat": 43.7, "lon": "n/a" })),
            None
        );
    }

    #[test]
    fn test_label_falls_back_to_id() {
        let record = json!({ "bridge_id": "PT-020", "lat": 43.7, "lon": 7.3 });
        assert_eq!(Bridge::from_value(&record).unwrap().display_label(), "PT-020");
    }
}
