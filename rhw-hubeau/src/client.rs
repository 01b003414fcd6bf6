//! HTTP client for the Hub'Eau hydrométrie endpoints.
//!
//! On `wasm32-unknown-unknown` the `reqwest` client compiles down to the
//! browser fetch API, so the same client serves the dashboard and native
//! tests. Failures surface as a [`FetchError`] result; callers translate
//! them into placeholder display states, never uncaught errors.

use serde::Deserialize;
use serde_json::Value;

use crate::date_range::observation_window;
use crate::observation::{ElaboratedKind, RawObservation};
use crate::station::{resolve_entity_code, BoundingBox};

/// Public Hub'Eau hydrometry v2 base URL.
pub const HUBEAU_BASE_URL: &str = "https://hubeau.eaufrance.fr/api/v2/hydrometrie";

/// Page cap for observation queries; one page covers a full window.
pub const OBSERVATION_PAGE_SIZE: &str = "20000";

/// Errors that can occur when fetching from the API.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum FetchError {
    HttpRequestError,
    HttpStatusError,
    HttpResponseParseError,
}

/// One page of the stations referential. Records stay raw JSON until
/// [`crate::Station::from_value`] normalizes them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationPage {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub data: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    data: Vec<RawObservation>,
}

/// Client over the stations referential and observation endpoints.
#[derive(Debug, Clone)]
pub struct HubeauClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for HubeauClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HubeauClient {
    pub fn new() -> Self {
        Self::with_base_url(HUBEAU_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// List stations within a bounding box, capped at `size` records.
    ///
    /// Issues exactly one request; the referential for a map viewport fits
    /// in one page and we do not paginate further.
    pub async fn list_stations(
        &self,
        bbox: &BoundingBox,
        size: u32,
    ) -> Result<StationPage, FetchError> {
        let url = format!("{}/referentiel/stations", self.base_url);
        let params = [("bbox", bbox.to_query()), ("size", size.to_string())];
        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                log::warn!("stations referential request failed: {e}");
                FetchError::HttpRequestError
            })?;
        if !response.status().is_success() {
            log::warn!("stations referential returned {}", response.status());
            return Err(FetchError::HttpStatusError);
        }
        response
            .json::<StationPage>()
            .await
            .map_err(|_| FetchError::HttpResponseParseError)
    }

    /// Real-time observations (H and Q) for a station over the last
    /// `window_days` days, ascending.
    pub async fn recent_observations(
        &self,
        code_station: &str,
        code_site: Option<&str>,
        window_days: i64,
    ) -> Result<Vec<RawObservation>, FetchError> {
        let code_entite = resolve_entity_code(code_station, code_site);
        let (from, to) = observation_window(window_days);
        let url = format!("{}/observations_tr", self.base_url);
        self.fetch_rows(&url, realtime_params(&code_entite, &from, &to))
            .await
    }

    /// Elaborated (pre-aggregated) series for a station.
    ///
    /// Fallback for stations whose real-time series comes back empty; the
    /// chart does not invoke it automatically.
    pub async fn elaborated_series(
        &self,
        code_station: &str,
        kind: ElaboratedKind,
        window_days: i64,
        code_site: Option<&str>,
    ) -> Result<Vec<RawObservation>, FetchError> {
        let code_entite = resolve_entity_code(code_station, code_site);
        let (from, to) = observation_window(window_days);
        let url = format!("{}/obs_elab", self.base_url);
        self.fetch_rows(&url, elaborated_params(&code_entite, kind, &from, &to))
            .await
    }

    async fn fetch_rows(
        &self,
        url: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<Vec<RawObservation>, FetchError> {
        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                log::warn!("observations request failed: {e}");
                FetchError::HttpRequestError
            })?;
        if !response.status().is_success() {
            log::warn!("observations endpoint returned {}", response.status());
            return Err(FetchError::HttpStatusError);
        }
        let body = response
            .json::<ObservationsResponse>()
            .await
            .map_err(|_| FetchError::HttpResponseParseError)?;
        Ok(body.data)
    }
}

fn realtime_params(code_entite: &str, from: &str, to: &str) -> Vec<(&'static str, String)> {
    vec![
        ("code_entite", code_entite.to_string()),
        ("grandeur_hydro", "H,Q".to_string()),
        ("date_debut_obs", from.to_string()),
        ("date_fin_obs", to.to_string()),
        ("size", OBSERVATION_PAGE_SIZE.to_string()),
        ("sort", "asc".to_string()),
    ]
}

fn elaborated_params(
    code_entite: &str,
    kind: ElaboratedKind,
    from: &str,
    to: &str,
) -> Vec<(&'static str, String)> {
    vec![
        ("code_entite", code_entite.to_string()),
        ("type_observation", kind.api_tag().to_string()),
        ("date_debut_obs", from.to_string()),
        ("date_fin_obs", to.to_string()),
        ("size", OBSERVATION_PAGE_SIZE.to_string()),
        ("sort", "asc".to_string()),
    ]
}

#[cfg(test)]
mod test {
    use super::*;

    // Trimmed from a live referential response.
    const STATION_PAGE_JSON: &str = r#"{
        "count": 2,
        "data": [
            {"code_station":"Y123456701","libelle_station":"Le Var à Nice",
             "latitude":43.7,"longitude":7.25,"en_service":true},
            {"code_station":"Y765432101","latitude":"bogus","longitude":7.1}
        ]
    }"#;

    #[test]
    fn test_station_page_deserializes() {
        let page: StationPage = serde_json::from_str(STATION_PAGE_JSON).unwrap();
        assert_eq!(page.count, 2);
        assert_eq!(page.data.len(), 2);
    }

    #[test]
    fn test_missing_data_field_is_empty() {
        let page: StationPage = serde_json::from_str("{}").unwrap();
        assert_eq!(page.count, 0);
        assert!(page.data.is_empty());

        let obs: ObservationsResponse = serde_json::from_str("{}").unwrap();
        assert!(obs.data.is_empty());
    }

    #[test]
    fn test_realtime_params() {
        let params = realtime_params("K123407", "2026-07-30", "2026-08-06");
        assert_eq!(
            params,
            vec![
                ("code_entite", "K123407".to_string()),
                ("grandeur_hydro", "H,Q".to_string()),
                ("date_debut_obs", "2026-07-30".to_string()),
                ("date_fin_obs", "2026-08-06".to_string()),
                ("size", "20000".to_string()),
                ("sort", "asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_elaborated_params_swap_grandeur_for_type() {
        let params = elaborated_params(
            "Y123456701",
            ElaboratedKind::DailyMeanDischarge,
            "2025-08-06",
            "2026-08-06",
        );
        assert!(params.contains(&("type_observation", "QmnJ".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "grandeur_hydro"));
    }
}
