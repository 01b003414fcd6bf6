//! Observation rows and the measured-quantity taxonomy.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The physical quantity a row measures: water height or discharge.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Grandeur {
    /// Water height, charted in meters.
    H,
    /// Discharge, charted in cubic meters per second.
    Q,
}

impl Grandeur {
    pub fn parse(tag: &str) -> Option<Grandeur> {
        match tag {
            "H" => Some(Grandeur::H),
            "Q" => Some(Grandeur::Q),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grandeur::H => "H",
            Grandeur::Q => "Q",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Grandeur::H => "m",
            Grandeur::Q => "m³/s",
        }
    }

    /// Y-axis label for the chart.
    pub fn axis_label(&self) -> &'static str {
        match self {
            Grandeur::H => "Water height (m)",
            Grandeur::Q => "Discharge (m³/s)",
        }
    }
}

/// Pre-aggregated series kinds served by the elaborated-observations
/// endpoint, used as a fallback when the real-time series is empty.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ElaboratedKind {
    /// Daily mean discharge (m³/s).
    DailyMeanDischarge,
    /// Daily max instantaneous height.
    DailyMaxHeight,
    /// Monthly mean discharge.
    MonthlyMeanDischarge,
    /// Monthly max instantaneous height.
    MonthlyMaxHeight,
}

impl ElaboratedKind {
    /// The `type_observation` tag the API expects.
    pub fn api_tag(&self) -> &'static str {
        match self {
            ElaboratedKind::DailyMeanDischarge => "QmnJ",
            ElaboratedKind::DailyMaxHeight => "HIXnJ",
            ElaboratedKind::MonthlyMeanDischarge => "QmM",
            ElaboratedKind::MonthlyMaxHeight => "HIXM",
        }
    }
}

/// One observation row as the API sends it.
///
/// Every field is optional: rows routinely omit the station code (carrying
/// only the site code) and the result arrives as either a number or a
/// string. Usability is decided downstream, row by row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawObservation {
    #[serde(default)]
    pub code_station: Option<String>,
    #[serde(default)]
    pub code_site: Option<String>,
    #[serde(default)]
    pub grandeur_hydro: Option<String>,
    #[serde(default)]
    pub date_obs: Option<String>,
    #[serde(default)]
    pub resultat_obs: Option<Value>,
}

impl RawObservation {
    pub fn grandeur(&self) -> Option<Grandeur> {
        self.grandeur_hydro.as_deref().and_then(Grandeur::parse)
    }

    /// The result value, if it parses to a finite number.
    pub fn finite_result(&self) -> Option<f64> {
        let parsed = match self.resultat_obs.as_ref()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|n| n.is_finite())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // https://hubeau.eaufrance.fr/api/v2/hydrometrie/observations_tr?code_entite=Y123456701&grandeur_hydro=H,Q
    const ROWS_JSON: &str = r#"[
        {"code_station":"Y123456701","code_site":"Y1234567","grandeur_hydro":"H",
         "date_obs":"2026-08-01T06:00:00Z","resultat_obs":142.0},
        {"code_site":"Y1234567","grandeur_hydro":"Q",
         "date_obs":"2026-08-01T06:00:00Z","resultat_obs":"3.4"},
        {"code_station":"Y123456701","grandeur_hydro":"H",
         "date_obs":"2026-08-01T06:30:00Z","resultat_obs":"---"}
    ]"#;

    #[test]
    fn test_rows_deserialize_loosely() {
        let rows: Vec<RawObservation> = serde_json::from_str(ROWS_JSON).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].grandeur(), Some(Grandeur::H));
        assert_eq!(rows[0].finite_result(), Some(142.0));
        // Station code missing, site code present, string-typed result.
        assert_eq!(rows[1].code_station, None);
        assert_eq!(rows[1].finite_result(), Some(3.4));
        // Placeholder result does not parse.
        assert_eq!(rows[2].finite_result(), None);
    }

    #[test]
    fn test_unknown_grandeur_is_none() {
        let row = RawObservation {
            grandeur_hydro: Some("QmnJ".to_string()),
            ..Default::default()
        };
        assert_eq!(row.grandeur(), None);
    }

    #[test]
    fn test_elaborated_api_tags() {
        assert_eq!(ElaboratedKind::DailyMeanDischarge.api_tag(), "QmnJ");
        assert_eq!(ElaboratedKind::DailyMaxHeight.api_tag(), "HIXnJ");
        assert_eq!(ElaboratedKind::MonthlyMeanDischarge.api_tag(), "QmM");
        assert_eq!(ElaboratedKind::MonthlyMaxHeight.api_tag(), "HIXM");
    }

    #[test]
    fn test_axis_labels() {
        assert_eq!(Grandeur::H.axis_label(), "Water height (m)");
        assert_eq!(Grandeur::Q.axis_label(), "Discharge (m³/s)");
    }
}
