//! Hydrometric station records and the referential query shapes.
//!
//! The referential endpoint returns station records whose field names vary
//! between API revisions (coordinates under `latitude`, `lat`, `y`, nested
//! `coordonnees`, ...). Normalization happens once, here, against an
//! enumerated alias allow-list; the rest of the workspace only ever sees
//! the canonical [`Station`].

use serde::Serialize;
use serde_json::Value;

/// Known aliases for the latitude of a station record.
const LATITUDE_ALIASES: &[&str] = &["latitude", "lat", "y", "Y", "latitude_station"];

/// Known aliases for the longitude of a station record.
const LONGITUDE_ALIASES: &[&str] = &["longitude", "lon", "x", "X", "longitude_station"];

/// Known aliases for the station code of a station record.
const CODE_ALIASES: &[&str] = &[
    "code_station",
    "codeStation",
    "code_station_hydro",
    "codeStationHydro",
    "cd_station_hydro",
    "code_entite_hydro",
    "codeEntiteHydro",
];

/// Nested coordinate object key, holding `lat`/`lon` members.
const NESTED_COORDINATES_KEY: &str = "coordonnees";

/// A hydrometric measurement station with canonicalized fields.
///
/// Only constructed through [`Station::from_value`], which guarantees the
/// coordinates are finite and a station code is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub code_station: String,
    pub code_site: Option<String>,
    pub libelle: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub operational: bool,
}

impl Station {
    /// Normalize a raw referential record into a `Station`.
    ///
    /// Returns `None` when no station code alias resolves or when either
    /// coordinate is missing or non-finite; such records never become map
    /// markers.
    pub fn from_value(record: &Value) -> Option<Station> {
        let code_station = string_alias(record, CODE_ALIASES)?;
        let latitude = coordinate_alias(record, LATITUDE_ALIASES, "lat")?;
        let longitude = coordinate_alias(record, LONGITUDE_ALIASES, "lon")?;

        Some(Station {
            code_station,
            code_site: string_field(record, "code_site"),
            libelle: string_field(record, "libelle_station")
                .or_else(|| string_field(record, "libelle")),
            latitude,
            longitude,
            operational: operational_status(record),
        })
    }

    /// Label shown in tooltips and the detail panel.
    pub fn display_label(&self) -> &str {
        self.libelle.as_deref().unwrap_or(&self.code_station)
    }
}

/// Build the entity code used by the observation endpoints.
///
/// Short 2-character station codes are ambiguous without their parent site
/// prefix, so the site code is prepended when available. A 2-character code
/// with no site code degrades to the bare, ambiguous code — upstream
/// behavior for that case is unspecified, and we deliberately pass it
/// through unchanged.
pub fn resolve_entity_code(code_station: &str, code_site: Option<&str>) -> String {
    match code_site {
        Some(site) if code_station.len() == 2 => format!("{site}{code_station}"),
        _ => code_station.to_string(),
    }
}

/// A geographic rectangle as min/max longitude and latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lon_min: f64,
    pub lat_min: f64,
    pub lon_max: f64,
    pub lat_max: f64,
}

impl BoundingBox {
    pub fn new(lon_min: f64, lat_min: f64, lon_max: f64, lat_max: f64) -> Self {
        Self {
            lon_min,
            lat_min,
            lon_max,
            lat_max,
        }
    }

    /// Comma-joined `lonMin,latMin,lonMax,latMax` as the API expects it.
    pub fn to_query(&self) -> String {
        format!(
            "{},{},{},{}",
            self.lon_min, self.lat_min, self.lon_max, self.lat_max
        )
    }
}

/// First alias that resolves to a non-empty string.
fn string_alias(record: &Value, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .copied()
        .find_map(|key| string_field(record, key))
}

fn string_field(record: &Value, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// First alias (then the nested `coordonnees` object) holding a finite number.
fn coordinate_alias(record: &Value, aliases: &[&str], nested_key: &str) -> Option<f64> {
    aliases
        .iter()
        .copied()
        .find_map(|key| finite_number(record.get(key)?))
        .or_else(|| {
            record
                .get(NESTED_COORDINATES_KEY)
                .and_then(|coords| coords.get(nested_key))
                .and_then(finite_number)
        })
}

/// Accept numbers or numeric strings, rejecting anything non-finite.
fn finite_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// `en_service` wins when present; otherwise the textual state is probed
/// for "service"; a record saying nothing is assumed operational.
fn operational_status(record: &Value) -> bool {
    if let Some(flag) = record.get("en_service").and_then(Value::as_bool) {
        return flag;
    }
    match record.get("etat_station").and_then(Value::as_str) {
        Some(state) => state.to_lowercase().contains("service"),
        None => true,
    }
}
