//! Projection of raw observation rows into a chartable series.
//!
//! The pipeline: filter to the selected station, choose one grandeur
//! (height preferred over discharge), order by time, keep the most recent
//! window, pair labels with finite values, and normalize height units.
//! A run that ends with zero usable points is the distinct "no data"
//! outcome, not an error.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

use rhw_hubeau::{Grandeur, RawObservation};

/// Most recent points kept for display.
pub const MAX_POINTS: usize = 200;

/// X-axis label format: "DD/MM HH:MM".
const LABEL_FORMAT: &str = "%d/%m %H:%M";

/// A single chart point. Serialized as-is for the chart bridge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayPoint {
    pub label: String,
    pub value: f64,
}

/// An ordered, unit-normalized series for one station and one grandeur.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySeries {
    pub grandeur: Grandeur,
    pub code_station: String,
    pub points: Vec<DisplayPoint>,
}

impl DisplaySeries {
    /// Chart title, e.g. `Water height (m) — Y123456701`.
    pub fn title(&self) -> String {
        format!("{} — {}", self.grandeur.axis_label(), self.code_station)
    }
}

/// Outcome of a projection: a drawable series, or nothing usable.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Series(DisplaySeries),
    Empty,
}

/// Project raw rows fetched for `code_station` (and optionally the site
/// they were resolved through) into a display series.
pub fn project(
    rows: &[RawObservation],
    code_station: &str,
    code_site: Option<&str>,
) -> Projection {
    let matching: Vec<&RawObservation> = rows
        .iter()
        .filter(|row| matches_station(row, code_station, code_site))
        .collect();

    // Height rows win whenever any exist; the series is never mixed.
    let heights: Vec<&RawObservation> = matching
        .iter()
        .copied()
        .filter(|row| row.grandeur() == Some(Grandeur::H))
        .collect();
    let (grandeur, chosen) = if heights.is_empty() {
        let discharges: Vec<&RawObservation> = matching
            .iter()
            .copied()
            .filter(|row| row.grandeur() == Some(Grandeur::Q))
            .collect();
        (Grandeur::Q, discharges)
    } else {
        (Grandeur::H, heights)
    };

    // A row without an orderable timestamp can be neither sorted nor
    // labeled, so it is dropped here.
    let chosen_len = chosen.len();
    let mut dated: Vec<(NaiveDateTime, &RawObservation)> = chosen
        .into_iter()
        .filter_map(|row| {
            let stamp = row.date_obs.as_deref().and_then(parse_timestamp)?;
            Some((stamp, row))
        })
        .collect();
    if dated.len() < chosen_len {
        log::debug!(
            "{} rows without orderable timestamps dropped for {code_station}",
            chosen_len - dated.len()
        );
    }
    dated.sort_by_key(|(stamp, _)| *stamp);

    let start = dated.len().saturating_sub(MAX_POINTS);
    let mut points: Vec<DisplayPoint> = dated[start..]
        .iter()
        .filter_map(|(stamp, row)| {
            let value = row.finite_result()?;
            Some(DisplayPoint {
                label: stamp.format(LABEL_FORMAT).to_string(),
                value,
            })
        })
        .collect();

    if points.is_empty() {
        return Projection::Empty;
    }

    if grandeur == Grandeur::H {
        normalize_heights(&mut points);
    }

    Projection::Series(DisplaySeries {
        grandeur,
        code_station: code_station.to_string(),
        points,
    })
}

/// A row belongs to the target station on an exact code match; rows that
/// carry no station code fall back to matching the selected site.
fn matches_station(row: &RawObservation, code_station: &str, code_site: Option<&str>) -> bool {
    match row.code_station.as_deref().filter(|c| !c.is_empty()) {
        Some(code) => code == code_station,
        None => match (row.code_site.as_deref(), code_site) {
            (Some(row_site), Some(site)) => row_site == site,
            _ => false,
        },
    }
}

/// Offset-carrying timestamps are converted to local time; naive
/// timestamps (and date-only elaborated rows) are taken as-is.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(s) {
        return Some(stamp.with_timezone(&Local).naive_local());
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(stamp);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Height readings arrive in mm, cm or m depending on the station; infer
/// the unit from the max magnitude and rescale to meters. Both boundaries
/// are exclusive. Discharge series are never rescaled.
fn normalize_heights(points: &mut [DisplayPoint]) {
    let max_magnitude = points
        .iter()
        .map(|point| point.value.abs())
        .fold(0.0_f64, f64::max);
    let divisor = if max_magnitude > 200.0 {
        1000.0 // mm -> m
    } else if max_magnitude > 20.0 {
        100.0 // cm -> m
    } else {
        return;
    };
    for point in points.iter_mut() {
        point.value /= divisor;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    const STATION: &str = "Y123456701";
    const SITE: &str = "Y1234567";

    fn row(
        code_station: Option<&str>,
        code_site: Option<&str>,
        grandeur: &str,
        date: &str,
        value: serde_json::Value,
    ) -> RawObservation {
        RawObservation {
            code_station: code_station.map(str::to_string),
            code_site: code_site.map(str::to_string),
            grandeur_hydro: Some(grandeur.to_string()),
            date_obs: Some(date.to_string()),
            resultat_obs: Some(value),
        }
    }

    fn height_row(date: &str, value: f64) -> RawObservation {
        row(Some(STATION), Some(SITE), "H", date, json!(value))
    }

    fn points(projection: Projection) -> Vec<DisplayPoint> {
        match projection {
            Projection::Series(series) => series.points,
            Projection::Empty => panic!("expected a series"),
        }
    }

    #[test]
    fn test_height_preferred_over_more_numerous_discharge() {
        let mut rows = vec![height_row("2026-08-01T06:00:00", 1.2)];
        for hour in 0..10 {
            rows.push(row(
                Some(STATION),
                Some(SITE),
                "Q",
                &format!("2026-08-01T{hour:02}:00:00"),
                json!(3.0),
            ));
        }
        match project(&rows, STATION, Some(SITE)) {
            Projection::Series(series) => {
                assert_eq!(series.grandeur, Grandeur::H);
                assert_eq!(series.points.len(), 1);
            }
            Projection::Empty => panic!("expected a height series"),
        }
    }

    #[test]
    fn test_discharge_fallback_when_no_heights() {
        let rows = vec![row(
            Some(STATION),
            Some(SITE),
            "Q",
            "2026-08-01T06:00:00",
            json!(500.0),
        )];
        match project(&rows, STATION, Some(SITE)) {
            Projection::Series(series) => {
                assert_eq!(series.grandeur, Grandeur::Q);
                // Discharge is never rescaled, however large.
                assert_eq!(series.points[0].value, 500.0);
                assert_eq!(series.title(), "Discharge (m³/s) — Y123456701");
            }
            Projection::Empty => panic!("expected a discharge series"),
        }
    }

    #[test]
    fn test_filter_by_station_with_site_fallback() {
        let rows = vec![
            height_row("2026-08-01T06:00:00", 1.0),
            // Different station: discarded.
            row(Some("X000000001"), None, "H", "2026-08-01T06:05:00", json!(9.0)),
            // No station code, matching site: kept.
            row(None, Some(SITE), "H", "2026-08-01T06:10:00", json!(2.0)),
            // No station code, foreign site: discarded.
            row(None, Some("Z7654321"), "H", "2026-08-01T06:15:00", json!(9.0)),
            // No station code and no selected site would be required: discarded.
            row(None, None, "H", "2026-08-01T06:20:00", json!(9.0)),
        ];
        let projected = points(project(&rows, STATION, Some(SITE)));
        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0].value, 1.0);
        assert_eq!(projected[1].value, 2.0);
    }

    #[test]
    fn test_rows_sorted_ascending_by_timestamp() {
        let rows = vec![
            height_row("2026-08-02T12:00:00", 2.0),
            height_row("2026-08-01T12:00:00", 1.0),
            height_row("2026-08-03T12:00:00", 3.0),
        ];
        let projected = points(project(&rows, STATION, Some(SITE)));
        assert_eq!(
            projected.iter().map(|p| p.value).collect::<Vec<_>>(),
            vec![1.0, 2.0, 3.0]
        );
        assert_eq!(projected[0].label, "01/08 12:00");
    }

    #[test]
    fn test_window_keeps_last_200_of_250() {
        let rows: Vec<RawObservation> = (0..250)
            .map(|i| {
                height_row(
                    &format!("2026-08-{:02}T{:02}:{:02}:00", 1 + i / 100, (i / 60) % 24, i % 60),
                    i as f64 / 100.0,
                )
            })
            .collect();
        let projected = points(project(&rows, STATION, Some(SITE)));
        assert_eq!(projected.len(), MAX_POINTS);
        // The first 50 rows fell out of the window.
        assert_eq!(projected[0].value, 0.5);
        assert_eq!(projected.last().unwrap().value, 2.49);
    }

    #[test]
    fn test_unparseable_values_drop_their_labels_too() {
        let rows = vec![
            height_row("2026-08-01T06:00:00", 1.0),
            row(Some(STATION), Some(SITE), "H", "2026-08-01T06:05:00", json!("---")),
            height_row("2026-08-01T06:10:00", 2.0),
        ];
        let projected = points(project(&rows, STATION, Some(SITE)));
        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0].label, "01/08 06:00");
        assert_eq!(projected[1].label, "01/08 06:10");
    }

    #[test]
    fn test_rows_without_orderable_timestamp_are_dropped() {
        let rows = vec![
            height_row("2026-08-01T06:00:00", 1.0),
            row(Some(STATION), Some(SITE), "H", "yesterday-ish", json!(2.0)),
        ];
        let projected = points(project(&rows, STATION, Some(SITE)));
        assert_eq!(projected.len(), 1);
    }

    #[test]
    fn test_date_only_rows_are_orderable() {
        let rows = vec![
            height_row("2026-08-02", 2.0),
            height_row("2026-08-01", 1.0),
        ];
        let projected = points(project(&rows, STATION, Some(SITE)));
        assert_eq!(projected[0].label, "01/08 00:00");
        assert_eq!(projected[1].label, "02/08 00:00");
    }

    #[test]
    fn test_height_normalization_boundaries() {
        // > 200: assumed millimeters.
        let mm = points(project(&[height_row("2026-08-01T06:00:00", 201.0)], STATION, None));
        assert_eq!(mm[0].value, 0.201);
        // 200 exactly: left unchanged.
        let at_200 = points(project(&[height_row("2026-08-01T06:00:00", 200.0)], STATION, None));
        assert_eq!(at_200[0].value, 200.0);
        // > 20: assumed centimeters.
        let cm = points(project(&[height_row("2026-08-01T06:00:00", 21.0)], STATION, None));
        assert_eq!(cm[0].value, 0.21);
        // 20 exactly: left unchanged.
        let at_20 = points(project(&[height_row("2026-08-01T06:00:00", 20.0)], STATION, None));
        assert_eq!(at_20[0].value, 20.0);
    }

    #[test]
    fn test_max_magnitude_rescales_whole_series() {
        let rows = vec![
            height_row("2026-08-01T06:00:00", 150.0),
            height_row("2026-08-01T06:05:00", 250.0),
        ];
        let projected = points(project(&rows, STATION, None));
        // One mm-scale reading pulls the whole series to mm -> m.
        assert_eq!(projected[0].value, 0.15);
        assert_eq!(projected[1].value, 0.25);
    }

    #[test]
    fn test_negative_heights_participate_in_unit_detection() {
        let rows = vec![
            height_row("2026-08-01T06:00:00", -300.0),
            height_row("2026-08-01T06:05:00", 100.0),
        ];
        let projected = points(project(&rows, STATION, None));
        assert_eq!(projected[0].value, -0.3);
        assert_eq!(projected[1].value, 0.1);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let rows: Vec<RawObservation> = (0..25)
            .map(|i| height_row(&format!("2026-08-01T06:{:02}:00", i), 30.0 + i as f64))
            .collect();
        let first = project(&rows, STATION, Some(SITE));
        let second = project(&rows, STATION, Some(SITE));
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_outcomes() {
        // No rows at all.
        assert_eq!(project(&[], STATION, Some(SITE)), Projection::Empty);
        // Rows exist but none for this station.
        let foreign = vec![row(Some("X000000001"), None, "H", "2026-08-01T06:00:00", json!(1.0))];
        assert_eq!(project(&foreign, STATION, Some(SITE)), Projection::Empty);
        // Rows for the station, but no finite value survives.
        let unusable = vec![row(Some(STATION), None, "H", "2026-08-01T06:00:00", json!("---"))];
        assert_eq!(project(&unusable, STATION, Some(SITE)), Projection::Empty);
    }
}
