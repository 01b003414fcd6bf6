//! Chart panel: selection-driven observation chart.
//!
//! State machine per selection cycle: Idle -> Loading -> one of
//! {Rendered, Empty, Failed}. A new selection begins a new cycle before
//! its fetch is issued, so a stale response is discarded instead of
//! overwriting a newer selection's display. The chart DOM resource is
//! released before every rebuild and on teardown.

use dioxus::prelude::*;

use rhw_hubeau::HubeauClient;
use rhw_series::{project, ChartPhase, Projection, SelectionCycle};

use crate::components::{ChartContainer, ChartHeader, LoadingSpinner};
use crate::js_bridge;
use crate::state::AppState;

/// DOM id of the chart container.
pub const CHART_CONTAINER_ID: &str = "hydro-chart";

/// Days of real-time observations requested per selection.
pub const OBSERVATION_WINDOW_DAYS: i64 = 7;

const LINE_COLOR: &str = "#3b82f6";

#[component]
pub fn ChartPanel() -> Element {
    let state = use_context::<AppState>();
    let mut phase = use_signal(|| ChartPhase::Idle);
    let mut cycle = use_signal(SelectionCycle::new);
    let mut subtitle = use_signal(String::new);

    use_effect(move || {
        let selected = state.selection.current();
        // Invalidate any in-flight fetch of the previous selection.
        let token = cycle.write().begin();

        let Some(station) = selected else {
            subtitle.set(String::new());
            phase.set(ChartPhase::Idle);
            js_bridge::destroy_line_chart(CHART_CONTAINER_ID);
            return;
        };

        subtitle.set(station.display_label().to_string());
        phase.set(ChartPhase::Loading);

        spawn(async move {
            let client = HubeauClient::new();
            let fetched = client
                .recent_observations(
                    &station.code_station,
                    station.code_site.as_deref(),
                    OBSERVATION_WINDOW_DAYS,
                )
                .await;

            if !cycle.peek().accepts(token) {
                // A newer selection owns the display now.
                return;
            }

            js_bridge::destroy_line_chart(CHART_CONTAINER_ID);
            match fetched {
                Err(e) => {
                    log::warn!("observations fetch failed for {}: {e:?}", station.code_station);
                    phase.set(ChartPhase::Failed);
                }
                Ok(rows) => {
                    match project(&rows, &station.code_station, station.code_site.as_deref()) {
                        Projection::Empty => phase.set(ChartPhase::Empty),
                        Projection::Series(series) => {
                            let data_json =
                                serde_json::to_string(&series.points).unwrap_or_default();
                            let config_json = serde_json::to_string(&serde_json::json!({
                                "title": series.title(),
                                "yAxisLabel": series.grandeur.axis_label(),
                                "lineColor": LINE_COLOR,
                                "maxTicks": 8,
                            }))
                            .unwrap_or_default();
                            js_bridge::render_line_chart(
                                CHART_CONTAINER_ID,
                                &data_json,
                                &config_json,
                            );
                            phase.set(ChartPhase::Rendered);
                        }
                    }
                }
            }
        });
    });

    use_drop(move || js_bridge::destroy_line_chart(CHART_CONTAINER_ID));

    let current_phase = phase();

    rsx! {
        div {
            style: "background: #fff; border: 1px solid #eef2f7; border-radius: 14px; padding: 12px; margin-bottom: 12px;",
            ChartHeader {
                title: "Hydrometry".to_string(),
                subtitle: subtitle(),
            }
            if let Some(message) = current_phase.placeholder() {
                div {
                    style: "display: flex; align-items: center; justify-content: center; min-height: 120px; color: #64748b; font-weight: 600; text-align: center; padding: 12px;",
                    "{message}"
                }
            }
            if current_phase == ChartPhase::Loading {
                LoadingSpinner {}
            }
            if current_phase == ChartPhase::Rendered {
                ChartContainer {
                    id: CHART_CONTAINER_ID.to_string(),
                    min_height: 300,
                }
            }
        }
    }
}
