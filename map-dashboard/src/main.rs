//! Riviera hydrometry map dashboard.
//!
//! Renders hydrometric stations and railway bridges of the Nice area on a
//! Leaflet map; selecting a station shows its attributes and a chart of
//! its recent water-height or discharge observations from Hub'Eau.
//!
//! Data flow:
//! 1. On mount, vendor scripts (Leaflet, D3) are injected and the bridge
//!    JS is initialized.
//! 2. The station referential for the Riviera bbox and the bridge list
//!    are fetched concurrently; unusable records are dropped at ingestion.
//! 3. Marker clicks push the station into the selection store; the chart
//!    panel fetches, projects and renders its observation series.

use dioxus::prelude::*;
use wasm_bindgen_futures::spawn_local;

use rhw_bridges::BridgesClient;
use rhw_hubeau::{BoundingBox, HubeauClient, Station};
use rhw_map_ui::components::{ChartPanel, DetailPanel, ErrorDisplay, MapView};
use rhw_map_ui::js_bridge;
use rhw_map_ui::state::AppState;

/// Riviera viewport queried from the stations referential.
const STATIONS_BBOX: BoundingBox = BoundingBox {
    lon_min: 7.0,
    lat_min: 43.5,
    lon_max: 7.6,
    lat_max: 43.95,
};

/// Referential page size; the viewport holds well under this.
const STATIONS_PAGE_SIZE: u32 = 500;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("map-dashboard-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Vendor assets, bridge JS and referential layers load once on mount.
    use_effect(move || {
        js_bridge::inject_vendor_assets();
        js_bridge::init_bridge_scripts();

        spawn_local(async move {
            let client = HubeauClient::new();
            match client.list_stations(&STATIONS_BBOX, STATIONS_PAGE_SIZE).await {
                Ok(page) => {
                    let stations: Vec<Station> =
                        page.data.iter().filter_map(Station::from_value).collect();
                    log::info!(
                        "loaded {} usable stations of {} in the viewport",
                        stations.len(),
                        page.count
                    );
                    state.stations.set(stations);
                }
                Err(e) => {
                    log::warn!("station directory unavailable: {e:?}");
                    state
                        .error_msg
                        .set(Some("Station directory unavailable; the map layer stays empty.".to_string()));
                }
            }
            state.loading.set(false);
        });

        spawn_local(async move {
            match BridgesClient::new().list().await {
                Ok(bridges) => {
                    log::info!("loaded {} bridges", bridges.len());
                    state.bridges.set(bridges);
                }
                // Degrade to an empty bridge layer; the rest of the page
                // stays interactive.
                Err(e) => log::warn!("bridges layer unavailable: {e:?}"),
            }
        });
    });

    rsx! {
        div {
            style: "display: flex; height: 100vh; background: #f8fafc; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            div {
                style: "flex: 1; min-width: 0;",
                if let Some(err) = (state.error_msg)() {
                    ErrorDisplay { message: err }
                }
                MapView {}
            }

            aside {
                style: "width: 380px; height: 100vh; overflow: auto; background: #fff; border-left: 1px solid #eef2f7; padding: 16px;",
                DetailPanel {}
                ChartPanel {}
            }
        }
    }
}
