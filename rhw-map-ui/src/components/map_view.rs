//! Map view: Leaflet map with station and bridge marker layers.
//!
//! Marker rendering and selected-marker emphasis happen in the map JS;
//! this component owns the map lifecycle, feeds it marker data as JSON,
//! and receives marker clicks back through a `wasm-bindgen` closure that
//! resolves the clicked code against the station directory and pushes the
//! station into the selection store.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

use rhw_hubeau::Station;

use crate::js_bridge;
use crate::state::AppState;

/// DOM id of the Leaflet container.
pub const MAP_CONTAINER_ID: &str = "hydro-map";

// Nice-area default viewpoint, matching the queried referential bbox.
const MAP_CENTER_LAT: f64 = 43.7;
const MAP_CENTER_LON: f64 = 7.25;
const MAP_ZOOM: u32 = 9;

#[component]
pub fn MapView() -> Element {
    let mut state = use_context::<AppState>();

    // Keeps the click closure alive for the component's lifetime.
    let click_handler: Rc<RefCell<Option<Closure<dyn FnMut(JsValue)>>>> =
        use_hook(|| Rc::new(RefCell::new(None)));

    // One-time map setup and click-callback export.
    use_effect({
        let click_handler = click_handler.clone();
        move || {
            let closure: Closure<dyn FnMut(JsValue)> = Closure::new(move |code: JsValue| {
                let Some(code) = code.as_string() else {
                    return;
                };
                let station = state
                    .stations
                    .peek()
                    .iter()
                    .find(|s| s.code_station == code)
                    .cloned();
                match station {
                    Some(found) => state.selection.select(Some(found)),
                    None => log::warn!("clicked marker for unknown station {code}"),
                }
            });
            js_bridge::set_station_click_handler(&closure);
            *click_handler.borrow_mut() = Some(closure);

            js_bridge::init_map(MAP_CONTAINER_ID, MAP_CENTER_LAT, MAP_CENTER_LON, MAP_ZOOM);
        }
    });

    // Station layer re-renders when the directory or the filter changes.
    use_effect(move || {
        let hide = (state.hide_non_operational)();
        let stations = state.stations.read();
        let visible: Vec<&Station> = stations
            .iter()
            .filter(|s| !hide || s.operational)
            .collect();
        match serde_json::to_string(&visible) {
            Ok(json) => js_bridge::render_station_markers(&json),
            Err(e) => log::error!("station markers not serializable: {e}"),
        }
    });

    // Bridge layer.
    use_effect(move || {
        let bridges = state.bridges.read();
        match serde_json::to_string(&*bridges) {
            Ok(json) => js_bridge::render_bridge_markers(&json),
            Err(e) => log::error!("bridge markers not serializable: {e}"),
        }
    });

    use_drop(move || {
        js_bridge::destroy_map();
        js_bridge::clear_station_click_handler();
    });

    let hide = (state.hide_non_operational)();
    let directory_loading = (state.loading)();

    rsx! {
        div {
            style: "height: 56px; display: flex; align-items: center; gap: 10px; padding: 0 16px; background: #f8fafc; border-bottom: 1px solid #e2e8f0;",
            input {
                id: "hide-non-operational",
                r#type: "checkbox",
                checked: hide,
                onchange: move |_| {
                    let current = (state.hide_non_operational)();
                    state.hide_non_operational.set(!current);
                },
            }
            label {
                r#for: "hide-non-operational",
                style: "font-weight: 600; font-size: 14px; color: #0f172a;",
                "Hide non-operational stations"
            }
        }

        div {
            style: "position: relative; width: 100%; height: calc(100vh - 56px); overflow: hidden;",
            div {
                id: "{MAP_CONTAINER_ID}",
                style: "width: 100%; height: 100%;",
            }
            if directory_loading {
                div {
                    style: "position: absolute; top: 10px; right: 10px; z-index: 1000; padding: 4px 10px; border-radius: 9999px; background: rgba(241,245,249,0.95); border: 1px solid #e2e8f0; font-size: 12px; font-weight: 600; color: #334155;",
                    "Loading stations..."
                }
            }
            div {
                style: "position: absolute; bottom: 18px; left: 50%; transform: translateX(-50%); z-index: 1000; display: flex; gap: 20px; padding: 8px 16px; background: rgba(255,255,255,0.9); border-radius: 12px; border: 1px solid #e5e7eb; font-size: 13px; color: #1e293b;",
                div {
                    span { style: "display: inline-block; width: 11px; height: 11px; border-radius: 50%; background: #34d399; border: 2px solid #059669; margin-right: 6px;" }
                    "Operational"
                }
                div {
                    span { style: "display: inline-block; width: 11px; height: 11px; border-radius: 50%; background: #d1d5db; border: 2px solid #9ca3af; margin-right: 6px;" }
                    "Non-operational"
                }
                div {
                    span { style: "margin-right: 6px;", "🛤️" }
                    "Bridge"
                }
            }
        }
    }
}
