//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The Leaflet map and D3.js chart live in `assets/js/*.js`, embedded at
//! compile time and evaluated as globals once the vendor libraries have
//! loaded. Vendor libraries themselves are injected as `<script>`/`<link>`
//! tags, so the page needs no hand-maintained index.html. Rust-to-JS calls
//! poll until the bridge and the target DOM element are ready; JS-to-Rust
//! marker clicks come back through a `wasm-bindgen` closure exported on
//! `window`.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

// Embedded map/chart JS, promoted to window.* by init_bridge_scripts().
static LEAFLET_MAP_JS: &str = include_str!("../assets/js/leaflet-map.js");
static LINE_CHART_JS: &str = include_str!("../assets/js/line-chart.js");

const LEAFLET_CSS_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const D3_JS_URL: &str = "https://cdn.jsdelivr.net/npm/d3@7/dist/d3.min.js";

/// `window` property the map JS calls with a station code on marker click.
const STATION_CLICK_HANDLER: &str = "__rhwOnStationClick";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('RHW JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Inject the Leaflet stylesheet/script and the D3 script into `<head>`.
/// Idempotent; call once at app startup.
pub fn inject_vendor_assets() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("no document; vendor assets not injected");
        return;
    };
    if document.get_element_by_id("rhw-vendor-leaflet").is_some() {
        return;
    }
    let Some(head) = document.head() else {
        return;
    };

    if let Ok(link) = document.create_element("link") {
        let _ = link.set_attribute("id", "rhw-vendor-leaflet-css");
        let _ = link.set_attribute("rel", "stylesheet");
        let _ = link.set_attribute("href", LEAFLET_CSS_URL);
        let _ = head.append_child(&link);
    }
    if let Ok(script) = document.create_element("script") {
        let _ = script.set_attribute("id", "rhw-vendor-leaflet");
        let _ = script.set_attribute("src", LEAFLET_JS_URL);
        let _ = head.append_child(&script);
    }
    if let Ok(script) = document.create_element("script") {
        let _ = script.set_attribute("id", "rhw-vendor-d3");
        let _ = script.set_attribute("src", D3_JS_URL);
        let _ = head.append_child(&script);
    }
}

/// Initialize the map/chart scripts with a wait-for-vendors polling loop.
///
/// The bridge JS files define functions via `function` declarations. To
/// ensure they become globally accessible (not block-scoped inside the
/// setInterval callback), they are evaluated at global scope via indirect
/// eval once Leaflet and D3 are ready, then explicitly promoted to
/// `window.*`.
pub fn init_bridge_scripts() {
    let all_js = [LEAFLET_MAP_JS, LINE_CHART_JS].join("\n");

    // Store the scripts on window so the polling callback can eval them
    // at global scope (not block-scoped inside setInterval).
    let store_js = format!(
        "window.__rhwBridgeScripts = {};",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            var waitForVendors = setInterval(function() {
                if (typeof L !== 'undefined' && typeof d3 !== 'undefined' &&
                    window.__rhwBridgeScripts) {
                    clearInterval(waitForVendors);
                    // Eval at global scope via indirect eval
                    (0, eval)(window.__rhwBridgeScripts);
                    delete window.__rhwBridgeScripts;
                    // Promote function declarations to window explicitly
                    if (typeof initHydroMap !== 'undefined') window.initHydroMap = initHydroMap;
                    if (typeof destroyHydroMap !== 'undefined') window.destroyHydroMap = destroyHydroMap;
                    if (typeof renderStationMarkers !== 'undefined') window.renderStationMarkers = renderStationMarkers;
                    if (typeof renderBridgeMarkers !== 'undefined') window.renderBridgeMarkers = renderBridgeMarkers;
                    if (typeof renderLineChart !== 'undefined') window.renderLineChart = renderLineChart;
                    if (typeof destroyLineChart !== 'undefined') window.destroyLineChart = destroyLineChart;
                    window.__rhwBridgeReady = true;
                    console.log('RHW map bridge initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Create the Leaflet map in the given container.
///
/// Polls until the bridge is initialized and the container element exists.
pub fn init_map(container_id: &str, center_lat: f64, center_lon: f64, zoom: u32) {
    let config = format!(
        r#"{{"centerLat":{center_lat},"centerLon":{center_lon},"zoom":{zoom}}}"#
    );
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__rhwBridgeReady &&
                    typeof window.initHydroMap !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.initHydroMap('{container_id}', '{config}');
                    }} catch(e) {{ console.error('[RHW] initHydroMap error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Replace the station marker layer with the given stations (JSON array).
pub fn render_station_markers(data_json: &str) {
    let escaped_data = data_json.replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__rhwBridgeReady &&
                    typeof window.renderStationMarkers !== 'undefined') {{
                    clearInterval(poll);
                    try {{
                        window.renderStationMarkers('{escaped_data}');
                    }} catch(e) {{ console.error('[RHW] renderStationMarkers error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Replace the bridge marker layer with the given bridges (JSON array).
pub fn render_bridge_markers(data_json: &str) {
    let escaped_data = data_json.replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__rhwBridgeReady &&
                    typeof window.renderBridgeMarkers !== 'undefined') {{
                    clearInterval(poll);
                    try {{
                        window.renderBridgeMarkers('{escaped_data}');
                    }} catch(e) {{ console.error('[RHW] renderBridgeMarkers error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Tear down the Leaflet map and its layers.
pub fn destroy_map() {
    call_js(
        "if (typeof window.destroyHydroMap !== 'undefined') window.destroyHydroMap();",
    );
}

/// Render the observation line chart into the given container.
///
/// Polls until the bridge is initialized and the container element exists.
pub fn render_line_chart(container_id: &str, data_json: &str, config_json: &str) {
    let escaped_data = data_json.replace('\'', "\\'").replace('\n', "");
    let escaped_config = config_json.replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__rhwBridgeReady &&
                    typeof window.renderLineChart !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.renderLineChart('{container_id}', '{escaped_data}', '{escaped_config}');
                    }} catch(e) {{ console.error('[RHW] renderLineChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_line_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById('{}'); if (el) el.innerHTML = '';",
        container_id
    ));
}

/// Export the marker-click callback on `window` for the map JS.
pub fn set_station_click_handler(handler: &Closure<dyn FnMut(JsValue)>) {
    if let Some(window) = web_sys::window() {
        let _ = js_sys::Reflect::set(
            &window,
            &JsValue::from_str(STATION_CLICK_HANDLER),
            handler.as_ref(),
        );
    }
}

/// Remove the marker-click callback; the map JS checks before calling.
pub fn clear_station_click_handler() {
    if let Some(window) = web_sys::window() {
        let _ = js_sys::Reflect::set(
            &window,
            &JsValue::from_str(STATION_CLICK_HANDLER),
            &JsValue::NULL,
        );
    }
}
