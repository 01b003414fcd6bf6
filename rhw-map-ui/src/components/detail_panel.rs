//! Detail panel: attributes of the selected station.

use dioxus::prelude::*;

use crate::state::AppState;

const ROW_STYLE: &str =
    "display: flex; align-items: center; justify-content: space-between; padding: 8px 0; border-bottom: 1px dashed #e5e7eb;";
const ROW_KEY_STYLE: &str = "color: #6b7280;";
const ROW_VALUE_STYLE: &str = "color: #111827; font-weight: 600;";

#[component]
pub fn DetailPanel() -> Element {
    let state = use_context::<AppState>();

    let Some(station) = state.selection.current() else {
        return rsx! {
            div {
                style: "display: flex; flex-direction: column; align-items: center; justify-content: center; text-align: center; padding: 40px 16px; color: #6b7280;",
                div {
                    style: "font-weight: 600; font-size: 18px; margin-bottom: 4px; color: #111827;",
                    "Select a station"
                }
                div { "Click a green or grey dot on the map to display its details." }
            }
        };
    };

    let (chip_text, chip_style) = if station.operational {
        (
            "Operational",
            "padding: 5px 10px; border-radius: 999px; font-size: 12px; font-weight: 600; background: #ecfdf5; color: #065f46; border: 1px solid #a7f3d0;",
        )
    } else {
        (
            "Out of service",
            "padding: 5px 10px; border-radius: 999px; font-size: 12px; font-weight: 600; background: #fef2f2; color: #7f1d1d; border: 1px solid #fecaca;",
        )
    };

    let label = station.display_label().to_string();

    rsx! {
        header {
            style: "display: flex; align-items: center; justify-content: space-between; gap: 12px; margin-bottom: 12px;",
            div {
                style: "font-size: 18px; font-weight: 700; color: #111827;",
                "{label}"
            }
            span { style: "{chip_style}", "{chip_text}" }
        }

        section {
            style: "background: #fff; border: 1px solid #eef2f7; border-radius: 14px; padding: 12px; margin-bottom: 12px;",
            div {
                style: "{ROW_STYLE}",
                span { style: "{ROW_KEY_STYLE}", "Code" }
                b { style: "{ROW_VALUE_STYLE}", "{station.code_station}" }
            }
            if let Some(site) = station.code_site.as_deref() {
                div {
                    style: "{ROW_STYLE}",
                    span { style: "{ROW_KEY_STYLE}", "Site" }
                    b { style: "{ROW_VALUE_STYLE}", "{site}" }
                }
            }
            div {
                style: "{ROW_STYLE}",
                span { style: "{ROW_KEY_STYLE}", "Latitude" }
                b { style: "{ROW_VALUE_STYLE}", "{station.latitude}" }
            }
            div {
                style: "display: flex; align-items: center; justify-content: space-between; padding: 8px 0;",
                span { style: "{ROW_KEY_STYLE}", "Longitude" }
                b { style: "{ROW_VALUE_STYLE}", "{station.longitude}" }
            }
        }
    }
}
