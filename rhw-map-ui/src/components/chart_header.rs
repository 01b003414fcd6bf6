//! Chart header component with title and the selected-station subtitle.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    /// Section title
    pub title: String,
    /// Station label or code currently charted
    #[props(default = String::new())]
    pub subtitle: String,
}

/// Header for the chart card showing title and the charted station.
#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: space-between; align-items: baseline; margin-bottom: 8px;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{props.title}"
            }
            if !props.subtitle.is_empty() {
                p {
                    style: "margin: 0; font-size: 12px; color: #666; font-weight: 600;",
                    "{props.subtitle}"
                }
            }
        }
    }
}
