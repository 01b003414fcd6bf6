//! Chart container component.

use dioxus::prelude::*;

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The DOM id for the chart container (D3 will render into this)
    pub id: String,
    /// Optional minimum height in pixels
    #[props(default = 300)]
    pub min_height: u32,
}

/// A container div for the D3.js observation chart.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );

    rsx! {
        div {
            style: "{style}",
            div {
                id: "{props.id}",
                style: "width: 100%;",
            }
        }
    }
}
