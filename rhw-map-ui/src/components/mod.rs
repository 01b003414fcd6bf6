//! Reusable Dioxus RSX components for the hydrometry dashboard.

mod chart_container;
mod chart_header;
mod chart_panel;
mod detail_panel;
mod error_display;
mod loading_spinner;
mod map_view;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use chart_panel::ChartPanel;
pub use detail_panel::DetailPanel;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use map_view::MapView;
