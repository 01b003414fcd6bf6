//! Shared Dioxus components and JS interop for the hydrometry dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the Leaflet map and D3.js chart,
//!   driven through `js_sys::eval()`
//! - `state`: reactive application state (selection store, referential
//!   layers) built on Dioxus Signals
//! - `components`: the map view, chart panel, detail panel and the small
//!   reusable pieces they share

pub mod components;
pub mod js_bridge;
pub mod state;
