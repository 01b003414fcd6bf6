//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided
//! via `use_context_provider`. Child components retrieve it with
//! `use_context::<AppState>()`.
//!
//! The selection store is the signal-backed counterpart of a
//! replay-last-value subject: reading it inside a reactive scope
//! subscribes that scope and immediately observes the current value;
//! `select` synchronously notifies every subscriber; dropping the scope
//! unsubscribes it.

use dioxus::prelude::*;
use rhw_bridges::Bridge;
use rhw_hubeau::Station;

/// Holds the single currently-selected station, or none.
///
/// Exactly one instance lives in [`AppState`]; consumers receive it by
/// context injection, never through ambient statics.
#[derive(Clone, Copy)]
pub struct SelectionStore {
    current: Signal<Option<Station>>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self {
            current: Signal::new(None),
        }
    }

    /// Replace the selection (including clearing it with `None`) and
    /// synchronously notify all subscribers.
    pub fn select(&mut self, station: Option<Station>) {
        self.current.set(station);
    }

    /// Current selection; subscribes the calling reactive scope.
    pub fn current(&self) -> Option<Station> {
        (self.current)()
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared application state for the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Currently selected station.
    pub selection: SelectionStore,
    /// Stations of the queried viewport (already normalized).
    pub stations: Signal<Vec<Station>>,
    /// Bridge referential.
    pub bridges: Signal<Vec<Bridge>>,
    /// Whether the station directory is still loading.
    pub loading: Signal<bool>,
    /// Banner message when a referential layer failed to load.
    pub error_msg: Signal<Option<String>>,
    /// Hide non-operational stations on the map.
    pub hide_non_operational: Signal<bool>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            selection: SelectionStore::new(),
            stations: Signal::new(Vec::new()),
            bridges: Signal::new(Vec::new()),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            hide_non_operational: Signal::new(false),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
