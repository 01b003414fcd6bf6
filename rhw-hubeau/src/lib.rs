//! Types and HTTP client for the Hub'Eau hydrométrie API.
//!
//! Hub'Eau exposes the French national hydrometry referential and its
//! real-time / elaborated observation series as loosely-typed JSON. This
//! crate normalizes those payloads once at ingestion into strongly-typed
//! records and wraps the three endpoints the dashboard consumes:
//! stations referential, real-time observations and elaborated series.

pub mod client;
pub mod date_range;
pub mod observation;
pub mod station;

pub use client::{FetchError, HubeauClient};
pub use observation::{ElaboratedKind, Grandeur, RawObservation};
pub use station::{BoundingBox, Station};
