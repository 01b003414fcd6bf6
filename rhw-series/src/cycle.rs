//! Latest-request-wins bookkeeping for selection-driven fetches.
//!
//! Every station selection begins a new cycle before its fetch is issued;
//! the fetch result is applied only if its token still belongs to the
//! newest cycle. A stale response therefore never overwrites the display
//! of a more recent selection.

/// Token identifying one selection cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CycleToken(u64);

/// Monotonic cycle counter. Single-threaded; lives in the chart component.
#[derive(Debug, Clone, Default)]
pub struct SelectionCycle {
    current: u64,
}

impl SelectionCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new cycle, invalidating every earlier token.
    pub fn begin(&mut self) -> CycleToken {
        self.current += 1;
        CycleToken(self.current)
    }

    /// Whether a result carrying `token` may still be applied.
    pub fn accepts(&self, token: CycleToken) -> bool {
        token.0 == self.current
    }
}

/// Display states of the chart panel.
///
/// `Rendered`, `Empty` and `Failed` are terminal for one selection cycle;
/// the panel itself lives across many cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPhase {
    /// No station selected yet.
    Idle,
    /// Fetch in flight for the current selection.
    Loading,
    /// Chart built and displayed.
    Rendered,
    /// Fetch succeeded but nothing usable came back.
    Empty,
    /// Fetch failed.
    Failed,
}

impl ChartPhase {
    /// Placeholder text shown instead of the chart, when any.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ChartPhase::Idle => Some("Select a station to display its observations."),
            ChartPhase::Empty => Some("No data available for this station."),
            ChartPhase::Failed => Some("Could not load observations for this station."),
            ChartPhase::Loading | ChartPhase::Rendered => None,
        }
    }
}
