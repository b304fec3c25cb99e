//! Navigation state machine for the interactive session
//!
//! The session's UI state is an explicit tagged union of views, each
//! carrying only the data it needs, transitioned by navigation events.
//! `Back` always returns to the dashboard and drops view-local state.

/// Current view of the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Totals plus the action menu.
    Dashboard,
    /// One box, open for editing.
    BoxView {
        /// Identifier of the open box.
        box_id: String,
    },
    /// Every box with its item count.
    AllBoxes,
    /// Search results for a query.
    SearchView {
        /// The active query.
        query: String,
    },
    /// Waiting on a scan or manual identifier entry.
    Scanner,
}

/// Navigation events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// Open a box by (already normalized) identifier.
    OpenBox(String),
    /// Return to the dashboard.
    Back,
    /// Show the full box list.
    ShowAll,
    /// Run a search.
    Search(String),
    /// Start a scan.
    OpenScanner,
}

impl View {
    /// Apply a navigation event, yielding the next view.
    pub fn apply(self, event: NavEvent) -> View {
        match event {
            NavEvent::OpenBox(box_id) => View::BoxView { box_id },
            NavEvent::Back => View::Dashboard,
            NavEvent::ShowAll => View::AllBoxes,
            NavEvent::Search(query) => View::SearchView { query },
            NavEvent::OpenScanner => View::Scanner,
        }
    }
}
