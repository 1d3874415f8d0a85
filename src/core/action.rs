//! # Actions
//!
//! Everything that can happen to a search becomes an `Action`.
//! User types a query? That's `Action::SetQuery`.
//! First page arrives? That's `Action::ApplyResults`.
//!
//! The `update()` function takes the current state and an action,
//! then returns the new state. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State
//! ```
//!
//! Build actions with the free functions below rather than the variants
//! directly; they are what the session driver and the CLI use.

use crate::core::state::ResultItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetQuery { query: String },
    /// Replaces results and count wholesale (fresh query).
    ApplyResults { results: Vec<ResultItem>, count: u64 },
    /// Appends results in order and overwrites count (next page).
    AddToResults { results: Vec<ResultItem>, count: u64 },
    ToggleOnInit,
    SetSearchingStatus { status: bool },
    SetNextPageSearchStatus { status: bool },
    IncrementLike { id: String },
    IncrementPage,
}

impl Action {
    /// The wire tag for this action, also used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetQuery { .. } => "SET_QUERY",
            Action::ApplyResults { .. } => "APPLY_RESULTS",
            Action::AddToResults { .. } => "ADD_TO_RESULTS",
            Action::ToggleOnInit => "TOGGLE_ON_INIT",
            Action::SetSearchingStatus { .. } => "SET_SEARCHING_STATUS",
            Action::SetNextPageSearchStatus { .. } => "SET_NEXT_PAGE_SEARCH_STATUS",
            Action::IncrementLike { .. } => "INCREMENT_LIKE",
            Action::IncrementPage => "INCREMENT_PAGE",
        }
    }
}

// ============================================================================
// Builders
// ============================================================================

pub fn set_query(query: impl Into<String>) -> Action {
    Action::SetQuery {
        query: query.into(),
    }
}

pub fn apply_results(results: Vec<ResultItem>, count: u64) -> Action {
    Action::ApplyResults { results, count }
}

/// `count` replaces the stored count as-is. Pass the backend total or a
/// local running count, but pick one and stick to it.
pub fn add_to_results(results: Vec<ResultItem>, count: u64) -> Action {
    Action::AddToResults { results, count }
}

pub fn toggle_on_init() -> Action {
    Action::ToggleOnInit
}

pub fn set_searching_status(status: bool) -> Action {
    Action::SetSearchingStatus { status }
}

pub fn set_next_page_search_status(status: bool) -> Action {
    Action::SetNextPageSearchStatus { status }
}

pub fn increment_like(id: impl Into<String>) -> Action {
    Action::IncrementLike { id: id.into() }
}

pub fn increment_page() -> Action {
    Action::IncrementPage
}
