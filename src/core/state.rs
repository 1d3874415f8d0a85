//! # Search State
//!
//! The single state value for a search session. Domain data only, no
//! presentation types.
//!
//! ```text
//! SearchState
//! ├── query: String                     // current search query
//! ├── results: Vec<ResultItem>          // accumulated results, arrival order
//! ├── count: u64                        // total as last reported by the caller
//! ├── page: u32                         // pagination cursor, starts at 1
//! ├── is_on_init: bool                  // no search has completed yet
//! ├── is_searching: bool                // fresh-query fetch in flight
//! └── is_searching_for_next_page: bool  // next-page fetch in flight
//! ```
//!
//! State is never mutated in place. `update()` in update.rs hands back either
//! the same `Arc` (no-op) or a freshly built value.

use serde::{Deserialize, Serialize};

/// One search result record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    pub id: String,
    #[serde(default)]
    pub alt_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub likes: u64,
}

impl ResultItem {
    /// Returns a copy of this item with one more like.
    pub fn liked(&self) -> ResultItem {
        ResultItem {
            likes: self.likes.saturating_add(1),
            ..self.clone()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<ResultItem>,
    /// Whatever the caller last supplied with `ApplyResults` / `AddToResults`.
    /// The store does not decide whether this is a backend total or a local
    /// running count; `SearchSession` always passes the backend total.
    pub count: u64,
    pub page: u32,
    pub is_on_init: bool,
    pub is_searching: bool,
    pub is_searching_for_next_page: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            count: 0,
            page: 1,
            is_on_init: true,
            is_searching: false,
            is_searching_for_next_page: false,
        }
    }

    /// True while either loading indicator is up.
    pub fn is_busy(&self) -> bool {
        self.is_searching || self.is_searching_for_next_page
    }

    /// True once every result the caller reported has been accumulated.
    pub fn is_exhausted(&self) -> bool {
        self.results.len() as u64 >= self.count
    }
}
