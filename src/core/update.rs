//! # Reducer
//!
//! `update(state, action)` is the only place a `SearchState` changes.
//!
//! The input is borrowed, so nothing reachable from it can be written to.
//! Every arm returns either the same `Arc` (no-op) or a brand new value
//! built from a clone of the fields that did not change.

use std::sync::Arc;

use log::warn;

use crate::core::action::Action;
use crate::core::state::SearchState;

pub fn update(state: &Arc<SearchState>, action: Action) -> Arc<SearchState> {
    match action {
        Action::SetQuery { query } => Arc::new(SearchState {
            query,
            ..SearchState::clone(state)
        }),

        Action::ApplyResults { results, count } => Arc::new(SearchState {
            results,
            count,
            ..SearchState::clone(state)
        }),

        Action::AddToResults { results, count } => {
            let mut combined = Vec::with_capacity(state.results.len() + results.len());
            combined.extend(state.results.iter().cloned());
            combined.extend(results);
            Arc::new(SearchState {
                results: combined,
                count,
                ..SearchState::clone(state)
            })
        }

        Action::ToggleOnInit => Arc::new(SearchState {
            is_on_init: !state.is_on_init,
            ..SearchState::clone(state)
        }),

        Action::SetSearchingStatus { status } => Arc::new(SearchState {
            is_searching: status,
            ..SearchState::clone(state)
        }),

        Action::SetNextPageSearchStatus { status } => Arc::new(SearchState {
            is_searching_for_next_page: status,
            ..SearchState::clone(state)
        }),

        Action::IncrementLike { id } => {
            let Some(index) = state.results.iter().position(|item| item.id == id) else {
                warn!("INCREMENT_LIKE: no result with id {:?}, ignoring", id);
                return Arc::clone(state);
            };
            let results = state
                .results
                .iter()
                .enumerate()
                .map(|(i, item)| if i == index { item.liked() } else { item.clone() })
                .collect();
            Arc::new(SearchState {
                results,
                ..SearchState::clone(state)
            })
        }

        Action::IncrementPage => Arc::new(SearchState {
            page: state.page.saturating_add(1),
            ..SearchState::clone(state)
        }),
    }
}
