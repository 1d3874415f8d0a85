//! # Store
//!
//! Holds the current `SearchState` and is the single entry point for
//! changing it. One store per search session; drop it to discard the state.
//!
//! ```text
//! builder() ──→ dispatch() ──→ update() ──→ new Arc<SearchState> ──→ observers
//! ```
//!
//! `dispatch` takes `&mut self`, so dispatches are serialized by the borrow
//! checker and applied in call order. Share a store by passing `&mut Store`
//! (or wrapping it yourself); there is no global instance.
//!
//! ## Count semantics
//!
//! `count` is stored exactly as the caller passes it with `ApplyResults` /
//! `AddToResults`. Callers must agree on one meaning; `SearchSession` uses
//! the backend's reported total.

use std::sync::Arc;

use log::{debug, warn};

use crate::core::action::Action;
use crate::core::raw::RawAction;
use crate::core::state::SearchState;
use crate::core::update::update;

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&Arc<SearchState>) + Send>;

pub struct Store {
    state: Arc<SearchState>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer_id: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(SearchState::new())
    }

    /// Starts from an arbitrary state instead of the initial one.
    pub fn with_state(state: SearchState) -> Self {
        Self {
            state: Arc::new(state),
            observers: Vec::new(),
            next_observer_id: 0,
        }
    }

    /// Current state snapshot. Cheap: clones the `Arc`, not the state.
    pub fn state(&self) -> Arc<SearchState> {
        Arc::clone(&self.state)
    }

    /// Runs the reducer and replaces the held state. Observers are notified
    /// only when the reducer produced a new value; no-ops stay silent.
    pub fn dispatch(&mut self, action: Action) {
        debug!("dispatch {}", action.kind());
        let next = update(&self.state, action);
        if Arc::ptr_eq(&next, &self.state) {
            return;
        }
        self.state = next;
        self.notify();
    }

    /// Decodes and dispatches an untyped action. Malformed or unknown
    /// actions are logged and leave the state untouched.
    pub fn dispatch_raw(&mut self, raw: RawAction) {
        match Action::try_from(raw) {
            Ok(action) => self.dispatch(action),
            Err(e) => warn!("Dropping malformed action: {}", e),
        }
    }

    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&Arc<SearchState>) + Send + 'static,
    {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    fn notify(&mut self) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.state);
        }
    }
}
