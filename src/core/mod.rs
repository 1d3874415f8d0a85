//! # Core Search Logic
//!
//! This module contains the search state machine.
//! It knows nothing about rendering or any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • SearchState          │
//!                    │  • Action + builders    │
//!                    │  • update() (reducer)   │
//!                    │  • Store (dispatch)     │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ actions
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │  Session   │      │ Raw action │      │    CLI     │
//!     │  driver    │      │  decoder   │      │   host     │
//!     │ (+search)  │      │  (JSON)    │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `SearchState` and `ResultItem`
//! - [`action`]: the `Action` enum and its builder functions
//! - [`update`]: the reducer
//! - [`store`]: the `Store` holding state, with `dispatch` and observers
//! - [`raw`]: decoding untyped actions at the boundary
//! - [`session`]: fresh-search / next-page orchestration with stale-response guarding
//! - [`config`]: settings resolution

pub mod action;
pub mod config;
pub mod raw;
pub mod session;
pub mod state;
pub mod store;
pub mod update;

pub use action::Action;
pub use state::{ResultItem, SearchState};
pub use store::Store;
