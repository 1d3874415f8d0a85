//! # Search Backends
//!
//! Fetches pages of results from a remote service and converts them into
//! `ResultItem`s. Nothing here touches the store; the session driver feeds
//! what comes back into it as actions.

pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{ProviderError, SearchProvider};
pub use providers::UnsplashProvider;
pub use types::{PageRequest, ResultPage};
