//! # Search Session
//!
//! Drives a `Store` through a search: fresh queries, next pages, likes.
//! Network fetches happen outside; the session only decides what to ask
//! for and turns whatever comes back into actions.
//!
//! Each fetch is described by a `FetchTicket`. A ticket carries the query
//! generation it was issued under, so a response that lands after the
//! user has moved on to another query is recognized and dropped instead
//! of being mixed into the new results.
//!
//! ```text
//! begin_search("cats") ──→ ticket(gen 1, page 1) ──→ provider ──→ complete()
//! begin_search("dogs") ──→ ticket(gen 2, page 1)        │
//!                                       gen 1 response ─┘  → Stale, dropped
//! ```

use log::{debug, info, warn};

use crate::core::action;
use crate::core::store::Store;
use crate::search::{PageRequest, ProviderError, ResultPage, SearchProvider};

pub const DEFAULT_PER_PAGE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// First page of a new query; replaces results.
    Fresh,
    /// Following page of the current query; appends results.
    NextPage,
}

/// One outstanding fetch. Hand `query`/`page` to the provider, then give
/// the ticket back to [`SearchSession::complete`] with the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub kind: FetchKind,
    pub query: String,
    pub page: u32,
    pub per_page: u32,
}

impl FetchTicket {
    pub fn request(&self) -> PageRequest<'_> {
        PageRequest {
            query: &self.query,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Results were merged into the store.
    Applied,
    /// The ticket belongs to a superseded query; nothing was dispatched.
    Stale,
    /// The fetch failed; the matching loading flag was cleared.
    Failed(ProviderError),
}

pub struct SearchSession {
    store: Store,
    per_page: u32,
    generation: u64,
    /// `state.page` at the moment the current query's first page landed.
    /// Backend page = `state.page - page_origin + 1`.
    page_origin: u32,
    /// Whether the current generation's first page has landed. Until it
    /// has, the held results belong to an older query.
    fresh_applied: bool,
}

impl SearchSession {
    pub fn new(store: Store, per_page: u32) -> Self {
        Self {
            store,
            per_page: per_page.max(1),
            generation: 0,
            page_origin: 1,
            fresh_applied: false,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Starts a fresh query. Returns `None` for a blank query.
    pub fn begin_search(&mut self, query: &str) -> Option<FetchTicket> {
        let query = query.trim();
        if query.is_empty() {
            warn!("Ignoring blank search query");
            return None;
        }

        self.generation += 1;
        self.fresh_applied = false;
        if self.store.state().is_searching_for_next_page {
            // The in-flight next page belongs to the old query.
            self.store.dispatch(action::set_next_page_search_status(false));
        }
        self.store.dispatch(action::set_query(query));
        self.store.dispatch(action::set_searching_status(true));

        info!("Search #{} started: {:?}", self.generation, query);
        Some(FetchTicket {
            generation: self.generation,
            kind: FetchKind::Fresh,
            query: query.to_string(),
            page: 1,
            per_page: self.per_page,
        })
    }

    /// Asks for the page after the last one loaded. Returns `None` until the
    /// current query's first page has landed, while any fetch is in flight,
    /// or when every reported result is already loaded.
    pub fn begin_next_page(&mut self) -> Option<FetchTicket> {
        if !self.fresh_applied {
            debug!("Next page skipped: no first page for search #{}", self.generation);
            return None;
        }
        let state = self.store.state();
        if state.is_on_init || state.is_busy() {
            debug!(
                "Next page skipped: on_init={}, searching={}, next_page={}",
                state.is_on_init, state.is_searching, state.is_searching_for_next_page
            );
            return None;
        }
        if state.is_exhausted() {
            debug!("Next page skipped: all {} results loaded", state.count);
            return None;
        }

        let page = state.page.saturating_sub(self.page_origin) + 2;
        self.store.dispatch(action::set_next_page_search_status(true));
        debug!("Next page requested: backend page {}", page);
        Some(FetchTicket {
            generation: self.generation,
            kind: FetchKind::NextPage,
            query: state.query.clone(),
            page,
            per_page: self.per_page,
        })
    }

    /// Feeds a fetch outcome back into the store.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<ResultPage, ProviderError>,
    ) -> Completion {
        if ticket.generation != self.generation {
            debug!(
                "Discarding stale {:?} response for {:?} (generation {} != {})",
                ticket.kind, ticket.query, ticket.generation, self.generation
            );
            return Completion::Stale;
        }

        match (ticket.kind, outcome) {
            (FetchKind::Fresh, Ok(page)) => {
                let on_init = self.store.state().is_on_init;
                self.page_origin = self.store.state().page;
                self.store.dispatch(action::apply_results(page.results, page.total));
                self.fresh_applied = true;
                if on_init {
                    self.store.dispatch(action::toggle_on_init());
                }
                self.store.dispatch(action::set_searching_status(false));
                Completion::Applied
            }
            (FetchKind::NextPage, Ok(page)) => {
                self.store.dispatch(action::increment_page());
                self.store.dispatch(action::add_to_results(page.results, page.total));
                self.store.dispatch(action::set_next_page_search_status(false));
                Completion::Applied
            }
            (FetchKind::Fresh, Err(e)) => {
                warn!("Search for {:?} failed: {}", ticket.query, e);
                self.store.dispatch(action::set_searching_status(false));
                Completion::Failed(e)
            }
            (FetchKind::NextPage, Err(e)) => {
                warn!("Page {} for {:?} failed: {}", ticket.page, ticket.query, e);
                self.store.dispatch(action::set_next_page_search_status(false));
                Completion::Failed(e)
            }
        }
    }

    pub fn like(&mut self, id: &str) {
        self.store.dispatch(action::increment_like(id));
    }

    /// Runs a fresh search end to end against `provider`.
    pub async fn search<P>(&mut self, provider: &P, query: &str) -> Option<Completion>
    where
        P: SearchProvider + ?Sized,
    {
        let ticket = self.begin_search(query)?;
        let outcome = provider.fetch_page(ticket.request()).await;
        Some(self.complete(ticket, outcome))
    }

    /// Loads the next page end to end. `None` if no page was due.
    pub async fn load_next_page<P>(&mut self, provider: &P) -> Option<Completion>
    where
        P: SearchProvider + ?Sized,
    {
        let ticket = self.begin_next_page()?;
        let outcome = provider.fetch_page(ticket.request()).await;
        Some(self.complete(ticket, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedProvider, item, page_of};

    fn session() -> SearchSession {
        SearchSession::new(Store::new(), 2)
    }

    #[test]
    fn test_blank_query_is_ignored() {
        let mut s = session();
        assert!(s.begin_search("   ").is_none());
        assert_eq!(s.store().state().query, "");
        assert!(!s.store().state().is_searching);
    }

    #[test]
    fn test_begin_search_sets_query_and_flag() {
        let mut s = session();
        let ticket = s.begin_search("  cats ").unwrap();
        assert_eq!(ticket.query, "cats");
        assert_eq!(ticket.page, 1);
        assert_eq!(ticket.per_page, 2);
        assert_eq!(ticket.kind, FetchKind::Fresh);
        let state = s.store().state();
        assert_eq!(state.query, "cats");
        assert!(state.is_searching);
        assert!(state.is_on_init);
    }

    #[test]
    fn test_fresh_completion_applies_and_leaves_init() {
        let mut s = session();
        let ticket = s.begin_search("cats").unwrap();
        let done = s.complete(ticket, Ok(page_of(&["a", "b"], 5)));
        assert_eq!(done, Completion::Applied);

        let state = s.store().state();
        assert_eq!(state.results.len(), 2);
        assert_eq!(state.count, 5);
        assert!(!state.is_on_init);
        assert!(!state.is_searching);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_second_search_keeps_on_init_false() {
        let mut s = session();
        let t = s.begin_search("cats").unwrap();
        s.complete(t, Ok(page_of(&["a"], 1)));
        let t = s.begin_search("dogs").unwrap();
        s.complete(t, Ok(page_of(&["d"], 1)));
        assert!(!s.store().state().is_on_init);
        assert_eq!(s.store().state().results, vec![item("d", 0)]);
    }

    #[test]
    fn test_next_page_not_due_before_first_search() {
        let mut s = session();
        assert!(s.begin_next_page().is_none());
    }

    #[test]
    fn test_next_page_not_due_while_searching() {
        let mut s = session();
        let t = s.begin_search("cats").unwrap();
        s.complete(t, Ok(page_of(&["a", "b"], 10)));
        let _t2 = s.begin_search("cats again").unwrap();
        assert!(s.begin_next_page().is_none());
    }

    #[test]
    fn test_next_page_appends_and_advances_cursor() {
        let mut s = session();
        let t = s.begin_search("cats").unwrap();
        s.complete(t, Ok(page_of(&["a", "b"], 5)));

        let t = s.begin_next_page().unwrap();
        assert_eq!(t.page, 2);
        assert_eq!(t.query, "cats");
        assert!(s.store().state().is_searching_for_next_page);
        assert!(s.begin_next_page().is_none());

        s.complete(t, Ok(page_of(&["c", "d"], 5)));
        let state = s.store().state();
        let ids: Vec<&str> = state.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(state.page, 2);
        assert!(!state.is_searching_for_next_page);

        let t = s.begin_next_page().unwrap();
        assert_eq!(t.page, 3);
    }

    #[test]
    fn test_page_numbers_restart_for_new_query() {
        let mut s = session();
        let t = s.begin_search("cats").unwrap();
        s.complete(t, Ok(page_of(&["a", "b"], 6)));
        let t = s.begin_next_page().unwrap();
        s.complete(t, Ok(page_of(&["c", "d"], 6)));
        assert_eq!(s.store().state().page, 2);

        let t = s.begin_search("dogs").unwrap();
        s.complete(t, Ok(page_of(&["e", "f"], 6)));
        let t = s.begin_next_page().unwrap();
        assert_eq!(t.page, 2);
    }

    #[test]
    fn test_next_page_not_due_when_exhausted() {
        let mut s = session();
        let t = s.begin_search("cats").unwrap();
        s.complete(t, Ok(page_of(&["a", "b"], 2)));
        assert!(s.begin_next_page().is_none());
    }

    #[test]
    fn test_stale_fresh_response_is_dropped() {
        let mut s = session();
        let old = s.begin_search("cats").unwrap();
        let new = s.begin_search("dogs").unwrap();

        assert_eq!(s.complete(old, Ok(page_of(&["cat"], 1))), Completion::Stale);
        assert!(s.store().state().results.is_empty());
        assert!(s.store().state().is_searching);

        assert_eq!(s.complete(new, Ok(page_of(&["dog"], 1))), Completion::Applied);
        assert_eq!(s.store().state().results, vec![item("dog", 0)]);
    }

    #[test]
    fn test_stale_next_page_is_dropped_and_flag_cleared() {
        let mut s = session();
        let t = s.begin_search("cats").unwrap();
        s.complete(t, Ok(page_of(&["a", "b"], 10)));
        let next = s.begin_next_page().unwrap();

        let fresh = s.begin_search("dogs").unwrap();
        assert!(!s.store().state().is_searching_for_next_page);
        assert_eq!(s.complete(next, Ok(page_of(&["c"], 10))), Completion::Stale);
        assert_eq!(s.store().state().page, 1);

        s.complete(fresh, Ok(page_of(&["d"], 1)));
        assert_eq!(s.store().state().results, vec![item("d", 0)]);
    }

    #[test]
    fn test_failed_search_clears_only_its_flag() {
        let mut s = session();
        let t = s.begin_search("cats").unwrap();
        let err = ProviderError::Network("timeout".into());
        assert_eq!(s.complete(t, Err(err.clone())), Completion::Failed(err));
        let state = s.store().state();
        assert!(!state.is_searching);
        assert!(state.is_on_init);
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_failed_next_page_keeps_cursor() {
        let mut s = session();
        let t = s.begin_search("cats").unwrap();
        s.complete(t, Ok(page_of(&["a", "b"], 10)));
        let t = s.begin_next_page().unwrap();
        s.complete(
            t,
            Err(ProviderError::Api {
                status: 500,
                message: "boom".into(),
            }),
        );

        let state = s.store().state();
        assert_eq!(state.page, 1);
        assert!(!state.is_searching_for_next_page);
        assert_eq!(s.begin_next_page().unwrap().page, 2);
    }

    #[test]
    fn test_next_page_refused_after_failed_fresh_search() {
        let mut s = session();
        let t = s.begin_search("cats").unwrap();
        s.complete(t, Ok(page_of(&["a", "b"], 10)));
        let t = s.begin_next_page().unwrap();
        s.complete(t, Ok(page_of(&["c", "d"], 10)));

        let t = s.begin_search("dogs").unwrap();
        s.complete(t, Err(ProviderError::Network("timeout".into())));

        assert!(s.begin_next_page().is_none());
        let state = s.store().state();
        let ids: Vec<&str> = state.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert!(!state.is_searching_for_next_page);

        // A successful retry of the new query re-enables paging from page 2.
        let t = s.begin_search("dogs").unwrap();
        s.complete(t, Ok(page_of(&["e", "f"], 10)));
        assert_eq!(s.begin_next_page().unwrap().page, 2);
    }

    #[test]
    fn test_like_hits_and_misses() {
        let mut s = session();
        let t = s.begin_search("cats").unwrap();
        s.complete(t, Ok(page_of(&["a"], 1)));
        s.like("a");
        s.like("nope");
        assert_eq!(s.store().state().results[0].likes, 1);
    }

    #[test]
    fn test_search_and_next_page_through_provider() {
        let provider = ScriptedProvider::new(vec![
            Ok(page_of(&["a", "b"], 4)),
            Ok(page_of(&["c", "d"], 4)),
        ]);
        let mut s = session();

        let done = tokio_test::block_on(s.search(&provider, "cats"));
        assert_eq!(done, Some(Completion::Applied));
        let done = tokio_test::block_on(s.load_next_page(&provider));
        assert_eq!(done, Some(Completion::Applied));
        let done = tokio_test::block_on(s.load_next_page(&provider));
        assert_eq!(done, None);

        assert_eq!(s.store().state().results.len(), 4);
        assert_eq!(
            provider.requests(),
            vec![("cats".to_string(), 1), ("cats".to_string(), 2)]
        );
    }
}
