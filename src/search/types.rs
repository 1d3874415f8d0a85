use crate::core::state::ResultItem;

/// Everything a provider needs to fetch one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<'a> {
    pub query: &'a str,
    /// Backend page number, 1-based.
    pub page: u32,
    pub per_page: u32,
}

/// One page of results, already converted to the store's vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPage {
    pub results: Vec<ResultItem>,
    /// Total matches the backend reports for the query.
    pub total: u64,
}
