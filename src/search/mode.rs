use super::filter::FilterModel;
use serde::{Deserialize, Serialize};

/// Which backend answers a search request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPath {
    /// Deterministic keyword and filter matching over the catalog
    Catalog,
    /// External semantic-search provider
    Provider,
}

impl SearchPath {
    pub fn uses_provider(&self) -> bool {
        matches!(self, Self::Provider)
    }
}

/// Route a request. The provider is only worth calling in assisted mode and
/// when there is some text or constraint for it to reason about.
pub fn select_path(filter: &FilterModel) -> SearchPath {
    if !filter.assisted {
        return SearchPath::Catalog;
    }
    if filter.effective_query().is_none() && !filter.has_constraints() {
        return SearchPath::Catalog;
    }
    SearchPath::Provider
}
