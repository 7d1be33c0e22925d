use super::aggregate::{Candidate, ResultAggregator};
use super::filter::FilterModel;
use super::matcher::MatchEngine;
use super::mode::{select_path, SearchPath};
use super::score::ScoreAssigner;
use crate::catalog::Catalog;
use crate::models::SearchResult;
use crate::providers::{ProviderRequest, RecommendationProvider, SemanticSearchProvider};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Listings shown before the user has searched
pub const INITIAL_LISTING_COUNT: usize = 8;

/// Result of one search or recommendation request
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Results(Vec<SearchResult>),
    /// Request succeeded but nothing matched
    NoMatch,
    /// Provider failed; nothing to show
    Failed(String),
}

impl SearchOutcome {
    fn from_results(results: Vec<SearchResult>) -> Self {
        if results.is_empty() {
            Self::NoMatch
        } else {
            Self::Results(results)
        }
    }

    pub fn results(&self) -> &[SearchResult] {
        match self {
            Self::Results(results) => results,
            Self::NoMatch | Self::Failed(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What the result list currently shows and which request produced it
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub seq: u64,
    pub path: SearchPath,
    pub outcome: SearchOutcome,
}

/// Entry point of the discovery pipeline. Routes each request, formats and
/// scores the hits, and keeps only the newest request's results on display.
pub struct SearchService {
    catalog: Arc<Catalog>,
    search_provider: Arc<dyn SemanticSearchProvider>,
    recommender: Arc<dyn RecommendationProvider>,
    aggregator: ResultAggregator,
    issued: AtomicU64,
    displayed: Mutex<Option<SearchState>>,
}

impl SearchService {
    pub fn new(
        catalog: Arc<Catalog>,
        search_provider: Arc<dyn SemanticSearchProvider>,
        recommender: Arc<dyn RecommendationProvider>,
        scores: Arc<ScoreAssigner>,
    ) -> Self {
        Self {
            catalog,
            search_provider,
            recommender,
            aggregator: ResultAggregator::new(scores),
            issued: AtomicU64::new(0),
            displayed: Mutex::new(None),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn scores(&self) -> &ScoreAssigner {
        self.aggregator.scores()
    }

    /// Run a search. Returns the new display state, or `None` when a newer
    /// request was issued while this one was in flight.
    pub async fn search(&self, filter: &FilterModel) -> Option<SearchState> {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let path = select_path(filter);
        debug!("Search #{} routed to {:?}", seq, path);

        let outcome = match path {
            SearchPath::Catalog => self.match_catalog(filter),
            SearchPath::Provider => self.ask_provider(filter).await,
        };

        self.publish(SearchState { seq, path, outcome })
    }

    fn match_catalog(&self, filter: &FilterModel) -> SearchOutcome {
        let hits = MatchEngine.run(filter, &self.catalog);
        info!("Catalog matched {} of {} listings", hits.len(), self.catalog.len());
        SearchOutcome::from_results(self.aggregator.format_all(hits))
    }

    async fn ask_provider(&self, filter: &FilterModel) -> SearchOutcome {
        let request = ProviderRequest::from(filter);
        match self.search_provider.search(&request).await {
            Ok(records) => {
                info!(
                    "{} provider returned {} listings",
                    self.search_provider.source_name(),
                    records.len()
                );
                SearchOutcome::from_results(self.aggregator.format_all(records))
            }
            Err(e) => {
                warn!("Search provider failed: {:#}", e);
                SearchOutcome::Failed(format!("{:#}", e))
            }
        }
    }

    fn publish(&self, state: SearchState) -> Option<SearchState> {
        let mut displayed = self.displayed.lock().unwrap_or_else(PoisonError::into_inner);
        let latest = self.issued.load(Ordering::SeqCst);
        if state.seq != latest {
            debug!("Discarding stale search #{} (latest #{})", state.seq, latest);
            return None;
        }
        *displayed = Some(state.clone());
        Some(state)
    }

    /// Currently displayed state, if any search has completed
    pub fn displayed(&self) -> Option<SearchState> {
        self.displayed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// "Curated for you" listings. Never touches the displayed search state.
    pub async fn recommendations(&self) -> SearchOutcome {
        match self.recommender.recommend().await {
            Ok(records) => SearchOutcome::from_results(self.aggregator.format_all(records)),
            Err(e) => {
                warn!("Recommendation provider failed: {:#}", e);
                SearchOutcome::Failed(format!("{:#}", e))
            }
        }
    }

    /// Leading catalog listings shown before any search
    pub fn initial_listings(&self) -> Vec<SearchResult> {
        self.aggregator.format_all(
            self.catalog
                .listings()
                .iter()
                .take(INITIAL_LISTING_COUNT)
                .map(Candidate::from),
        )
    }
}
