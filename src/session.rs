use crate::catalog::Catalog;
use crate::config::Config;
use crate::enquiry::{ChatInbox, EnquiryRelay, MaterializeReport};
use crate::favorites::FavoritesStore;
use crate::providers::{
    CatalogProvider, HttpProvider, RecommendationProvider, SemanticSearchProvider,
};
use crate::search::{ScoreAssigner, SearchService};
use crate::storage::{DirectoryStore, SharedStore};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Everything one user session shares: the catalog, the persisted store and
/// the services built on top of them.
pub struct Session {
    pub catalog: Arc<Catalog>,
    pub store: SharedStore,
    pub search: SearchService,
    pub favorites: FavoritesStore,
    pub enquiries: EnquiryRelay,
}

impl Session {
    pub async fn open(config: &Config) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)
                .await
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
            None => Catalog::builtin(),
        };
        let catalog = Arc::new(catalog);

        let backend = DirectoryStore::open(&config.data_dir)
            .with_context(|| format!("Failed to open data directory {}", config.data_dir.display()))?;
        let store = SharedStore::new(Arc::new(backend));

        let (search_provider, recommender): (
            Arc<dyn SemanticSearchProvider>,
            Arc<dyn RecommendationProvider>,
        ) = match &config.provider_url {
            Some(url) => {
                info!("Using remote search provider at {}", url);
                let provider = Arc::new(HttpProvider::with_timeout(url.clone(), config.provider_timeout)?);
                (provider.clone(), provider)
            }
            None => {
                let provider = Arc::new(CatalogProvider::new(catalog.clone()));
                (provider.clone(), provider)
            }
        };

        let scores = match config.score_seed {
            Some(seed) => ScoreAssigner::seeded(seed),
            None => ScoreAssigner::from_entropy(),
        };

        Ok(Self::with_parts(
            catalog,
            store,
            search_provider,
            recommender,
            Arc::new(scores),
        ))
    }

    pub fn with_parts(
        catalog: Arc<Catalog>,
        store: SharedStore,
        search_provider: Arc<dyn SemanticSearchProvider>,
        recommender: Arc<dyn RecommendationProvider>,
        scores: Arc<ScoreAssigner>,
    ) -> Self {
        Self {
            search: SearchService::new(catalog.clone(), search_provider, recommender, scores),
            favorites: FavoritesStore::new(store.clone()),
            enquiries: EnquiryRelay::new(store.clone()),
            catalog,
            store,
        }
    }

    /// Open the chat inbox, turning any queued enquiries into threads
    pub fn open_inbox(&self) -> (ChatInbox, MaterializeReport) {
        ChatInbox::open(&self.enquiries)
    }
}
