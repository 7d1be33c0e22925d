use super::traits::{RecommendationProvider, SemanticSearchProvider};
use super::types::ProviderRequest;
use crate::catalog::Catalog;
use crate::models::{Category, ProviderRecord};
use crate::search::{FilterModel, MatchEngine, PriceRange};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// In-process stand-in for the semantic search service: keyword and filter
/// matching over the catalog behind a simulated network delay.
pub struct CatalogProvider {
    catalog: Arc<Catalog>,
    latency: Duration,
    recommendation_count: usize,
}

impl CatalogProvider {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            latency: Duration::from_millis(300),
            recommendation_count: 4,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_recommendation_count(mut self, count: usize) -> Self {
        self.recommendation_count = count;
        self
    }

    fn filter_for(request: &ProviderRequest) -> Result<FilterModel> {
        let mut filter = FilterModel::default()
            .with_assisted(request.smart_search_active)
            .with_natural_language(request.query.clone())
            .with_amenities(request.amenities.iter().flatten());

        if let Some([min, max]) = request.price_range {
            filter = filter.with_price_range(PriceRange::new(min, max)?);
        }
        if let Some(kind) = request.property_type.as_deref() {
            if !kind.eq_ignore_ascii_case("any") {
                let category: Category = kind
                    .parse()
                    .with_context(|| format!("Unsupported property type in request: {}", kind))?;
                filter = filter.with_category(Some(category));
            }
        }
        Ok(filter)
    }
}

#[async_trait]
impl SemanticSearchProvider for CatalogProvider {
    async fn search(&self, request: &ProviderRequest) -> Result<Vec<ProviderRecord>> {
        debug!("Catalog search request: {:?}", request);
        tokio::time::sleep(self.latency).await;

        let filter = Self::filter_for(request)?;
        let records: Vec<ProviderRecord> = MatchEngine
            .run(&filter, &self.catalog)
            .into_iter()
            .map(ProviderRecord::from)
            .collect();

        info!("Catalog provider matched {} listings near {}", records.len(), request.campus);
        Ok(records)
    }

    fn source_name(&self) -> &'static str {
        "catalog"
    }
}

#[async_trait]
impl RecommendationProvider for CatalogProvider {
    async fn recommend(&self) -> Result<Vec<ProviderRecord>> {
        tokio::time::sleep(self.latency).await;
        Ok(self
            .catalog
            .listings()
            .iter()
            .take(self.recommendation_count)
            .map(ProviderRecord::from)
            .collect())
    }

    fn source_name(&self) -> &'static str {
        "catalog"
    }
}
