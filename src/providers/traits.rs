use super::types::ProviderRequest;
use crate::models::ProviderRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Semantic search backend consulted in assisted mode.
/// An empty vector means "no matches"; failures must be errors.
#[async_trait]
pub trait SemanticSearchProvider: Send + Sync {
    async fn search(&self, request: &ProviderRequest) -> Result<Vec<ProviderRecord>>;

    /// Get the name of the provider
    fn source_name(&self) -> &'static str;
}

/// Source of "curated for you" listings
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    async fn recommend(&self) -> Result<Vec<ProviderRecord>>;

    fn source_name(&self) -> &'static str;
}
