use crate::search::FilterModel;
use serde::{Deserialize, Serialize};

/// Search request as sent to a semantic search provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRequest {
    /// Free text, natural-language override already applied
    pub query: String,
    /// Campus display name, e.g. "Sharda University"
    pub campus: String,
    pub smart_search_active: bool,
    /// Inclusive [min, max] monthly price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<[u32; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
}

impl From<&FilterModel> for ProviderRequest {
    fn from(filter: &FilterModel) -> Self {
        Self {
            query: filter
                .effective_query()
                .map(|q| q.text.to_string())
                .unwrap_or_default(),
            campus: filter.campus.display_name().to_string(),
            smart_search_active: filter.assisted,
            price_range: filter.price_range.map(|r| [r.min(), r.max()]),
            amenities: (!filter.amenities.is_empty()).then(|| filter.amenities.clone()),
            property_type: filter.category.map(|c| c.label().to_string()),
        }
    }
}
