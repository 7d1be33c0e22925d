pub mod catalog;
pub mod http;
pub mod traits;
pub mod types;

pub use catalog::CatalogProvider;
pub use http::HttpProvider;
pub use traits::{RecommendationProvider, SemanticSearchProvider};
pub use types::ProviderRequest;
