//! Listing discovery: filter state, routing between the catalog matcher and
//! the semantic provider, result formatting and scoring.

pub mod aggregate;
pub mod filter;
pub mod matcher;
pub mod mode;
pub mod score;
pub mod service;

pub use aggregate::{image_hint, Candidate, ResultAggregator};
pub use filter::{Campus, EffectiveQuery, FilterModel, PriceRange, QuickFilter, QUICK_FILTERS};
pub use matcher::MatchEngine;
pub use mode::{select_path, SearchPath};
pub use score::{RandomScores, ScoreAssigner, ScoreGenerator, SequentialScores};
pub use service::{SearchOutcome, SearchService, SearchState};
