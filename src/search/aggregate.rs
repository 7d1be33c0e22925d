use super::score::ScoreAssigner;
use crate::models::{Category, Listing, Photo, ProviderRecord, SearchResult};
use std::sync::Arc;

/// Characters of description kept on a result card
pub const DESCRIPTION_BUDGET: usize = 100;
pub const ELLIPSIS: &str = "...";

pub const DEFAULT_HINT: &str = "property photo";

pub const DEFAULT_HIGHLIGHTS: [&str; 3] = ["Verified Listing", "Popular Choice", "Near Campus"];

/// Raw hit from either search path, before formatting
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    pub description: String,
    pub amenities: Vec<String>,
    pub price: u32,
    pub location: String,
    pub photo: Photo,
    /// Known for catalog listings, absent for provider records
    pub category: Option<Category>,
    pub supplied_score: Option<u8>,
    pub highlights: Option<Vec<String>>,
    pub assisted: bool,
}

impl From<&Listing> for Candidate {
    fn from(listing: &Listing) -> Self {
        let curation = &listing.curation;
        Self {
            id: listing.id.clone(),
            title: listing.title.clone(),
            description: listing.description.clone(),
            amenities: listing.amenities.clone(),
            price: listing.price,
            location: listing.location.address.clone(),
            photo: listing.photo.clone(),
            category: Some(listing.category),
            supplied_score: curation.match_score,
            highlights: (!curation.highlights.is_empty()).then(|| curation.highlights.clone()),
            assisted: curation.featured,
        }
    }
}

impl From<ProviderRecord> for Candidate {
    fn from(record: ProviderRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            amenities: record.amenities,
            price: record.price,
            location: record.location,
            photo: record.photo_data_uri,
            category: None,
            supplied_score: record.match_score,
            highlights: record.highlights,
            assisted: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HintScope {
    Category(Category),
    /// Records without a category; `placeholder` narrows on stock photos
    Uncategorized { placeholder: Option<bool> },
}

#[derive(Debug, Clone, Copy)]
struct HintRule {
    scope: HintScope,
    /// Title must contain at least one of these (empty: no requirement)
    any_of: &'static [&'static str],
    /// Title must contain all of these
    all_of: &'static [&'static str],
    hint: &'static str,
}

const fn rule(
    scope: HintScope,
    any_of: &'static [&'static str],
    all_of: &'static [&'static str],
    hint: &'static str,
) -> HintRule {
    HintRule { scope, any_of, all_of, hint }
}

const UNCATEGORIZED: HintScope = HintScope::Uncategorized { placeholder: None };

/// Evaluated top-down, first match wins.
const IMAGE_HINTS: &[HintRule] = &[
    rule(HintScope::Category(Category::Pg), &[], &[], "hostel building"),
    rule(HintScope::Category(Category::Apartment), &["studio"], &[], "studio apartment"),
    rule(HintScope::Category(Category::Apartment), &["flat", "bhk"], &[], "apartment exterior"),
    rule(HintScope::Category(Category::Apartment), &[], &[], "apartment building"),
    rule(HintScope::Category(Category::Room), &["premium", "single"], &[], "bedroom interior"),
    rule(HintScope::Category(Category::Room), &[], &[], "room interior"),
    rule(HintScope::Category(Category::House), &[], &[], "house exterior"),
    rule(
        HintScope::Uncategorized { placeholder: Some(true) },
        &["pg", "hostel"],
        &[],
        "hostel building",
    ),
    rule(UNCATEGORIZED, &["pg", "hostel"], &[], "hostel room"),
    rule(UNCATEGORIZED, &[], &["apartment", "studio"], "studio apartment"),
    rule(UNCATEGORIZED, &["apartment"], &[], "apartment building"),
    rule(UNCATEGORIZED, &["room"], &[], "room interior"),
];

impl HintRule {
    fn applies(&self, category: Option<Category>, title: &str, placeholder: bool) -> bool {
        let in_scope = match (self.scope, category) {
            (HintScope::Category(wanted), Some(actual)) => wanted == actual,
            (HintScope::Uncategorized { placeholder: wanted }, None) => {
                wanted.map_or(true, |w| w == placeholder)
            }
            _ => false,
        };

        in_scope
            && (self.any_of.is_empty() || self.any_of.iter().any(|k| title.contains(k)))
            && self.all_of.iter().all(|k| title.contains(k))
    }
}

pub fn image_hint(category: Option<Category>, title: &str, photo: &Photo) -> &'static str {
    let title = title.to_lowercase();
    let placeholder = photo.is_placeholder();
    IMAGE_HINTS
        .iter()
        .find(|r| r.applies(category, &title, placeholder))
        .map_or(DEFAULT_HINT, |r| r.hint)
}

pub fn truncate_description(text: &str) -> String {
    let mut short: String = text.chars().take(DESCRIPTION_BUDGET).collect();
    short.push_str(ELLIPSIS);
    short
}

/// Turns candidates from either path into display records, attaching
/// session-stable scores.
#[derive(Clone)]
pub struct ResultAggregator {
    scores: Arc<ScoreAssigner>,
}

impl ResultAggregator {
    pub fn new(scores: Arc<ScoreAssigner>) -> Self {
        Self { scores }
    }

    pub fn scores(&self) -> &ScoreAssigner {
        &self.scores
    }

    pub fn format(&self, candidate: Candidate) -> SearchResult {
        let image_hint = image_hint(candidate.category, &candidate.title, &candidate.photo);
        let match_score = self.scores.score_with(&candidate.id, candidate.supplied_score);
        let highlights = candidate
            .highlights
            .unwrap_or_else(|| DEFAULT_HIGHLIGHTS.iter().map(|s| s.to_string()).collect());

        SearchResult {
            description: truncate_description(&candidate.description),
            id: candidate.id,
            title: candidate.title,
            amenities: candidate.amenities,
            price: candidate.price,
            location: candidate.location,
            image: candidate.photo,
            image_hint: image_hint.to_string(),
            match_score: Some(match_score),
            highlights: Some(highlights),
            assisted: candidate.assisted,
        }
    }

    pub fn format_all<I>(&self, candidates: I) -> Vec<SearchResult>
    where
        I: IntoIterator,
        I::Item: Into<Candidate>,
    {
        candidates.into_iter().map(|c| self.format(c.into())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::search::score::SequentialScores;

    fn url(raw: &str) -> Photo {
        Photo::Url(raw.to_string())
    }

    fn record(id: &str, title: &str, photo: &str) -> ProviderRecord {
        ProviderRecord {
            id: id.to_string(),
            title: title.to_string(),
            description: "x".repeat(150),
            amenities: vec!["wifi".into()],
            price: 7000,
            location: "Near Sharda University".into(),
            photo_data_uri: Photo::parse(photo).unwrap(),
            match_score: None,
            highlights: None,
        }
    }

    #[test]
    fn test_category_hints() {
        let photo = url("https://images.unsplash.com/a");
        assert_eq!(image_hint(Some(Category::Apartment), "Comet Studio Pads", &photo), "studio apartment");
        assert_eq!(image_hint(Some(Category::Apartment), "Polaris Group Flats", &photo), "apartment exterior");
        assert_eq!(image_hint(Some(Category::Apartment), "Lunar Living Suites", &photo), "apartment building");
        assert_eq!(image_hint(Some(Category::Room), "Zenith Premium Rooms", &photo), "bedroom interior");
        assert_eq!(image_hint(Some(Category::Room), "Nebula Nook Rooms", &photo), "room interior");
        assert_eq!(image_hint(Some(Category::Pg), "Venus Girls PG", &photo), "hostel building");
        assert_eq!(image_hint(Some(Category::House), "Cosmos Co-Living House", &photo), "house exterior");
    }

    #[test]
    fn test_uncategorized_hints_depend_on_photo_kind() {
        let stock = url("https://picsum.photos/seed/property3/600/400");
        let real = Photo::parse("data:image/jpeg;base64,/9j/4AAQ").unwrap();
        assert_eq!(image_hint(None, "Budget Hostel", &stock), "hostel building");
        assert_eq!(image_hint(None, "Budget Hostel", &real), "hostel room");
        assert_eq!(image_hint(None, "Studio Apartment by Gate 2", &real), "studio apartment");
        assert_eq!(image_hint(None, "Apartment by Gate 2", &stock), "apartment building");
        assert_eq!(image_hint(None, "Shared Room", &stock), "room interior");
        assert_eq!(image_hint(None, "Cozy Cottage", &stock), DEFAULT_HINT);
    }

    #[test]
    fn test_truncation_budget() {
        let short = truncate_description("Clean room");
        assert_eq!(short, "Clean room...");

        let long = truncate_description(&"é".repeat(140));
        assert_eq!(long.chars().count(), DESCRIPTION_BUDGET + ELLIPSIS.len());
        assert!(long.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_provider_records_get_default_highlights() {
        let aggregator = ResultAggregator::new(Arc::new(ScoreAssigner::new(SequentialScores::starting_at(80))));
        let result = aggregator.format(record("p1", "Budget Hostel", "https://picsum.photos/seed/p1/600/400").into());

        assert!(result.assisted);
        assert_eq!(result.match_score, Some(80));
        assert_eq!(result.image_hint, "hostel building");
        assert_eq!(result.highlights.unwrap(), DEFAULT_HIGHLIGHTS.to_vec());
    }

    #[test]
    fn test_supplied_highlights_and_score_pass_through() {
        let aggregator = ResultAggregator::new(Arc::new(ScoreAssigner::new(SequentialScores::starting_at(80))));
        let mut raw = record("p2", "Quiet Room", "https://images.unsplash.com/q");
        raw.match_score = Some(97);
        raw.highlights = Some(vec!["Library nearby".into()]);

        let result = aggregator.format(raw.into());
        assert_eq!(result.match_score, Some(97));
        assert_eq!(result.highlights.unwrap(), vec!["Library nearby"]);
    }

    #[test]
    fn test_catalog_listing_keeps_curation_and_score_on_reappearance() {
        let catalog = Catalog::builtin();
        let aggregator = ResultAggregator::new(Arc::new(ScoreAssigner::new(SequentialScores::starting_at(70))));
        let listing = catalog.get("6").unwrap();

        let first = aggregator.format(listing.into());
        assert_eq!(first.highlights.as_ref(), Some(&listing.curation.highlights));
        assert!(!first.assisted);

        let via_provider = aggregator.format(ProviderRecord::from(listing).into());
        assert_eq!(via_provider.match_score, first.match_score);
    }
}
