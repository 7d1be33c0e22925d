use super::filter::FilterModel;
use crate::catalog::Catalog;
use crate::models::Listing;

/// Deterministic evaluator used whenever the provider is not consulted.
/// Every active predicate must hold; inactive ones are vacuously true.
/// Output keeps catalog order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchEngine;

impl MatchEngine {
    pub fn run<'a>(&self, filter: &FilterModel, catalog: &'a Catalog) -> Vec<&'a Listing> {
        catalog
            .listings()
            .iter()
            .filter(|listing| self.matches(filter, listing))
            .collect()
    }

    pub fn matches(&self, filter: &FilterModel, listing: &Listing) -> bool {
        matches_keyword(filter, listing)
            && matches_price(filter, listing)
            && matches_amenities(filter, listing)
            && matches_category(filter, listing)
    }
}

fn matches_keyword(filter: &FilterModel, listing: &Listing) -> bool {
    let Some(query) = filter.effective_query() else {
        return true;
    };
    let needle = query.text.to_lowercase();

    listing.title.to_lowercase().contains(&needle)
        || listing.description.to_lowercase().contains(&needle)
        || (query.from_override
            && listing
                .amenities
                .iter()
                .any(|a| a.to_lowercase().contains(&needle)))
}

fn matches_price(filter: &FilterModel, listing: &Listing) -> bool {
    filter
        .price_range
        .map_or(true, |range| range.contains(listing.price))
}

fn matches_amenities(filter: &FilterModel, listing: &Listing) -> bool {
    filter.amenities.iter().all(|tag| listing.has_amenity(tag))
}

fn matches_category(filter: &FilterModel, listing: &Listing) -> bool {
    filter.category.map_or(true, |c| c == listing.category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Curation, Location, Photo};
    use crate::search::filter::PriceRange;

    fn listing(id: &str, category: Category, price: u32, amenities: &[&str]) -> Listing {
        Listing {
            id: id.to_string(),
            title: format!("Listing {}", id),
            description: "Close to campus".to_string(),
            category,
            price,
            amenities: amenities.iter().map(|s| s.to_string()).collect(),
            location: Location {
                address: "Knowledge Park II".to_string(),
                latitude: 28.47,
                longitude: 77.49,
            },
            photo: Photo::Url(format!("https://picsum.photos/seed/property{}/600/400", id)),
            curation: Curation::default(),
        }
    }

    fn ids(listings: &[&Listing]) -> Vec<String> {
        listings.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let catalog = Catalog::from_listings(vec![
            listing("a", Category::Room, 5000, &["wifi", "fan"]),
            listing("b", Category::Room, 10_001, &["wifi"]),
            listing("c", Category::Room, 8000, &["fan"]),
            listing("d", Category::Room, 10_000, &["WiFi"]),
            listing("e", Category::Pg, 7000, &["wifi"]),
        ]);
        let filter = FilterModel::default()
            .with_assisted(false)
            .with_price_range(PriceRange::new(5000, 10_000).unwrap())
            .with_amenities(["wifi"])
            .with_category(Some(Category::Room));

        let hits = MatchEngine.run(&filter, &catalog);
        assert_eq!(ids(&hits), vec!["a", "d"]);
    }

    #[test]
    fn test_every_required_amenity_must_be_present() {
        let catalog = Catalog::from_listings(vec![
            listing("a", Category::Apartment, 9000, &["wifi", "parking"]),
            listing("b", Category::Apartment, 9000, &["wifi"]),
        ]);
        let filter = FilterModel::default().with_amenities(["wifi", "parking"]);
        assert_eq!(ids(&MatchEngine.run(&filter, &catalog)), vec!["a"]);
    }

    #[test]
    fn test_keyword_is_case_insensitive_on_title_and_description() {
        let catalog = Catalog::builtin();
        let by_title = FilterModel::new("STUDIO").with_assisted(false);
        assert_eq!(ids(&MatchEngine.run(&by_title, &catalog)), vec!["4"]);

        let by_description = FilterModel::new("private garden").with_assisted(false);
        assert_eq!(ids(&MatchEngine.run(&by_description, &catalog)), vec!["9"]);
    }

    #[test]
    fn test_amenity_text_only_matches_through_override() {
        let catalog = Catalog::from_listings(vec![listing("a", Category::Room, 5000, &["study desk"])]);

        let base = FilterModel::new("desk").with_assisted(false);
        assert!(MatchEngine.run(&base, &catalog).is_empty());

        let nl = FilterModel::default()
            .with_assisted(false)
            .with_natural_language("Desk");
        assert_eq!(ids(&MatchEngine.run(&nl, &catalog)), vec!["a"]);
    }

    #[test]
    fn test_no_constraints_returns_catalog_in_order() {
        let catalog = Catalog::builtin();
        let hits = MatchEngine.run(&FilterModel::default(), &catalog);
        let expected: Vec<String> = catalog.listings().iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids(&hits), expected);
    }
}
