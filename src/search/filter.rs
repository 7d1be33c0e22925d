use crate::error::{Error, Result};
use crate::models::Category;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Campus or area the search is scoped to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Campus {
    #[default]
    ShardaUniversity,
    GlaUniversity,
    GalgotiasUniversity,
    DelhiUniversityNorth,
    DelhiUniversitySouth,
    GenericArea,
}

impl Campus {
    pub const ALL: [Campus; 6] = [
        Self::ShardaUniversity,
        Self::GlaUniversity,
        Self::GalgotiasUniversity,
        Self::DelhiUniversityNorth,
        Self::DelhiUniversitySouth,
        Self::GenericArea,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::ShardaUniversity => "sharda_university",
            Self::GlaUniversity => "gla_university",
            Self::GalgotiasUniversity => "galgotias_university",
            Self::DelhiUniversityNorth => "delhi_university_north",
            Self::DelhiUniversitySouth => "delhi_university_south",
            Self::GenericArea => "generic_area",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ShardaUniversity => "Sharda University",
            Self::GlaUniversity => "GLA University, Mathura",
            Self::GalgotiasUniversity => "Galgotias University",
            Self::DelhiUniversityNorth => "Delhi University (North)",
            Self::DelhiUniversitySouth => "Delhi University (South)",
            Self::GenericArea => "Any Area (Generic)",
        }
    }
}

impl fmt::Display for Campus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Campus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.slug() == wanted || c.display_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownCampus(s.to_string()))
    }
}

/// Inclusive monthly price bounds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceRange {
    min: u32,
    max: u32,
}

impl PriceRange {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidPriceRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, price: u32) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Price range the advanced filter panel opens with
pub const DEFAULT_PANEL_RANGE: (u32, u32) = (5_000, 20_000);

/// Price range applied to plain search-bar queries
pub const SEARCH_BAR_RANGE: (u32, u32) = (1_000, 50_000);

/// Text the keyword predicate matches against, and where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveQuery<'a> {
    pub text: &'a str,
    pub from_override: bool,
}

/// One search request: free text, campus, mode and structured constraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterModel {
    pub query: String,
    /// Natural-language override from the advanced filter panel
    pub natural_language: Option<String>,
    pub campus: Campus,
    pub assisted: bool,
    pub price_range: Option<PriceRange>,
    /// Required amenity tags, lowercase; empty means no constraint
    pub amenities: Vec<String>,
    /// `None` means any property type
    pub category: Option<Category>,
}

impl Default for FilterModel {
    fn default() -> Self {
        Self {
            query: String::new(),
            natural_language: None,
            campus: Campus::default(),
            assisted: true,
            price_range: None,
            amenities: Vec::new(),
            category: None,
        }
    }
}

impl FilterModel {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Request issued by the main search bar: the query doubles as the
    /// natural-language override and the wide default price range applies.
    pub fn from_search_bar(query: impl Into<String>, campus: Campus) -> Self {
        let query = query.into();
        Self {
            natural_language: Some(query.clone()),
            query,
            campus,
            assisted: true,
            price_range: Some(PriceRange {
                min: SEARCH_BAR_RANGE.0,
                max: SEARCH_BAR_RANGE.1,
            }),
            amenities: Vec::new(),
            category: None,
        }
    }

    pub fn with_campus(mut self, campus: Campus) -> Self {
        self.campus = campus;
        self
    }

    pub fn with_assisted(mut self, assisted: bool) -> Self {
        self.assisted = assisted;
        self
    }

    pub fn with_natural_language(mut self, text: impl Into<String>) -> Self {
        self.natural_language = Some(text.into());
        self
    }

    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in amenities {
            let tag = tag.as_ref().trim().to_lowercase();
            if !tag.is_empty() && !self.amenities.contains(&tag) {
                self.amenities.push(tag);
            }
        }
        self
    }

    /// Override wins over the base query; blank text counts as absent.
    pub fn effective_query(&self) -> Option<EffectiveQuery<'_>> {
        if let Some(text) = self.natural_language.as_deref().filter(|t| !t.trim().is_empty()) {
            return Some(EffectiveQuery {
                text: text.trim(),
                from_override: true,
            });
        }
        let base = self.query.trim();
        (!base.is_empty()).then_some(EffectiveQuery {
            text: base,
            from_override: false,
        })
    }

    /// Any structured constraint beyond the free text
    pub fn has_constraints(&self) -> bool {
        self.price_range.is_some() || !self.amenities.is_empty() || self.category.is_some()
    }

    /// Badge count shown next to the advanced filter panel
    pub fn active_filter_count(&self) -> usize {
        let mut count = 0;
        if let Some(range) = self.price_range {
            if (range.min, range.max) != DEFAULT_PANEL_RANGE {
                count += 1;
            }
        }
        count += self.amenities.len();
        if self.category.is_some() {
            count += 1;
        }
        if self
            .natural_language
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
        {
            count += 1;
        }
        count
    }
}

/// One-click preset shown under the search bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickFilter {
    pub label: &'static str,
    pub query: &'static str,
}

pub const QUICK_FILTERS: [QuickFilter; 5] = [
    QuickFilter { label: "Below ₹8k", query: "Properties below 8000 per month" },
    QuickFilter { label: "Near Campus", query: "Properties near main campus" },
    QuickFilter { label: "AC Rooms", query: "Rooms with AC" },
    QuickFilter { label: "Parking", query: "Properties with parking" },
    QuickFilter { label: "For Girls", query: "PG for girls" },
];

impl QuickFilter {
    pub fn to_filter(&self, campus: Campus) -> FilterModel {
        FilterModel::from_search_bar(self.query, campus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_range_rejects_inverted_bounds() {
        assert!(PriceRange::new(6000, 5000).is_err());
        let range = PriceRange::new(5000, 10_000).unwrap();
        assert!(range.contains(5000));
        assert!(range.contains(10_000));
        assert!(!range.contains(10_001));
        assert!(!range.contains(4999));
    }

    #[test]
    fn test_override_takes_priority() {
        let filter = FilterModel::new("studio").with_natural_language("  wifi  ");
        let query = filter.effective_query().unwrap();
        assert_eq!(query.text, "wifi");
        assert!(query.from_override);

        let blank_override = FilterModel::new("studio").with_natural_language("   ");
        let query = blank_override.effective_query().unwrap();
        assert_eq!(query.text, "studio");
        assert!(!query.from_override);

        assert!(FilterModel::new("  ").effective_query().is_none());
    }

    #[test]
    fn test_amenities_are_normalized() {
        let filter = FilterModel::default().with_amenities(["WiFi", " wifi", "Parking", ""]);
        assert_eq!(filter.amenities, vec!["wifi", "parking"]);
    }

    #[test]
    fn test_active_filter_count() {
        let untouched = FilterModel::default()
            .with_price_range(PriceRange::new(DEFAULT_PANEL_RANGE.0, DEFAULT_PANEL_RANGE.1).unwrap());
        assert_eq!(untouched.active_filter_count(), 0);

        let busy = FilterModel::default()
            .with_price_range(PriceRange::new(0, 6000).unwrap())
            .with_amenities(["wifi", "ac"])
            .with_category(Some(Category::Room))
            .with_natural_language("quiet");
        assert_eq!(busy.active_filter_count(), 5);
    }

    #[test]
    fn test_campus_parsing() {
        assert_eq!("gla_university".parse::<Campus>().unwrap(), Campus::GlaUniversity);
        assert_eq!("galgotias university".parse::<Campus>().unwrap(), Campus::GalgotiasUniversity);
        assert!("mars_campus".parse::<Campus>().is_err());
    }

    #[test]
    fn test_quick_filter_expands_to_search_bar_request() {
        let filter = QUICK_FILTERS[2].to_filter(Campus::ShardaUniversity);
        assert_eq!(filter.natural_language.as_deref(), Some("Rooms with AC"));
        assert_eq!(filter.price_range, Some(PriceRange::new(1000, 50_000).unwrap()));
        assert!(filter.assisted);
    }
}
