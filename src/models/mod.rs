use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub mod chat;

pub use chat::{ChatContact, ChatMessage, ContactOrigin};

/// Kind of accommodation a listing offers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Apartment,
    House,
    Room,
    /// Paying-guest hostel with shared facilities
    #[serde(rename = "PG")]
    Pg,
}

impl Category {
    pub const ALL: [Category; 4] = [Self::Apartment, Self::House, Self::Room, Self::Pg];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::House => "House",
            Self::Room => "Room",
            Self::Pg => "PG",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "apartment" | "flat" => Ok(Self::Apartment),
            "house" => Ok(Self::House),
            "room" => Ok(Self::Room),
            "pg" | "hostel" => Ok(Self::Pg),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}

/// Location information for a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Photo reference: either a remote https URL or an inline base64 data URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Photo {
    Url(String),
    DataUri { mime: String, data: String },
}

const PLACEHOLDER_HOST: &str = "https://picsum.photos";

impl Photo {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.starts_with("https://") {
            return Ok(Self::Url(raw.to_string()));
        }

        let invalid = || Error::InvalidPhoto(raw.chars().take(48).collect());
        let rest = raw.strip_prefix("data:").ok_or_else(invalid)?;
        let (mime, data) = rest.split_once(";base64,").ok_or_else(invalid)?;
        if !mime.contains('/') || data.is_empty() {
            return Err(invalid());
        }

        Ok(Self::DataUri {
            mime: mime.to_string(),
            data: data.to_string(),
        })
    }

    /// Generic stock image rather than a photo of the actual listing
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Url(url) if url.starts_with(PLACEHOLDER_HOST))
    }
}

impl fmt::Display for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::DataUri { mime, data } => write!(f, "data:{};base64,{}", mime, data),
        }
    }
}

impl TryFrom<String> for Photo {
    type Error = Error;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(&raw)
    }
}

impl From<Photo> for String {
    fn from(photo: Photo) -> Self {
        photo.to_string()
    }
}

/// Editorial extras attached to a catalog listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Curation {
    #[serde(default)]
    pub match_score: Option<u8>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Core listing data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub category: Category,
    /// Monthly rent
    pub price: u32,
    pub amenities: Vec<String>,
    pub location: Location,
    pub photo: Photo,
    #[serde(default)]
    pub curation: Curation,
}

impl Listing {
    pub fn has_amenity(&self, tag: &str) -> bool {
        self.amenities.iter().any(|a| a.eq_ignore_ascii_case(tag.trim()))
    }
}

/// Listing record as exchanged with search and recommendation providers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub amenities: Vec<String>,
    pub price: u32,
    pub location: String,
    pub photo_data_uri: Photo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
}

impl From<&Listing> for ProviderRecord {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id.clone(),
            title: listing.title.clone(),
            description: listing.description.clone(),
            amenities: listing.amenities.clone(),
            price: listing.price,
            location: listing.location.address.clone(),
            photo_data_uri: listing.photo.clone(),
            match_score: listing.curation.match_score,
            highlights: if listing.curation.highlights.is_empty() {
                None
            } else {
                Some(listing.curation.highlights.clone())
            },
        }
    }
}

/// Display record for one search hit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub description: String,
    pub amenities: Vec<String>,
    pub price: u32,
    pub location: String,
    pub image: Photo,
    pub image_hint: String,
    pub match_score: Option<u8>,
    pub highlights: Option<Vec<String>>,
    pub assisted: bool,
}
