use crate::error::Result;
use crate::models::{Category, Curation, Listing, Location, Photo};
use std::path::Path;
use tracing::info;

/// Read-only snapshot of the listing catalog, in stored order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    listings: Vec<Listing>,
}

impl Catalog {
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    /// Load a catalog from a JSON array of listings
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let listings: Vec<Listing> = serde_json::from_str(&raw)?;
        info!("Loaded {} listings from {}", listings.len(), path.display());
        Ok(Self { listings })
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// The curated student-housing catalog around the Greater Noida campuses
    pub fn builtin() -> Self {
        const PG: &[&str] = &["wifi", "power backup", "food", "laundry", "cctv", "hot water", "security"];
        const APARTMENT: &[&str] = &["wifi", "kitchen", "ac", "laundry", "parking", "balcony"];
        const ROOM: &[&str] = &["wifi", "study desk", "fan", "shared kitchen", "shared bathroom"];
        const HOUSE: &[&str] = &["wifi", "kitchen", "laundry", "parking", "garden", "balcony", "tv"];

        let with = |base: &[&str], extra: &[&str]| -> Vec<String> {
            base.iter().chain(extra).map(|s| s.to_string()).collect()
        };

        let mut listings = vec![
            listing(
                "1",
                "Lunar Living Suites",
                "A spacious and well-furnished 2BHK apartment, perfect for students. Includes Wi-Fi, kitchen, and study area. Walking distance to StudentStay University Gate 1.",
                Category::Apartment,
                15_000,
                with(APARTMENT, &[]),
                ("Alpha II, Greater Noida", 28.4701, 77.4998),
                "photo-1586214601498-4dbcfd0bf2c8",
            ),
            listing(
                "2",
                "Orion Boys Hostel",
                "Secure and comfortable PG accommodation for boys. Daily meals, cleaning services, and high-speed internet. Close to campus amenities.",
                Category::Pg,
                8_000,
                with(PG, &[]),
                ("Knowledge Park III, Greater Noida", 28.4655, 77.5001),
                "photo-1566073771259-6a8506099945",
            ),
            listing(
                "3",
                "Venus Girls PG",
                "Affordable shared room in a girls-only PG. Safe environment, includes all basic amenities. Very close to the main StudentStay bus stop.",
                Category::Pg,
                6_500,
                with(&PG[..3], &["wardrobe"]),
                ("Omega I, Greater Noida", 28.4689, 77.4953),
                "photo-1600077625345-f401f4ba2fde",
            ),
            listing(
                "4",
                "Comet Studio Pads",
                "A fully independent studio apartment with a kitchenette and attached bathroom. Ideal for students seeking privacy. 24/7 water and electricity.",
                Category::Apartment,
                12_000,
                with(&[], &["kitchenette", "attached bathroom", "power backup", "parking"]),
                ("Gamma II, Greater Noida", 28.4720, 77.4900),
                "photo-1512918728675-ed5a9ecdebfd",
            ),
            listing(
                "5",
                "Nebula Nook Rooms",
                "A clean and simple single room for students on a budget. Shared bathroom and kitchen facilities. Good connectivity to the university.",
                Category::Room,
                4_500,
                with(ROOM, &[]),
                ("Knowledge Park I, Greater Noida", 28.4752, 77.4858),
                "photo-1505691938895-1758d7feb511",
            ),
            listing(
                "6",
                "Sirius Stays PG",
                "Premium PG accommodation with modern amenities including a gym, common recreation room, and study lounge. High-security and all meals included.",
                Category::Pg,
                12_500,
                with(PG, &["gym", "tv", "study lounge"]),
                ("Alpha I, Greater Noida", 28.4667, 77.4921),
                "photo-1615875605825-5eb9bb5d52ac",
            ),
            listing(
                "7",
                "Polaris Group Flats",
                "Compact 1BHK flat suitable for 2-3 students. Unfurnished, allowing you to set it up as per your needs. Close to local market and transport.",
                Category::Apartment,
                9_000,
                with(&[], &["parking", "balcony"]),
                ("Beta II, Greater Noida", 28.4601, 77.4880),
                "photo-1493809842364-78817add7ffb",
            ),
            listing(
                "8",
                "Aurora Girls Home",
                "Comfortable and safe PG for girls, with options for rooms with private balconies. Includes meals and Wi-Fi. Strict security measures.",
                Category::Pg,
                9_500,
                with(&PG[..4], &["balcony"]),
                ("Swarn Nagri, Greater Noida", 28.4588, 77.5020),
                "photo-1596224960249-be974914f8fd",
            ),
            listing(
                "9",
                "Cosmos Co-Living House",
                "A large 3BHK house ideal for a group of students. Features a large living area, multiple bathrooms, and a private garden. Close to university shuttle service.",
                Category::House,
                25_000,
                with(HOUSE, &[]),
                ("Chi IV, Greater Noida", 28.4550, 77.5100),
                "photo-1568605114967-8130f3a36994",
            ),
            listing(
                "10",
                "Zenith Premium Rooms",
                "High-quality single room with AC, attached bathroom, and study table. Includes daily housekeeping. Located in a quiet residential area.",
                Category::Room,
                9_000,
                with(ROOM, &["ac", "attached bathroom", "security"]),
                ("Delta I, Greater Noida", 28.4780, 77.4950),
                "photo-1592229505726-a92a2461e759",
            ),
            listing(
                "11",
                "Celestial View Apartments",
                "A stylish apartment on a high floor offering great city views. Comes with modular kitchen, modern fittings, and access to society amenities.",
                Category::Apartment,
                18_000,
                with(APARTMENT, &["gym", "tv"]),
                ("Sector 150, Noida", 28.4990, 77.4300),
                "photo-1580587771525-78b9dba3b914",
            ),
            listing(
                "12",
                "Pioneer Executive PG",
                "Top-tier PG for boys focusing on comfort and convenience. All meals, laundry, high-speed internet, and professional security included. Near major coaching centers.",
                Category::Pg,
                11_000,
                with(PG, &["study lounge"]),
                ("Knowledge Park II, Greater Noida", 28.4700, 77.4900),
                "photo-1623921333970-f0f9e139d71a",
            ),
        ];

        for (index, listing) in listings.iter_mut().enumerate() {
            listing.curation = Curation {
                match_score: None,
                highlights: curated_highlights(index),
                featured: index < 5,
            };
        }

        Self { listings }
    }
}

fn curated_highlights(index: usize) -> Vec<String> {
    let set: [&str; 3] = match index % 4 {
        0 => ["Great study environment", "Quiet area", "High-speed WiFi"],
        1 => ["Close to dining options", "Newly renovated", "Secure building"],
        2 => ["Popular choice", "Near campus shuttle", "Includes laundry"],
        _ => ["Budget friendly", "Well-maintained", "Good sunlight"],
    };
    set.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    title: &str,
    description: &str,
    category: Category,
    price: u32,
    amenities: Vec<String>,
    (address, latitude, longitude): (&str, f64, f64),
    unsplash_photo: &str,
) -> Listing {
    Listing {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        price,
        amenities,
        location: Location {
            address: address.to_string(),
            latitude,
            longitude,
        },
        photo: Photo::Url(format!(
            "https://images.unsplash.com/{}?fit=max&fm=jpg&q=80&w=1080",
            unsplash_photo
        )),
        curation: Curation::default(),
    }
}
