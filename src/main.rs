use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use stay_scout::config::Config;
use stay_scout::enquiry::EnquiryForm;
use stay_scout::models::{Category, SearchResult};
use stay_scout::search::{Campus, FilterModel, PriceRange, SearchOutcome, QUICK_FILTERS};
use stay_scout::Session;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stay-scout")]
#[command(about = "Find student housing near your campus")]
#[command(version)]
struct Cli {
    /// Directory holding favorites and pending enquiries
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Base URL of a remote search provider
    #[arg(long, global = true)]
    provider_url: Option<String>,

    /// Seed for synthetic match scores
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// JSON file replacing the built-in catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search listings
    Search {
        /// What you are looking for, e.g. "single room with AC"
        query: Option<String>,

        #[arg(short, long, default_value = "sharda_university")]
        campus: Campus,

        /// Plain keyword and filter matching, no assisted search
        #[arg(long)]
        basic: bool,

        #[arg(long)]
        min_price: Option<u32>,

        #[arg(long)]
        max_price: Option<u32>,

        /// Required amenity; repeat for several
        #[arg(short, long = "amenity")]
        amenities: Vec<String>,

        /// apartment, house, room or pg
        #[arg(short = 't', long = "type")]
        category: Option<Category>,

        /// Use a quick filter preset (1-5) instead of a query
        #[arg(short, long)]
        quick: Option<usize>,
    },

    /// Show curated recommendations
    Recommend,

    /// Add or remove a listing from favorites
    Favorite {
        id: String,
    },

    /// List favorite listings
    Favorites,

    /// Send an enquiry about a listing
    Enquire {
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        #[arg(short, long)]
        message: String,
    },

    /// Open the inbox, turning pending enquiries into conversations
    Inbox,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(url) = cli.provider_url {
        config.provider_url = Some(url);
    }
    if let Some(seed) = cli.seed {
        config.score_seed = Some(seed);
    }
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }
    if !config.map_display_enabled() {
        warn!("STAY_SCOUT_MAPS_API_KEY is not set, map display is disabled");
    }

    let session = Session::open(&config).await?;

    match cli.command {
        Commands::Search {
            query,
            campus,
            basic,
            min_price,
            max_price,
            amenities,
            category,
            quick,
        } => {
            let filter = match quick {
                Some(n) => {
                    let preset = n
                        .checked_sub(1)
                        .and_then(|i| QUICK_FILTERS.get(i))
                        .with_context(|| format!("Quick filter must be between 1 and {}", QUICK_FILTERS.len()))?;
                    info!("Quick filter: {}", preset.label);
                    preset.to_filter(campus).with_assisted(!basic)
                }
                None => {
                    let mut filter = FilterModel::new(query.unwrap_or_default())
                        .with_campus(campus)
                        .with_assisted(!basic)
                        .with_amenities(amenities)
                        .with_category(category);
                    if min_price.is_some() || max_price.is_some() {
                        let range = PriceRange::new(min_price.unwrap_or(0), max_price.unwrap_or(u32::MAX))?;
                        filter = filter.with_price_range(range);
                    }
                    filter
                }
            };

            info!("Searching near {}", filter.campus.display_name());
            match session.search.search(&filter).await {
                Some(state) => print_outcome(&state.outcome),
                None => warn!("Search superseded by a newer request"),
            }
        }

        Commands::Recommend => {
            println!("Curated for you\n");
            print_outcome(&session.search.recommendations().await);
        }

        Commands::Favorite { id } => {
            let listing = session
                .catalog
                .get(&id)
                .with_context(|| format!("No listing with id {}", id))?;
            if session.favorites.toggle(&id)? {
                println!("❤️  Saved {} to favorites", listing.title);
            } else {
                println!("Removed {} from favorites", listing.title);
            }
        }

        Commands::Favorites => {
            let listings = session.favorites.listings(&session.catalog);
            if listings.is_empty() {
                println!("No favorites yet");
            }
            for (i, listing) in listings.iter().enumerate() {
                println!("{}. {} (₹{}/month)", i + 1, listing.title, listing.price);
                println!("   {} · {}", listing.category, listing.location.address);
                println!("   ID: {}", listing.id);
                println!();
            }
        }

        Commands::Enquire {
            id,
            name,
            email,
            phone,
            message,
        } => {
            let listing = session
                .catalog
                .get(&id)
                .with_context(|| format!("No listing with id {}", id))?;
            let form = EnquiryForm {
                name,
                email,
                phone,
                message,
            };
            let enquiry = match form.validate(&listing.id, &listing.title) {
                Ok(enquiry) => enquiry,
                Err(rejection) => bail!("Enquiry not sent: {}", rejection),
            };
            session.enquiries.submit(enquiry)?;
            println!("✅ Enquiry sent for {}. Open the inbox to continue the conversation.", listing.title);
        }

        Commands::Inbox => {
            let (inbox, report) = session.open_inbox();
            if !report.undeleted.is_empty() {
                warn!("{} enquiries could not be cleared and may reappear", report.undeleted.len());
            }
            if !report.unreadable.is_empty() {
                warn!("{} enquiries could not be read and were kept for next time", report.unreadable.len());
            }

            let active = inbox.active().map(|c| c.id.clone());
            for contact in inbox.contacts() {
                let marker = if Some(&contact.id) == active.as_ref() { ">" } else { " " };
                let unread = if contact.unread_count > 0 {
                    format!(" ({} unread)", contact.unread_count)
                } else {
                    String::new()
                };
                println!("{} {}{}", marker, contact.name, unread);
                println!("    {}", contact.last_message);
            }

            if let Some(id) = active {
                println!();
                for message in inbox.messages(&id) {
                    println!("[{}] {}: {}", message.time_label(), message.sender, message.text);
                }
            }
        }
    }

    Ok(())
}

fn print_outcome(outcome: &SearchOutcome) {
    match outcome {
        SearchOutcome::Results(results) => {
            info!("Found {} listings", results.len());
            for (i, result) in results.iter().enumerate() {
                print_result(i + 1, result);
            }
        }
        SearchOutcome::NoMatch => println!("No properties match your search. Try widening the filters."),
        SearchOutcome::Failed(message) => println!("⚠️  Search failed: {}", message),
    }
}

fn print_result(rank: usize, result: &SearchResult) {
    println!("{}. {} (₹{}/month)", rank, result.title, result.price);
    if let Some(score) = result.match_score {
        println!("   Match: {}%", score);
    }
    println!("   {}", result.location);
    println!("   {}", result.description);
    if !result.amenities.is_empty() {
        println!("   Amenities: {}", result.amenities.join(", "));
    }
    if let Some(highlights) = &result.highlights {
        println!("   Highlights: {}", highlights.join(", "));
    }
    println!("   ID: {}", result.id);
    println!();
}
