use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::Listing;
use crate::storage::{SharedStore, Subscription};
use std::collections::HashSet;
use tracing::{info, warn};

/// Storage key holding the JSON list of liked listing ids
pub const FAVORITES_KEY: &str = "favoriteProperties";

/// The user's liked listings, persisted under one key
#[derive(Clone)]
pub struct FavoritesStore {
    store: SharedStore,
}

impl FavoritesStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Persisted ids in insertion order. Missing, malformed or unreadable
    /// data is an empty list.
    pub fn ids(&self) -> Vec<String> {
        self.stored_ids().unwrap_or_else(|e| {
            warn!("Could not read favorites, treating as empty: {}", e);
            Vec::new()
        })
    }

    /// Like `ids`, but a failed storage read is an error rather than empty
    fn stored_ids(&self) -> Result<Vec<String>> {
        let Some(raw) = self.store.get(FAVORITES_KEY)? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Ignoring malformed favorites data: {}", e);
            Vec::new()
        }))
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids().iter().any(|f| f == id)
    }

    /// Flip membership of `id` and return the new state. Nothing is written
    /// when the current set cannot be read.
    pub fn toggle(&self, id: &str) -> Result<bool> {
        let mut ids = self.stored_ids()?;
        let now_favorite = match ids.iter().position(|f| f == id) {
            Some(index) => {
                ids.remove(index);
                false
            }
            None => {
                ids.push(id.to_string());
                true
            }
        };

        self.store.set(FAVORITES_KEY, &serde_json::to_string(&ids)?)?;
        info!(
            "{} listing {} {} favorites",
            if now_favorite { "Added" } else { "Removed" },
            id,
            if now_favorite { "to" } else { "from" }
        );
        Ok(now_favorite)
    }

    /// Liked listings that exist in the catalog, in catalog order
    pub fn listings<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Listing> {
        let ids: HashSet<String> = self.ids().into_iter().collect();
        catalog
            .listings()
            .iter()
            .filter(|l| ids.contains(&l.id))
            .collect()
    }

    pub fn open_view(&self) -> FavoritesView {
        FavoritesView::open(self.clone())
    }
}

/// One view's cached copy of the favorite set, kept current by change
/// notifications. Dropping the view ends its subscription.
pub struct FavoritesView {
    favorites: FavoritesStore,
    subscription: Subscription,
    cached: HashSet<String>,
}

impl FavoritesView {
    fn open(favorites: FavoritesStore) -> Self {
        // subscribe before the first read so no write slips between them
        let subscription = favorites.store.subscribe();
        let cached = favorites.ids().into_iter().collect();
        Self {
            favorites,
            subscription,
            cached,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cached.contains(id)
    }

    pub fn len(&self) -> usize {
        self.cached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cached.is_empty()
    }

    /// Apply queued notifications; returns whether the cache was reloaded
    pub fn refresh(&mut self) -> bool {
        if self.subscription.poll_changed(FAVORITES_KEY) {
            self.reload();
            return true;
        }
        false
    }

    /// Wait for the next favorites change and reload. The view holds its
    /// own handle on the store, so this resolves only when a change arrives.
    pub async fn next_change(&mut self) -> bool {
        if self.subscription.changed(FAVORITES_KEY).await {
            self.reload();
            return true;
        }
        false
    }

    fn reload(&mut self) {
        self.cached = self.favorites.ids().into_iter().collect();
    }
}
