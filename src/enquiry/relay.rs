use super::form::ValidatedEnquiry;
use crate::error::Result;
use crate::storage::SharedStore;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Key prefix of enquiries waiting to become conversation threads
pub const PENDING_PREFIX: &str = "pendingEnquiry_";

/// A submitted enquiry as persisted until the inbox picks it up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryRecord {
    pub property_id: String,
    pub property_title: String,
    /// Submission time, epoch milliseconds
    pub timestamp: i64,
    pub sender_name: String,
    pub initial_message: String,
}

impl EnquiryRecord {
    pub fn storage_key(&self) -> String {
        pending_key(&self.property_id, self.timestamp)
    }

    /// Id of the conversation thread this enquiry turns into
    pub fn contact_id(&self) -> String {
        format!("enquiry-{}-{}", self.property_id, self.timestamp)
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

fn pending_key(listing_id: &str, timestamp: i64) -> String {
    format!("{}{}_{}", PENDING_PREFIX, listing_id, timestamp)
}

/// Durable queue between the enquiry form and the chat inbox
#[derive(Clone)]
pub struct EnquiryRelay {
    store: SharedStore,
}

impl EnquiryRelay {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn submit(&self, enquiry: ValidatedEnquiry) -> Result<EnquiryRecord> {
        self.submit_at(enquiry, Utc::now())
    }

    /// Persist an enquiry stamped with `at`. A repeat enquiry on the same
    /// listing within the same millisecond is moved to the next free one.
    pub fn submit_at(&self, enquiry: ValidatedEnquiry, at: DateTime<Utc>) -> Result<EnquiryRecord> {
        let mut timestamp = at.timestamp_millis();
        while self.store.get(&pending_key(enquiry.listing_id(), timestamp))?.is_some() {
            timestamp += 1;
        }

        let record = EnquiryRecord {
            property_id: enquiry.listing_id().to_string(),
            property_title: enquiry.listing_title().to_string(),
            timestamp,
            sender_name: enquiry.sender_name().to_string(),
            initial_message: enquiry.message().to_string(),
        };
        self.store
            .set(&record.storage_key(), &serde_json::to_string(&record)?)?;

        info!(
            "Queued enquiry from {} about \"{}\"",
            record.sender_name, record.property_title
        );
        Ok(record)
    }

    pub fn pending_keys(&self) -> Result<Vec<String>> {
        self.store.keys_with_prefix(PENDING_PREFIX)
    }

    /// Read one pending record. Missing and undecodable entries are
    /// `Ok(None)`; a failed storage read is an error and says nothing about
    /// the record.
    pub fn read(&self, key: &str) -> Result<Option<EnquiryRecord>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        Ok(serde_json::from_str(&raw)
            .map_err(|e| warn!("Malformed pending enquiry {}: {}", key, e))
            .ok())
    }

    /// Delete a pending record once it has been consumed
    pub fn discard(&self, key: &str) -> Result<bool> {
        self.store.remove(key)
    }
}
