use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a conversation thread came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactOrigin {
    /// Pre-existing thread shipped with the inbox
    Seeded,
    /// Thread materialized from a pending enquiry
    Enquiry { listing_id: String, listing_title: String },
}

/// A conversation thread as shown in the contact list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatContact {
    pub id: String,
    pub name: String,
    pub last_message: String,
    pub unread_count: u32,
    pub origin: ContactOrigin,
}

impl ChatContact {
    pub fn is_enquiry(&self) -> bool {
        matches!(self.origin, ContactOrigin::Enquiry { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
    /// Written by the local user
    pub own: bool,
}

impl ChatMessage {
    /// Short wall-clock label, e.g. "14:05"
    pub fn time_label(&self) -> String {
        self.sent_at.format("%H:%M").to_string()
    }
}
