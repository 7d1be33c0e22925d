use super::relay::{EnquiryRecord, EnquiryRelay};
use crate::models::{ChatContact, ChatMessage, ContactOrigin};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tracing::{error, info, warn};

/// What one materialization pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Contact ids created in this pass, in scan order
    pub created: Vec<String>,
    /// Pending records whose thread already existed
    pub duplicates: usize,
    /// Pending records that could not be decoded
    pub malformed: usize,
    /// Keys whose thread exists but whose record could not be deleted
    pub undeleted: Vec<String>,
    /// Keys whose record could not be read; left in place for a later pass
    pub unreadable: Vec<String>,
}

/// Conversation threads of the local user
#[derive(Debug, Clone, Default)]
pub struct ChatInbox {
    contacts: Vec<ChatContact>,
    messages: HashMap<String, Vec<ChatMessage>>,
    active: Option<String>,
}

impl ChatInbox {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Inbox with the pre-existing host, student and group threads
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let mut inbox = Self::empty();

        let at = |minutes_ago: i64| now - Duration::minutes(minutes_ago);
        let msg = |id: &str, sender: &str, text: &str, sent_at, own| ChatMessage {
            id: id.to_string(),
            sender: sender.to_string(),
            text: text.to_string(),
            sent_at,
            own,
        };

        inbox.push_seeded(
            "host-1",
            "Host: Rakesh Sharma",
            2,
            vec![
                msg("m1", "Rakesh Sharma", "Hello! Thanks for your interest in 'Cozy 2BHK'.", at(62), false),
                msg("m2", "You", "Hi Rakesh, is the property still available for rent from next month?", at(61), true),
                msg("m3", "Rakesh Sharma", "Yes, it's available. Would you like to schedule a visit?", at(60), false),
            ],
        );
        inbox.push_seeded(
            "student-1",
            "Student: Priya Singh",
            0,
            vec![
                msg("m4", "Priya Singh", "Hey! Is the studio apartment available?", at(24 * 60 + 5), false),
                msg("m5", "You", "Hi Priya, which one are you referring to?", at(24 * 60), true),
            ],
        );
        inbox.push_seeded(
            "group-1",
            "Property Inquiry Group",
            0,
            vec![msg("m6", "Admin", "Shared new listing: Luxury PG near Gate 3", at(120), false)],
        );

        inbox
    }

    fn push_seeded(&mut self, id: &str, name: &str, unread: u32, thread: Vec<ChatMessage>) {
        let last_message = thread.last().map(|m| m.text.clone()).unwrap_or_default();
        self.contacts.push(ChatContact {
            id: id.to_string(),
            name: name.to_string(),
            last_message,
            unread_count: unread,
            origin: ContactOrigin::Seeded,
        });
        self.messages.insert(id.to_string(), thread);
    }

    /// Seeded inbox with every pending enquiry materialized, as shown when
    /// the conversation view opens
    pub fn open(relay: &EnquiryRelay) -> (Self, MaterializeReport) {
        let mut inbox = Self::seeded(Utc::now());
        let report = inbox.materialize_pending(relay);
        (inbox, report)
    }

    /// Turn every pending enquiry into a thread and delete its record.
    ///
    /// A record is deleted right after its thread is created. A failed
    /// delete is logged and reported, never retried.
    pub fn materialize_pending(&mut self, relay: &EnquiryRelay) -> MaterializeReport {
        let mut report = MaterializeReport::default();

        let keys = match relay.pending_keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Could not list pending enquiries: {}", e);
                return report;
            }
        };

        for key in keys {
            match relay.read(&key) {
                Ok(Some(record)) => {
                    let contact_id = record.contact_id();
                    if self.contact(&contact_id).is_some() {
                        report.duplicates += 1;
                    } else {
                        self.insert_enquiry_thread(&record);
                        report.created.push(contact_id);
                    }
                }
                Ok(None) => report.malformed += 1,
                Err(e) => {
                    warn!("Could not read pending enquiry {}, keeping it: {}", key, e);
                    report.unreadable.push(key);
                    continue;
                }
            }

            match relay.discard(&key) {
                Ok(_) => {}
                Err(e) => {
                    error!("Enquiry {} materialized but its record was not deleted: {}", key, e);
                    report.undeleted.push(key);
                }
            }
        }

        if let Some(first) = report.created.first() {
            self.active = Some(first.clone());
        } else if self.active.is_none() {
            self.active = self.contacts.first().map(|c| c.id.clone());
        }

        if !report.created.is_empty() {
            info!("Materialized {} enquiry threads", report.created.len());
        }
        report
    }

    fn insert_enquiry_thread(&mut self, record: &EnquiryRecord) {
        let contact_id = record.contact_id();
        let sent_at = record.submitted_at();

        let last_message = if record.initial_message.trim().is_empty() {
            "Enquiry initiated.".to_string()
        } else {
            record.initial_message.clone()
        };
        let contact = ChatContact {
            id: contact_id.clone(),
            name: format!("Enquiry: {}", record.property_title),
            last_message,
            unread_count: 1,
            origin: ContactOrigin::Enquiry {
                listing_id: record.property_id.clone(),
                listing_title: record.property_title.clone(),
            },
        };

        let thread = vec![
            ChatMessage {
                id: format!("msg-{}-sys", contact_id),
                sender: "System".to_string(),
                text: format!(
                    "Enquiry started for property: {} by {}.",
                    record.property_title, record.sender_name
                ),
                sent_at,
                own: false,
            },
            ChatMessage {
                id: format!("msg-{}-init", contact_id),
                sender: record.sender_name.clone(),
                text: record.initial_message.clone(),
                sent_at,
                own: false,
            },
        ];

        self.contacts.insert(0, contact);
        self.messages.insert(contact_id, thread);
    }

    pub fn contacts(&self) -> &[ChatContact] {
        &self.contacts
    }

    pub fn contact(&self, id: &str) -> Option<&ChatContact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn messages(&self, contact_id: &str) -> &[ChatMessage] {
        self.messages.get(contact_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn active(&self) -> Option<&ChatContact> {
        self.active.as_deref().and_then(|id| self.contact(id))
    }

    /// Make `contact_id` the open thread and mark it read
    pub fn select(&mut self, contact_id: &str) -> bool {
        let Some(contact) = self.contacts.iter_mut().find(|c| c.id == contact_id) else {
            return false;
        };
        contact.unread_count = 0;
        self.active = Some(contact_id.to_string());
        true
    }

    /// Append an own message to the open thread. Blank text is ignored.
    pub fn send(&mut self, text: &str, now: DateTime<Utc>) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let contact_id = self.active.clone()?;
        let contact = self.contacts.iter_mut().find(|c| c.id == contact_id)?;
        contact.last_message = format!("You: {}", text);

        let thread = self.messages.entry(contact_id.clone()).or_default();
        thread.push(ChatMessage {
            id: format!("msg-{}-{}-{}", contact_id, now.timestamp_millis(), thread.len()),
            sender: "You".to_string(),
            text: text.to_string(),
            sent_at: now,
            own: true,
        });
        thread.last()
    }
}
