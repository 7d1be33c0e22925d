//! Enquiry handoff: a validated enquiry is queued in durable storage and
//! later drained, once per record, into a conversation thread.

pub mod form;
pub mod inbox;
pub mod relay;

pub use form::{EnquiryForm, EnquiryRejection, ValidatedEnquiry};
pub use inbox::{ChatInbox, MaterializeReport};
pub use relay::{EnquiryRecord, EnquiryRelay, PENDING_PREFIX};
