use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("Invalid phone regex"));

pub const MESSAGE_MIN: usize = 10;
pub const MESSAGE_MAX: usize = 500;

/// Why an enquiry form was not accepted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnquiryRejection {
    #[error("Name must be at least 2 characters")]
    NameTooShort,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,

    #[error("Message must be between 10 and 500 characters, got {0}")]
    MessageLength(usize),
}

/// Raw enquiry form input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnquiryForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// An enquiry that passed validation, bound to the listing it is about
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEnquiry {
    listing_id: String,
    listing_title: String,
    sender_name: String,
    message: String,
}

impl ValidatedEnquiry {
    pub fn listing_id(&self) -> &str {
        &self.listing_id
    }

    pub fn listing_title(&self) -> &str {
        &self.listing_title
    }

    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl EnquiryForm {
    pub fn validate(
        &self,
        listing_id: impl Into<String>,
        listing_title: impl Into<String>,
    ) -> Result<ValidatedEnquiry, EnquiryRejection> {
        let name = self.name.trim();
        if name.chars().count() < 2 {
            return Err(EnquiryRejection::NameTooShort);
        }
        if !EMAIL.is_match(self.email.trim()) {
            return Err(EnquiryRejection::InvalidEmail);
        }
        if !PHONE.is_match(self.phone.trim()) {
            return Err(EnquiryRejection::InvalidPhone);
        }
        let length = self.message.chars().count();
        if !(MESSAGE_MIN..=MESSAGE_MAX).contains(&length) {
            return Err(EnquiryRejection::MessageLength(length));
        }

        Ok(ValidatedEnquiry {
            listing_id: listing_id.into(),
            listing_title: listing_title.into(),
            sender_name: name.to_string(),
            message: self.message.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> EnquiryForm {
        EnquiryForm {
            name: "Asha Verma".into(),
            email: "asha@example.com".into(),
            phone: "9876543210".into(),
            message: "Is the room available from July?".into(),
        }
    }

    #[test]
    fn test_valid_form_binds_listing() {
        let enquiry = form().validate("5", "Nebula Nook Rooms").unwrap();
        assert_eq!(enquiry.listing_id(), "5");
        assert_eq!(enquiry.sender_name(), "Asha Verma");
    }

    #[test]
    fn test_each_rule_rejects() {
        let mut f = form();
        f.name = " A ".into();
        assert_eq!(f.validate("5", "t"), Err(EnquiryRejection::NameTooShort));

        let mut f = form();
        f.email = "asha@example".into();
        assert_eq!(f.validate("5", "t"), Err(EnquiryRejection::InvalidEmail));

        let mut f = form();
        f.phone = "+91 98765 43210".into();
        assert_eq!(f.validate("5", "t"), Err(EnquiryRejection::InvalidPhone));

        let mut f = form();
        f.message = "Hi".into();
        assert_eq!(f.validate("5", "t"), Err(EnquiryRejection::MessageLength(2)));

        let mut f = form();
        f.message = "a".repeat(501);
        assert_eq!(f.validate("5", "t"), Err(EnquiryRejection::MessageLength(501)));
    }

    #[test]
    fn test_phone_accepts_only_ascii_digits() {
        let mut f = form();
        f.phone = "९८७६५४३२१०".into();
        assert_eq!(f.validate("5", "t"), Err(EnquiryRejection::InvalidPhone));
        f.phone = "٩٨٧٦٥٤٣٢١٠".into();
        assert_eq!(f.validate("5", "t"), Err(EnquiryRejection::InvalidPhone));
    }

    #[test]
    fn test_message_bounds_are_inclusive() {
        let mut f = form();
        f.message = "a".repeat(MESSAGE_MIN);
        assert!(f.validate("5", "t").is_ok());
        f.message = "a".repeat(MESSAGE_MAX);
        assert!(f.validate("5", "t").is_ok());
    }
}
