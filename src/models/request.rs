//! Raw request payloads as clients send them.
//!
//! Every field is optional so that missing values reach the validator and
//! come back as field errors instead of JSON rejections.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::booking::RouteLeg;

/// `local@domain.tld` shape.
pub static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r".+@.+\..+").expect("email pattern compiles"));

pub static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern compiles"));

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub service_type: Option<String>,
    pub sub_service_type: Option<String>,
    pub source_city: Option<String>,
    #[serde(default)]
    pub route: Vec<RouteLeg>,
    pub pickup_date_time: Option<DateTime<Utc>>,
    pub drop_date_time: Option<DateTime<Utc>>,
    #[validate(range(min = 0.0, message = "must be a non-negative number"))]
    pub distance: Option<f64>,
    #[validate(required(message = "contact is required"), nested)]
    pub contact: Option<ContactInput>,
}

impl CreateBookingRequest {
    /// Copy with the contact's text fields trimmed, so blanks count as missing.
    pub fn trimmed(&self) -> Self {
        Self {
            contact: self.contact.as_ref().map(ContactInput::trimmed),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct ContactInput {
    #[validate(
        required(message = "is required"),
        length(min = 1, message = "is required")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "is required"),
        length(min = 1, message = "is required"),
        regex(path = *EMAIL_PATTERN, message = "must be a valid email address")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "is required"),
        length(min = 1, message = "is required"),
        regex(path = *PHONE_PATTERN, message = "must be exactly 10 digits")
    )]
    pub phone: Option<String>,
}

impl ContactInput {
    pub fn trimmed(&self) -> Self {
        Self {
            name: trim(&self.name),
            email: trim(&self.email),
            phone: trim(&self.phone),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminActionRequest {
    pub action: Option<String>,
    pub driver: Option<DriverInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct DriverInput {
    #[validate(
        required(message = "is required"),
        length(min = 1, message = "is required")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "is required"),
        length(min = 1, message = "is required"),
        regex(path = *PHONE_PATTERN, message = "must be exactly 10 digits")
    )]
    pub phone: Option<String>,
    pub photo: Option<String>,
}

impl DriverInput {
    pub fn trimmed(&self) -> Self {
        Self {
            name: trim(&self.name),
            phone: trim(&self.phone),
            photo: trim(&self.photo).filter(|p| !p.is_empty()),
        }
    }
}

fn trim(value: &Option<String>) -> Option<String> {
    value.as_deref().map(|v| v.trim().to_string())
}
