use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub service_type: Option<String>,
    pub sub_service_type: Option<String>,
    pub source_city: Option<String>,
    pub route: Vec<RouteLeg>,
    pub pickup_date_time: Option<DateTime<Utc>>,
    pub drop_date_time: Option<DateTime<Utc>>,
    pub distance: Option<f64>,
    pub status: BookingStatus,
    pub contact: Contact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_action: Option<AdminAction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Canceled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Canceled => "Canceled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(BookingStatus::Pending),
            "Confirmed" => Some(BookingStatus::Confirmed),
            "Canceled" => Some(BookingStatus::Canceled),
            _ => None,
        }
    }
}

impl From<ActionKind> for BookingStatus {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Confirmed => BookingStatus::Confirmed,
            ActionKind::Canceled => BookingStatus::Canceled,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RouteLeg {
    pub pickup: Option<String>,
    pub drop: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminAction {
    pub action: ActionKind,
    pub action_date_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<Driver>,
}

/// The two outcomes an administrator can apply to a booking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionKind {
    Confirmed,
    Canceled,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Confirmed => "Confirmed",
            ActionKind::Canceled => "Canceled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Confirmed" => Some(ActionKind::Confirmed),
            "Canceled" => Some(ActionKind::Canceled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// A booking that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub service_type: Option<String>,
    pub sub_service_type: Option<String>,
    pub source_city: Option<String>,
    pub route: Vec<RouteLeg>,
    pub pickup_date_time: Option<DateTime<Utc>>,
    pub drop_date_time: Option<DateTime<Utc>>,
    pub distance: Option<f64>,
    pub contact: Contact,
}

impl NewBooking {
    pub fn into_booking(self, id: String, now: DateTime<Utc>) -> Booking {
        Booking {
            id,
            service_type: self.service_type,
            sub_service_type: self.sub_service_type,
            source_city: self.source_city,
            route: self.route,
            pickup_date_time: self.pickup_date_time,
            drop_date_time: self.drop_date_time,
            distance: self.distance,
            status: BookingStatus::Pending,
            contact: self.contact,
            admin_action: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A validated admin decision. The driver is only ever carried for confirmations.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminDecision {
    Confirm { driver: Driver },
    Cancel,
}

impl AdminDecision {
    pub fn kind(&self) -> ActionKind {
        match self {
            AdminDecision::Confirm { .. } => ActionKind::Confirmed,
            AdminDecision::Cancel => ActionKind::Canceled,
        }
    }

    pub fn into_admin_action(self, at: DateTime<Utc>) -> AdminAction {
        let action = self.kind();
        let driver = match self {
            AdminDecision::Confirm { driver } => Some(driver),
            AdminDecision::Cancel => None,
        };
        AdminAction {
            action,
            action_date_time: at,
            driver,
        }
    }
}
