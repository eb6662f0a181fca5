//! Best-effort customer notifications sent after an admin action commits.

use std::sync::Arc;

use async_trait::async_trait;

use super::messaging::MessagingProvider;
use crate::models::{ActionKind, AdminAction, Booking, Contact, Driver};

/// What the customer is told about their booking.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingOutcome {
    pub booking_id: String,
    pub action: ActionKind,
    pub driver: Option<Driver>,
}

impl BookingOutcome {
    pub fn from_action(booking_id: &str, action: &AdminAction) -> Self {
        Self {
            booking_id: booking_id.to_string(),
            action: action.action,
            driver: action.driver.clone(),
        }
    }

    pub fn message(&self) -> String {
        match (&self.action, &self.driver) {
            (ActionKind::Confirmed, Some(driver)) => format!(
                "Your booking {} is confirmed. Driver: {} ({}).",
                self.booking_id, driver.name, driver.phone
            ),
            (ActionKind::Confirmed, None) => {
                format!("Your booking {} is confirmed.", self.booking_id)
            }
            (ActionKind::Canceled, _) => {
                format!("Your booking {} has been canceled.", self.booking_id)
            }
        }
    }
}

#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn notify(&self, contact: &Contact, outcome: &BookingOutcome) -> anyhow::Result<()>;
}

/// Delivers outcomes as SMS through any [`MessagingProvider`].
pub struct SmsNotifier {
    messaging: Box<dyn MessagingProvider>,
    country_prefix: String,
}

impl SmsNotifier {
    pub fn new(messaging: Box<dyn MessagingProvider>, country_prefix: String) -> Self {
        Self {
            messaging,
            country_prefix,
        }
    }
}

#[async_trait]
impl NotificationSender for SmsNotifier {
    async fn notify(&self, contact: &Contact, outcome: &BookingOutcome) -> anyhow::Result<()> {
        let to = normalize_phone(&contact.phone, &self.country_prefix);
        self.messaging.send_message(&to, &outcome.message()).await
    }
}

/// Converts a local number to E.164 form. Numbers already carrying a `+` keep it.
pub fn normalize_phone(phone: &str, country_prefix: &str) -> String {
    let phone = phone.trim();
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();

    if phone.starts_with('+') {
        return format!("+{digits}");
    }

    let local = digits.strip_prefix('0').unwrap_or(&digits);
    format!("{}{}", country_prefix.trim_end(), local)
}

/// Sends the outcome on a detached task. Failures are logged and dropped.
pub fn dispatch(notifier: Arc<dyn NotificationSender>, booking: &Booking) {
    let Some(action) = &booking.admin_action else {
        return;
    };
    let contact = booking.contact.clone();
    let outcome = BookingOutcome::from_action(&booking.id, action);

    tokio::spawn(async move {
        match notifier.notify(&contact, &outcome).await {
            Ok(()) => tracing::info!(booking_id = %outcome.booking_id, "customer notified"),
            Err(e) => tracing::warn!(
                booking_id = %outcome.booking_id,
                error = %e,
                "failed to notify customer"
            ),
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct Recorder {
        sent: Arc<Mutex<Vec<(String, String)>>>,
    }

    #[async_trait]
    impl MessagingProvider for Recorder {
        async fn send_message(&self, to: &str, body: &str) -> anyhow::Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), body.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("9876543210", "+91"), "+919876543210");
        assert_eq!(normalize_phone("09876543210", "+91"), "+919876543210");
        assert_eq!(normalize_phone("98765 43210", "+91"), "+919876543210");
        assert_eq!(normalize_phone("+1 555 123 4567", "+91"), "+15551234567");
    }

    #[test]
    fn test_outcome_messages() {
        let confirmed = BookingOutcome {
            booking_id: "bk-1".to_string(),
            action: ActionKind::Confirmed,
            driver: Some(Driver {
                name: "Ravi".to_string(),
                phone: "1234567890".to_string(),
                photo: None,
            }),
        };
        assert_eq!(
            confirmed.message(),
            "Your booking bk-1 is confirmed. Driver: Ravi (1234567890)."
        );

        let canceled = BookingOutcome {
            booking_id: "bk-1".to_string(),
            action: ActionKind::Canceled,
            driver: None,
        };
        assert_eq!(canceled.message(), "Your booking bk-1 has been canceled.");
    }

    #[tokio::test]
    async fn test_sms_notifier_sends_to_normalized_number() {
        let sent = Arc::new(Mutex::new(vec![]));
        let notifier = SmsNotifier::new(
            Box::new(Recorder {
                sent: Arc::clone(&sent),
            }),
            "+91".to_string(),
        );
        let contact = Contact {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
        };
        let outcome = BookingOutcome {
            booking_id: "bk-1".to_string(),
            action: ActionKind::Canceled,
            driver: None,
        };

        notifier.notify(&contact, &outcome).await.unwrap();

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "+919876543210");
        assert!(sent[0].1.contains("canceled"));
    }
}
