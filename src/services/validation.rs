//! Request validation, kept free of any HTTP or storage concerns.
//!
//! Both entry points either produce a domain value ready for persistence or
//! the complete list of offending fields.

use validator::{Validate, ValidationErrorsKind};

use crate::errors::{FieldError, ValidationErrors};
use crate::models::{
    ActionKind, AdminActionRequest, AdminDecision, Contact, CreateBookingRequest, Driver,
    DriverInput, NewBooking,
};

pub const CONTACT_REQUIRED: &str = "Contact name, email, and phone are required";
pub const INVALID_BOOKING: &str = "Invalid booking data";
pub const INVALID_ACTION: &str = "Invalid action";
pub const DRIVER_REQUIRED: &str = "Driver name and phone are required to confirm a booking";

pub fn validate_new_booking(req: &CreateBookingRequest) -> Result<NewBooking, ValidationErrors> {
    let req = req.trimmed();

    if let Err(e) = req.validate() {
        let errors = field_errors("", &e);
        let message = if errors.iter().any(is_missing_contact_field) {
            CONTACT_REQUIRED
        } else {
            INVALID_BOOKING
        };
        return Err(ValidationErrors::new(message, errors));
    }

    let contact = req
        .contact
        .as_ref()
        .and_then(|c| match (&c.name, &c.email, &c.phone) {
            (Some(name), Some(email), Some(phone)) => Some(Contact {
                name: name.clone(),
                email: email.clone(),
                phone: phone.clone(),
            }),
            _ => None,
        })
        .ok_or_else(|| {
            ValidationErrors::new(
                CONTACT_REQUIRED,
                vec![FieldError::new("contact", "required", "contact is required")],
            )
        })?;

    Ok(NewBooking {
        service_type: req.service_type,
        sub_service_type: req.sub_service_type,
        source_city: req.source_city,
        route: req.route,
        pickup_date_time: req.pickup_date_time,
        drop_date_time: req.drop_date_time,
        distance: req.distance,
        contact,
    })
}

pub fn validate_admin_action(req: &AdminActionRequest) -> Result<AdminDecision, ValidationErrors> {
    let kind = req.action.as_deref().map(str::trim).and_then(ActionKind::parse);

    match kind {
        None => Err(ValidationErrors::new(
            INVALID_ACTION,
            vec![FieldError::new(
                "action",
                "one_of",
                "must be one of: Confirmed, Canceled",
            )],
        )),
        Some(ActionKind::Canceled) => Ok(AdminDecision::Cancel),
        Some(ActionKind::Confirmed) => {
            let driver = validate_driver(req.driver.as_ref())
                .map_err(|errors| ValidationErrors::new(DRIVER_REQUIRED, errors))?;
            Ok(AdminDecision::Confirm { driver })
        }
    }
}

fn validate_driver(input: Option<&DriverInput>) -> Result<Driver, Vec<FieldError>> {
    let Some(input) = input.map(DriverInput::trimmed) else {
        return Err(vec![FieldError::new("driver", "required", "driver is required")]);
    };
    input.validate().map_err(|e| field_errors("driver", &e))?;

    match (input.name, input.phone) {
        (Some(name), Some(phone)) => Ok(Driver {
            name,
            phone,
            photo: input.photo,
        }),
        _ => Err(vec![FieldError::new("driver", "required", "driver is required")]),
    }
}

fn is_missing_contact_field(e: &FieldError) -> bool {
    e.field == "contact"
        || (e.field.starts_with("contact.") && (e.code == "required" || e.code == "length"))
}

/// Flattens nested validator output into dotted field paths, sorted by field.
fn field_errors(prefix: &str, errors: &validator::ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect(prefix, errors, &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn collect(prefix: &str, errors: &validator::ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                for e in errs {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed {} check", e.code));
                    out.push(FieldError::new(path.clone(), e.code.to_string(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (i, inner) in items {
                    collect(&format!("{path}[{i}]"), inner, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContactInput;

    fn contact(name: &str, email: &str, phone: &str) -> Option<ContactInput> {
        Some(ContactInput {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            phone: Some(phone.to_string()),
        })
    }

    fn booking_with(contact: Option<ContactInput>) -> CreateBookingRequest {
        CreateBookingRequest {
            contact,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_booking_passes() {
        let req = CreateBookingRequest {
            service_type: Some("Cab".to_string()),
            distance: Some(12.5),
            ..booking_with(contact(" Asha ", "asha@example.com", "9876543210"))
        };
        let booking = validate_new_booking(&req).unwrap();
        assert_eq!(booking.contact.name, "Asha");
        assert_eq!(booking.contact.phone, "9876543210");
        assert_eq!(booking.service_type.as_deref(), Some("Cab"));
    }

    #[test]
    fn test_missing_contact_rejected() {
        let err = validate_new_booking(&booking_with(None)).unwrap_err();
        assert_eq!(err.message, CONTACT_REQUIRED);
        assert!(err.has_field("contact"));
    }

    #[test]
    fn test_blank_contact_fields_rejected() {
        let err = validate_new_booking(&booking_with(contact("A", "  ", ""))).unwrap_err();
        assert_eq!(err.message, CONTACT_REQUIRED);
        assert!(err.has_field("contact.email"));
        assert!(err.has_field("contact.phone"));
        assert!(!err.has_field("contact.name"));
    }

    #[test]
    fn test_malformed_phone_is_a_validation_error() {
        let err =
            validate_new_booking(&booking_with(contact("A", "a@b.com", "987654321"))).unwrap_err();
        assert_eq!(err.message, INVALID_BOOKING);
        assert_eq!(
            err.errors,
            vec![FieldError::new("contact.phone", "regex", "must be exactly 10 digits")]
        );
    }

    #[test]
    fn test_negative_distance_rejected() {
        let req = CreateBookingRequest {
            distance: Some(-1.0),
            ..booking_with(contact("A", "a@b.com", "9876543210"))
        };
        let err = validate_new_booking(&req).unwrap_err();
        assert!(err.has_field("distance"));
    }

    fn email_accepted(email: &str) -> bool {
        validate_new_booking(&booking_with(contact("A", email, "9876543210"))).is_ok()
    }

    fn phone_accepted(phone: &str) -> bool {
        validate_new_booking(&booking_with(contact("A", "a@b.com", phone))).is_ok()
    }

    #[test]
    fn test_email_shape() {
        assert!(email_accepted("a@b.com"));
        assert!(email_accepted("first.last@mail.example.org"));
        assert!(!email_accepted("a@b"));
        assert!(!email_accepted("@b.com"));
        assert!(!email_accepted("a@.com"));
        assert!(!email_accepted("a@b."));
        assert!(!email_accepted("ab.com"));
    }

    #[test]
    fn test_email_allows_inner_whitespace() {
        // Only the `x@y.z` shape is enforced; surrounding blanks are trimmed.
        assert!(email_accepted("a b@c.com"));
        assert!(email_accepted("a@b.c d"));
        assert!(email_accepted("\ta@b.com"));
    }

    #[test]
    fn test_phone_shape() {
        assert!(phone_accepted("0123456789"));
        assert!(phone_accepted(" 0123456789 "));
        assert!(!phone_accepted("123456789"));
        assert!(!phone_accepted("12345678901"));
        assert!(!phone_accepted("12345-6789"));
        assert!(!phone_accepted("١٢٣٤٥٦٧٨٩٠"));
    }

    #[test]
    fn test_invalid_fields_are_all_reported() {
        let req = CreateBookingRequest {
            distance: Some(-3.0),
            ..booking_with(contact("A", "nope", "123"))
        };
        let err = validate_new_booking(&req).unwrap_err();
        assert_eq!(err.message, INVALID_BOOKING);
        let fields: Vec<&str> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["contact.email", "contact.phone", "distance"]);
    }

    #[test]
    fn test_unknown_action_rejected() {
        let req = AdminActionRequest {
            action: Some("Approved".to_string()),
            driver: None,
        };
        let err = validate_admin_action(&req).unwrap_err();
        assert_eq!(err.message, INVALID_ACTION);

        let err = validate_admin_action(&AdminActionRequest::default()).unwrap_err();
        assert_eq!(err.message, INVALID_ACTION);
    }

    #[test]
    fn test_confirm_requires_driver() {
        let req = AdminActionRequest {
            action: Some("Confirmed".to_string()),
            driver: None,
        };
        let err = validate_admin_action(&req).unwrap_err();
        assert_eq!(err.message, DRIVER_REQUIRED);
        assert!(err.has_field("driver"));

        let req = AdminActionRequest {
            action: Some("Confirmed".to_string()),
            driver: Some(DriverInput {
                name: Some("D".to_string()),
                phone: Some("12345".to_string()),
                photo: None,
            }),
        };
        let err = validate_admin_action(&req).unwrap_err();
        assert!(err.has_field("driver.phone"));
    }

    #[test]
    fn test_confirm_with_driver() {
        let req = AdminActionRequest {
            action: Some("Confirmed".to_string()),
            driver: Some(DriverInput {
                name: Some("D".to_string()),
                phone: Some("1234567890".to_string()),
                photo: Some("https://cdn.example.com/d.jpg".to_string()),
            }),
        };
        let decision = validate_admin_action(&req).unwrap();
        assert_eq!(
            decision,
            AdminDecision::Confirm {
                driver: Driver {
                    name: "D".to_string(),
                    phone: "1234567890".to_string(),
                    photo: Some("https://cdn.example.com/d.jpg".to_string()),
                }
            }
        );
    }

    #[test]
    fn test_cancel_ignores_driver() {
        let req = AdminActionRequest {
            action: Some("Canceled".to_string()),
            driver: Some(DriverInput::default()),
        };
        assert_eq!(validate_admin_action(&req).unwrap(), AdminDecision::Cancel);
    }
}
