pub mod bookings;
pub mod messaging;
pub mod notification;
pub mod validation;
