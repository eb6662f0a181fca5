pub mod booking;
pub mod request;

pub use booking::{
    ActionKind, AdminAction, AdminDecision, Booking, BookingStatus, Contact, Driver, NewBooking,
    RouteLeg,
};
pub use request::{AdminActionRequest, ContactInput, CreateBookingRequest, DriverInput};
