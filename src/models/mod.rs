mod client;
mod vehicle;
mod reservation;
mod status;

pub use client::{Client, ClientPayload};
pub use vehicle::{Vehicle, VehiclePayload};
pub use reservation::{NewReservation, Reservation};
pub use status::ReservationStatus;
