// src/api/mod.rs — Booking backend API surface
//
// The `BookingApi` trait is the seam between the workflow logic and the
// transport. The binary always talks to `HttpBookingApi`; tests drive the
// workflow with canned in-memory implementations.

pub mod http;
pub mod types;

use async_trait::async_trait;

use crate::infra::errors::SalonError;
use types::{
    AvailabilityQuery, Booking, BookingCreate, GuestBookingCreate, PaymentMode, PaymentRequest,
    RegisterRequest, Service, Stylist, TimeSlot,
};

#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn register(&self, req: &RegisterRequest) -> Result<(), SalonError>;

    /// Form-encoded login; returns the signed access token.
    async fn login(&self, email: &str, password: &str) -> Result<String, SalonError>;

    async fn list_services(&self) -> Result<Vec<Service>, SalonError>;

    async fn list_stylists(&self) -> Result<Vec<Stylist>, SalonError>;

    /// Bookable windows for a service on a date. An empty result means
    /// "no availability", not an error.
    async fn availability(&self, query: &AvailabilityQuery) -> Result<Vec<TimeSlot>, SalonError>;

    /// Authenticated reservation; yields a booking in `pending` status.
    async fn create_booking(&self, token: &str, req: &BookingCreate)
        -> Result<Booking, SalonError>;

    /// Guest reservation; contact details stand in for a session.
    async fn create_guest_booking(&self, req: &GuestBookingCreate) -> Result<Booking, SalonError>;

    /// Submit payment against a pending booking. On success the booking
    /// comes back `confirmed`.
    async fn pay(
        &self,
        token: Option<&str>,
        booking_id: i64,
        req: &PaymentRequest,
        mode: PaymentMode,
    ) -> Result<Booking, SalonError>;

    /// Idempotent against an already-cancelled booking.
    async fn cancel(&self, token: &str, booking_id: i64) -> Result<Booking, SalonError>;

    async fn my_bookings(&self, token: &str) -> Result<Vec<Booking>, SalonError>;

    /// Assigned bookings for the authenticated stylist.
    async fn stylist_schedule(&self, token: &str) -> Result<Vec<Booking>, SalonError>;
}
