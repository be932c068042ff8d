// src/api/types.rs — Wire types for the booking backend

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An offerable service. Read-only from the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub duration_minutes: i64,
}

/// A staff member. Read-only from the client for booking purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stylist {
    pub id: i64,
    pub display_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    pub start_hour: u8,
    pub end_hour: u8,
}

/// A bookable time window. Ephemeral: valid only for the availability
/// query that produced it, never cached across selection changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub stylist_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    /// Backend-assigned after the appointment; never set by the client.
    Completed,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub service_id: i64,
    #[serde(default)]
    pub stylist_id: Option<i64>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    #[serde(default)]
    pub is_walkin: bool,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
}

/// Authenticated reservation request.
#[derive(Debug, Clone, Serialize)]
pub struct BookingCreate {
    pub service_id: i64,
    pub stylist_id: i64,
    pub start_time: DateTime<Utc>,
}

/// Guest reservation request: contact details in lieu of a session.
#[derive(Debug, Clone, Serialize)]
pub struct GuestBookingCreate {
    pub service_id: i64,
    pub stylist_id: i64,
    pub start_time: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityQuery {
    pub service_id: i64,
    pub date: NaiveDate,
    pub stylist_id: Option<i64>,
}

/// Card details passed through to the backend as-is. The client checks
/// presence only; card validation is the gateway's job.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRequest {
    pub amount: f64,
    pub card_number: String,
    pub expiry_month: u32,
    pub expiry_year: u32,
    pub cvv: String,
    pub cardholder_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMode {
    /// Pay the full price; confirms the booking.
    Full,
    /// Pay a partial amount up front; still confirms the booking
    /// (the threshold is backend-defined and opaque to the client).
    Deposit,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_status_round_trips_lowercase() {
        let status: BookingStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, BookingStatus::Pending);
        assert_eq!(serde_json::to_string(&BookingStatus::Confirmed).unwrap(), "\"confirmed\"");
    }

    #[test]
    fn booking_parses_minimal_payload() {
        // Older backend iterations omit walk-in and customer fields.
        let json = r#"{
            "id": 7,
            "service_id": 1,
            "stylist_id": 2,
            "start_time": "2024-06-01T09:30:00Z",
            "end_time": "2024-06-01T10:00:00Z",
            "status": "pending"
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.id, 7);
        assert!(!booking.is_walkin);
        assert_eq!(booking.customer_phone, None);
    }
}
