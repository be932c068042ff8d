// src/infra/errors.rs — Error types for salonctl

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalonError {
    // Local input errors: resolved before any network call is made
    #[error("Selection incomplete: {0}")]
    IncompleteSelection(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    // Slot taken between availability query and reservation
    #[error("Booking conflict: {message}")]
    Conflict { message: String },

    // Missing/invalid/expired token, or role mismatch
    #[error("Not authorized: {message}")]
    Auth { message: String },

    // Any other non-success response; message is the backend's verbatim body
    #[error("Server error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // Transport failures; the user re-initiates, nothing retries automatically
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
