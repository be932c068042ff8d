// src/workflow/actions.rs — Status-dependent booking actions

use crate::api::types::BookingStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Pay,
    Cancel,
}

impl std::fmt::Display for BookingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingAction::Pay => f.write_str("Pay"),
            BookingAction::Cancel => f.write_str("Cancel"),
        }
    }
}

/// Available actions are a pure function of status, recomputed on every
/// list refresh — never cached independently of it.
pub fn actions_for(status: BookingStatus) -> &'static [BookingAction] {
    match status {
        BookingStatus::Pending => &[BookingAction::Pay, BookingAction::Cancel],
        BookingStatus::Confirmed => &[BookingAction::Cancel],
        BookingStatus::Cancelled | BookingStatus::Completed => &[],
    }
}
