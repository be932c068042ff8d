// src/workflow/mod.rs — Reservation workflow state machine
//
// Idle → Selecting → SlotChosen → Reserving → Pending(id) → Confirmed
//                                                         ↘ Cancelled
//
// Reservation is deliberately split from payment: the slot is held as a
// pending booking the moment the reservation lands, so the user secures
// the window before entering card details. A failed payment leaves the
// pending reservation intact — still payable, still cancellable.

pub mod actions;
pub mod availability;
pub mod selection;

use std::sync::Arc;

use crate::api::types::{
    Booking, BookingCreate, GuestBookingCreate, PaymentMode, PaymentRequest, Service, Stylist,
    TimeSlot,
};
use crate::api::BookingApi;
use crate::infra::errors::SalonError;
use crate::session::SessionContext;
use availability::AvailabilityTracker;
use chrono::NaiveDate;
use selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationState {
    Idle,
    Selecting,
    SlotChosen,
    Reserving,
    Pending(i64),
    Confirmed(i64),
    Cancelled(i64),
}

/// Contact details a guest supplies in lieu of a session.
#[derive(Debug, Clone)]
pub struct GuestContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl GuestContact {
    fn validate(&self) -> Result<(), SalonError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
        ] {
            if value.trim().is_empty() {
                return Err(SalonError::MissingField(format!("guest {field}")));
            }
        }
        Ok(())
    }
}

pub struct ReservationWorkflow {
    api: Arc<dyn BookingApi>,
    state: ReservationState,
    selection: Selection,
    availability: AvailabilityTracker,
    booking: Option<Booking>,
}

impl ReservationWorkflow {
    pub fn new(api: Arc<dyn BookingApi>) -> Self {
        Self {
            api,
            state: ReservationState::Idle,
            selection: Selection::default(),
            availability: AvailabilityTracker::new(),
            booking: None,
        }
    }

    /// Entering the booking view.
    pub fn begin(&mut self) {
        if self.state == ReservationState::Idle {
            self.state = ReservationState::Selecting;
        }
    }

    pub fn state(&self) -> ReservationState {
        self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn booking(&self) -> Option<&Booking> {
        self.booking.as_ref()
    }

    pub fn slots(&self) -> &[TimeSlot] {
        self.availability.slots()
    }

    pub fn select_service(&mut self, service: Service) -> Result<(), SalonError> {
        self.mutate_selection(|sel| sel.choose_service(service))
    }

    pub fn select_stylist(&mut self, stylist: Stylist) -> Result<(), SalonError> {
        self.mutate_selection(|sel| sel.choose_stylist(stylist))
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), SalonError> {
        self.mutate_selection(|sel| sel.choose_date(date))
    }

    /// Apply an upstream selection change. Reverts SlotChosen to
    /// Selecting (the slot is cleared by the selection itself) and
    /// invalidates any rendered or in-flight slot set.
    fn mutate_selection(
        &mut self,
        change: impl FnOnce(&mut Selection),
    ) -> Result<(), SalonError> {
        match self.state {
            ReservationState::Idle
            | ReservationState::Selecting
            | ReservationState::SlotChosen => {
                change(&mut self.selection);
                self.availability.invalidate();
                self.state = ReservationState::Selecting;
                Ok(())
            }
            _ => Err(SalonError::InvalidState(
                "selection is frozen once a reservation is underway".into(),
            )),
        }
    }

    /// Fetch bookable windows for the current selection. Requires service
    /// and date; the response is applied last-query-wins against the
    /// selection key active at dispatch.
    pub async fn query_availability(&mut self) -> Result<&[TimeSlot], SalonError> {
        let query = self.selection.availability_query().ok_or_else(|| {
            SalonError::IncompleteSelection("pick a service and a date first".into())
        })?;
        let key = self.selection.key().expect("key exists when query does");

        let ticket = self.availability.begin(key);
        let slots = self.api.availability(&query).await?;
        if !self.availability.apply(&ticket, slots) {
            tracing::debug!("Discarded stale availability response");
        }
        Ok(self.availability.slots())
    }

    /// Selecting → SlotChosen once service, stylist, date and slot are
    /// all set.
    pub fn choose_slot(&mut self, slot: TimeSlot) -> Result<(), SalonError> {
        match self.state {
            ReservationState::Selecting | ReservationState::SlotChosen => {}
            _ => {
                return Err(SalonError::InvalidState(
                    "slot selection is only possible while selecting".into(),
                ))
            }
        }
        if self.selection.service().is_none()
            || self.selection.stylist().is_none()
            || self.selection.date().is_none()
        {
            return Err(SalonError::IncompleteSelection(
                "pick a service, stylist and date before a time slot".into(),
            ));
        }
        self.selection.choose_slot(slot);
        self.state = ReservationState::SlotChosen;
        Ok(())
    }

    /// Authenticated reservation path. Requires a session token; yields a
    /// pending booking. On failure the workflow reverts to SlotChosen and
    /// the reason is surfaced — the slot may genuinely have been taken by
    /// a concurrent caller, which must be reported, not masked.
    pub async fn reserve(&mut self, session: &SessionContext) -> Result<&Booking, SalonError> {
        let token = session.bearer().ok_or_else(|| SalonError::Auth {
            message: "log in or continue as guest to reserve".into(),
        })?;
        let request = self.reservation_request()?;

        self.state = ReservationState::Reserving;
        let result = self.api.create_booking(token, &request).await;
        match result {
            Ok(booking) => Ok(self.adopt_pending(booking)),
            Err(e) => {
                self.state = ReservationState::SlotChosen;
                Err(e)
            }
        }
    }

    /// Guest reservation path. Requires non-empty name, email and phone;
    /// validation happens before any network call.
    pub async fn reserve_as_guest(
        &mut self,
        contact: &GuestContact,
    ) -> Result<&Booking, SalonError> {
        contact.validate()?;
        let base = self.reservation_request()?;
        let request = GuestBookingCreate {
            service_id: base.service_id,
            stylist_id: base.stylist_id,
            start_time: base.start_time,
            customer_name: contact.name.trim().to_string(),
            customer_email: contact.email.trim().to_string(),
            customer_phone: contact.phone.trim().to_string(),
        };

        self.state = ReservationState::Reserving;
        let result = self.api.create_guest_booking(&request).await;
        match result {
            Ok(booking) => Ok(self.adopt_pending(booking)),
            Err(e) => {
                self.state = ReservationState::SlotChosen;
                Err(e)
            }
        }
    }

    fn reservation_request(&self) -> Result<BookingCreate, SalonError> {
        if self.state != ReservationState::SlotChosen {
            return Err(SalonError::InvalidState(
                "choose a time slot before reserving".into(),
            ));
        }
        let service = self.selection.service().expect("SlotChosen implies service");
        let stylist = self.selection.stylist().expect("SlotChosen implies stylist");
        let slot = self.selection.slot().expect("SlotChosen implies slot");
        Ok(BookingCreate {
            service_id: service.id,
            stylist_id: stylist.id,
            start_time: slot.start_time,
        })
    }

    fn adopt_pending(&mut self, booking: Booking) -> &Booking {
        self.state = ReservationState::Pending(booking.id);
        self.booking = Some(booking);
        self.booking.as_ref().expect("just set")
    }

    /// Submit payment against the pending reservation. On success the
    /// booking transitions to confirmed; on failure it stays pending.
    pub async fn pay(
        &mut self,
        session: &SessionContext,
        card: PaymentRequest,
        mode: PaymentMode,
    ) -> Result<&Booking, SalonError> {
        let ReservationState::Pending(booking_id) = self.state else {
            return Err(SalonError::InvalidState(
                "only a pending booking can be paid".into(),
            ));
        };
        validate_card_presence(&card)?;

        let booking = self
            .api
            .pay(session.bearer(), booking_id, &card, mode)
            .await?;
        self.state = ReservationState::Confirmed(booking.id);
        self.booking = Some(booking);
        Ok(self.booking.as_ref().expect("just set"))
    }

    /// Cancel the tracked reservation. Idempotent: cancelling an
    /// already-cancelled booking is a no-op.
    pub async fn cancel(&mut self, session: &SessionContext) -> Result<(), SalonError> {
        let booking_id = match self.state {
            ReservationState::Pending(id) | ReservationState::Confirmed(id) => id,
            ReservationState::Cancelled(_) => return Ok(()),
            _ => {
                return Err(SalonError::InvalidState(
                    "there is no reservation to cancel".into(),
                ))
            }
        };
        let token = session.bearer().ok_or_else(|| SalonError::Auth {
            message: "log in to cancel a booking".into(),
        })?;

        let booking = self.api.cancel(token, booking_id).await?;
        self.state = ReservationState::Cancelled(booking.id);
        self.booking = Some(booking);
        Ok(())
    }
}

/// Presence-only checks; card validation proper is the backend's job.
pub fn validate_card_presence(card: &PaymentRequest) -> Result<(), SalonError> {
    if card.amount <= 0.0 {
        return Err(SalonError::MissingField("payment amount".into()));
    }
    for (field, value) in [
        ("card number", &card.card_number),
        ("cvv", &card.cvv),
        ("cardholder name", &card.cardholder_name),
    ] {
        if value.trim().is_empty() {
            return Err(SalonError::MissingField(field.into()));
        }
    }
    Ok(())
}
