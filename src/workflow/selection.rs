// src/workflow/selection.rs — In-progress booking choice
//
// Mutated only by explicit user action. Any upstream change (service,
// stylist, date) invalidates the downstream slot choice, so a stale
// slot can never survive into a reservation.

use chrono::NaiveDate;

use crate::api::types::{AvailabilityQuery, Service, Stylist, TimeSlot};

/// Identity of the availability query a slot set belongs to. A response
/// is applied only while the key it was dispatched under still matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionKey {
    pub service_id: i64,
    pub stylist_id: Option<i64>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    service: Option<Service>,
    stylist: Option<Stylist>,
    date: Option<NaiveDate>,
    slot: Option<TimeSlot>,
}

impl Selection {
    pub fn choose_service(&mut self, service: Service) {
        self.service = Some(service);
        self.slot = None;
    }

    pub fn choose_stylist(&mut self, stylist: Stylist) {
        self.stylist = Some(stylist);
        self.slot = None;
    }

    pub fn choose_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
        self.slot = None;
    }

    pub fn choose_slot(&mut self, slot: TimeSlot) {
        self.slot = Some(slot);
    }

    pub fn service(&self) -> Option<&Service> {
        self.service.as_ref()
    }

    pub fn stylist(&self) -> Option<&Stylist> {
        self.stylist.as_ref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn slot(&self) -> Option<&TimeSlot> {
        self.slot.as_ref()
    }

    /// Service, stylist, date and slot are all set.
    pub fn is_complete(&self) -> bool {
        self.service.is_some() && self.stylist.is_some() && self.date.is_some() && self.slot.is_some()
    }

    /// Key for an availability query. Needs service and date; the stylist
    /// is optional (omitted means "any qualified stylist").
    pub fn key(&self) -> Option<SelectionKey> {
        Some(SelectionKey {
            service_id: self.service.as_ref()?.id,
            stylist_id: self.stylist.as_ref().map(|s| s.id),
            date: self.date?,
        })
    }

    pub fn availability_query(&self) -> Option<AvailabilityQuery> {
        let key = self.key()?;
        Some(AvailabilityQuery {
            service_id: key.service_id,
            date: key.date,
            stylist_id: key.stylist_id,
        })
    }

    /// One-line confirmation summary of the current choice.
    pub fn summary(&self) -> String {
        let service = self
            .service
            .as_ref()
            .map(|s| format!("{} (${:.2}, {}m)", s.name, s.price, s.duration_minutes))
            .unwrap_or_else(|| "-".into());
        let stylist = self
            .stylist
            .as_ref()
            .map(|s| s.display_name.clone())
            .unwrap_or_else(|| "-".into());
        let when = match (self.date, &self.slot) {
            (_, Some(slot)) => slot.start_time.format("%Y-%m-%d %H:%M").to_string(),
            (Some(date), None) => date.to_string(),
            _ => "-".into(),
        };
        format!("{service} with {stylist} at {when}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn haircut() -> Service {
        Service {
            id: 1,
            name: "Haircut".into(),
            description: None,
            price: 30.0,
            duration_minutes: 30,
        }
    }

    fn jane() -> Stylist {
        Stylist {
            id: 2,
            display_name: "Jane".into(),
            bio: None,
            start_hour: 9,
            end_hour: 20,
        }
    }

    fn slot_at(hour: u32, min: u32) -> TimeSlot {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, hour, min, 0).unwrap();
        TimeSlot {
            start_time: start,
            end_time: start + chrono::Duration::minutes(30),
            stylist_id: Some(2),
        }
    }

    fn full_selection() -> Selection {
        let mut sel = Selection::default();
        sel.choose_service(haircut());
        sel.choose_stylist(jane());
        sel.choose_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        sel.choose_slot(slot_at(9, 30));
        sel
    }

    #[test]
    fn changing_service_clears_chosen_slot() {
        let mut sel = full_selection();
        assert!(sel.is_complete());
        sel.choose_service(Service { id: 3, name: "Color".into(), description: None, price: 80.0, duration_minutes: 90 });
        assert!(sel.slot().is_none());
        assert!(!sel.is_complete());
    }

    #[test]
    fn changing_date_clears_chosen_slot() {
        let mut sel = full_selection();
        sel.choose_date(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert!(sel.slot().is_none());
    }

    #[test]
    fn changing_stylist_clears_chosen_slot() {
        let mut sel = full_selection();
        sel.choose_stylist(Stylist { id: 5, display_name: "Ana".into(), bio: None, start_hour: 10, end_hour: 18 });
        assert!(sel.slot().is_none());
    }

    #[test]
    fn key_requires_service_and_date() {
        let mut sel = Selection::default();
        assert!(sel.key().is_none());
        sel.choose_service(haircut());
        assert!(sel.key().is_none());
        sel.choose_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let key = sel.key().unwrap();
        assert_eq!(key.service_id, 1);
        assert_eq!(key.stylist_id, None);
    }

    #[test]
    fn summary_reflects_slot_over_bare_date() {
        let sel = full_selection();
        assert_eq!(sel.summary(), "Haircut ($30.00, 30m) with Jane at 2024-06-01 09:30");
    }
}
