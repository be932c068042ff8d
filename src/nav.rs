// src/nav.rs — Navigation guard
//
// Exactly one view is active at a time. A denied navigation never errors:
// it lands on Home and records a warning for the UI to surface.

use crate::session::{Role, SessionContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Browse,
    Booking,
    MyBookings,
    Owner,
    StylistSchedule,
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            View::Home => "home",
            View::Browse => "browse",
            View::Booking => "booking",
            View::MyBookings => "my-bookings",
            View::Owner => "owner",
            View::StylistSchedule => "stylist-schedule",
        };
        f.write_str(s)
    }
}

/// Whether `session` may enter `view`. Pure; the decoded role is a UI
/// convenience only — the backend re-checks every privileged call.
pub fn access_rule(view: View, session: &SessionContext) -> bool {
    match view {
        View::Home => true,
        View::Browse | View::Booking | View::MyBookings => {
            session.is_authenticated() || session.is_guest()
        }
        View::Owner => session.role() == Some(Role::Owner),
        View::StylistSchedule => session.role() == Some(Role::Stylist),
    }
}

pub struct Navigator {
    active: View,
    last_denial: Option<String>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            active: View::Home,
            last_denial: None,
        }
    }

    /// Enter `view` if the access rule holds; otherwise redirect to Home
    /// with a warning. Returns the view that is now active. Entering a
    /// view always fully deactivates the previous one.
    pub fn navigate(&mut self, view: View, session: &SessionContext) -> View {
        if access_rule(view, session) {
            self.active = view;
            self.last_denial = None;
        } else {
            let warning = match view {
                View::Owner => format!("Access denied: '{view}' requires the owner role."),
                View::StylistSchedule => {
                    format!("Access denied: '{view}' requires the stylist role.")
                }
                _ => format!("Please log in (or continue as guest) to open '{view}'."),
            };
            tracing::warn!("{warning}");
            self.active = View::Home;
            self.last_denial = Some(warning);
        }
        self.active
    }

    pub fn active(&self) -> View {
        self.active
    }

    /// Warning from the most recent denied navigation, cleared by the
    /// next successful one.
    pub fn last_denial(&self) -> Option<&str> {
        self.last_denial.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionContext;

    const CUSTOMER_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiI0MiIsInJvbGUiOiJjdXN0b21lciIsImV4cCI6NDEwMjQ0NDgwMH0.sig";
    const STYLIST_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiI5Iiwicm9sZSI6InN0eWxpc3QiLCJleHAiOjQxMDI0NDQ4MDB9.sig";
    const OWNER_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiI3Iiwicm9sZSI6Im93bmVyIiwiZXhwIjo0MTAyNDQ0ODAwfQ.sig";

    fn anonymous() -> (tempfile::TempDir, SessionContext) {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionContext::resolve_from(dir.path().join("session.json"));
        (dir, session)
    }

    fn logged_in(token: &str) -> (tempfile::TempDir, SessionContext) {
        let (dir, mut session) = anonymous();
        session.login(token.to_string()).unwrap();
        (dir, session)
    }

    #[test]
    fn home_is_always_reachable() {
        let (_dir, session) = anonymous();
        assert!(access_rule(View::Home, &session));
    }

    #[test]
    fn anonymous_is_denied_booking_views() {
        let (_dir, session) = anonymous();
        for view in [View::Browse, View::Booking, View::MyBookings] {
            assert!(!access_rule(view, &session), "{view} should be denied");
        }
    }

    #[test]
    fn guest_reaches_booking_but_not_role_views() {
        let (_dir, mut session) = anonymous();
        session.enter_guest_mode().unwrap();
        assert!(access_rule(View::Booking, &session));
        assert!(access_rule(View::MyBookings, &session));
        assert!(!access_rule(View::Owner, &session));
        assert!(!access_rule(View::StylistSchedule, &session));
    }

    #[test]
    fn role_views_require_matching_role() {
        let (_dir, customer) = logged_in(CUSTOMER_TOKEN);
        assert!(!access_rule(View::Owner, &customer));
        assert!(!access_rule(View::StylistSchedule, &customer));

        let (_dir, stylist) = logged_in(STYLIST_TOKEN);
        assert!(access_rule(View::StylistSchedule, &stylist));
        assert!(!access_rule(View::Owner, &stylist));

        let (_dir, owner) = logged_in(OWNER_TOKEN);
        assert!(access_rule(View::Owner, &owner));
        assert!(!access_rule(View::StylistSchedule, &owner));
    }

    #[test]
    fn denied_navigation_redirects_home_with_warning() {
        let (_dir, session) = anonymous();
        let mut nav = Navigator::new();
        let landed = nav.navigate(View::MyBookings, &session);
        assert_eq!(landed, View::Home);
        assert_eq!(nav.active(), View::Home);
        assert!(nav.last_denial().is_some());
    }

    #[test]
    fn successful_navigation_clears_denial_and_replaces_view() {
        let (_dir, mut session) = anonymous();
        let mut nav = Navigator::new();
        nav.navigate(View::Owner, &session);
        assert!(nav.last_denial().is_some());

        session.enter_guest_mode().unwrap();
        let landed = nav.navigate(View::Booking, &session);
        assert_eq!(landed, View::Booking);
        assert_eq!(nav.active(), View::Booking);
        assert!(nav.last_denial().is_none());
    }
}
