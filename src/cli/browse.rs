// src/cli/browse.rs — Catalog listings
//
// Catalog reads fail soft: a backend hiccup degrades to an empty listing
// with a logged warning instead of blocking everything else.

use std::sync::Arc;

use crate::api::types::{Service, Stylist};
use crate::api::BookingApi;
use crate::nav::{Navigator, View};
use crate::session::SessionContext;

fn enter_browse(session: &SessionContext) -> bool {
    let mut nav = Navigator::new();
    if nav.navigate(View::Browse, session) != View::Browse {
        if let Some(warning) = nav.last_denial() {
            println!("{warning}");
        }
        return false;
    }
    true
}

pub async fn run_services(
    api: Arc<dyn BookingApi>,
    session: &SessionContext,
) -> anyhow::Result<()> {
    if !enter_browse(session) {
        return Ok(());
    }
    let services = load_services(api.as_ref()).await;
    if services.is_empty() {
        println!("No services available right now.");
        return Ok(());
    }
    for svc in &services {
        println!(
            "  #{:<4} {:<28} ${:<8.2} {}m",
            svc.id, svc.name, svc.price, svc.duration_minutes
        );
        if let Some(ref desc) = svc.description {
            println!("        {desc}");
        }
    }
    Ok(())
}

pub async fn run_stylists(
    api: Arc<dyn BookingApi>,
    session: &SessionContext,
) -> anyhow::Result<()> {
    if !enter_browse(session) {
        return Ok(());
    }
    let stylists = load_stylists(api.as_ref()).await;
    if stylists.is_empty() {
        println!("No stylists available right now.");
        return Ok(());
    }
    for st in &stylists {
        println!(
            "  #{:<4} {:<20} {:02}:00-{:02}:00",
            st.id, st.display_name, st.start_hour, st.end_hour
        );
        if let Some(ref bio) = st.bio {
            println!("        {bio}");
        }
    }
    Ok(())
}

/// Server-defined order is preserved; never re-sorted client-side.
pub async fn load_services(api: &dyn BookingApi) -> Vec<Service> {
    match api.list_services().await {
        Ok(services) => services,
        Err(e) => {
            tracing::warn!("Could not load services: {e}");
            vec![]
        }
    }
}

pub async fn load_stylists(api: &dyn BookingApi) -> Vec<Stylist> {
    match api.list_stylists().await {
        Ok(stylists) => stylists,
        Err(e) => {
            tracing::warn!("Could not load stylists: {e}");
            vec![]
        }
    }
}
