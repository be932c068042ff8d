// src/cli/bookings.rs — Booking list, standalone pay/cancel, stylist schedule

use std::sync::Arc;

use crate::api::types::{Booking, BookingStatus, PaymentMode, PaymentRequest};
use crate::api::BookingApi;
use crate::infra::errors::SalonError;
use crate::nav::{Navigator, View};
use crate::session::SessionContext;
use crate::workflow::actions::actions_for;
use crate::workflow::validate_card_presence;

pub async fn run_list(api: Arc<dyn BookingApi>, session: &SessionContext) -> anyhow::Result<()> {
    let mut nav = Navigator::new();
    if nav.navigate(View::MyBookings, session) != View::MyBookings {
        if let Some(warning) = nav.last_denial() {
            println!("{warning}");
        }
        return Ok(());
    }

    // Guest bookings live under contact details, not a session; this view
    // needs an account. No request is made.
    let Some(token) = session.bearer() else {
        println!("Please log in to view your bookings.");
        return Ok(());
    };

    let bookings = api.my_bookings(token).await?;
    if bookings.is_empty() {
        println!("No bookings yet. Book one with `salonctl book`.");
        return Ok(());
    }
    print_bookings(&bookings);
    Ok(())
}

fn print_bookings(bookings: &[Booking]) {
    println!(
        "  {:<6} {:<9} {:<18} {:<11} {}",
        "ID", "Service", "Start", "Status", "Actions"
    );
    for bk in bookings {
        let actions: Vec<String> = actions_for(bk.status)
            .iter()
            .map(|a| a.to_string())
            .collect();
        let actions = if actions.is_empty() {
            "-".to_string()
        } else {
            actions.join(", ")
        };
        println!(
            "  #{:<5} #{:<8} {:<18} {:<11} {}",
            bk.id,
            bk.service_id,
            bk.start_time.format("%Y-%m-%d %H:%M"),
            bk.status.to_string(),
            actions
        );
    }
}

pub async fn run_pay(
    api: Arc<dyn BookingApi>,
    session: &SessionContext,
    booking_id: i64,
    amount: Option<f64>,
    deposit: bool,
) -> anyhow::Result<()> {
    // Verify the pending precondition when we can see the booking.
    // Guest-path bookings are not listable; the backend enforces there.
    if let Some(token) = session.bearer() {
        let bookings = api.my_bookings(token).await?;
        match bookings.iter().find(|b| b.id == booking_id) {
            Some(bk) if bk.status != BookingStatus::Pending => {
                println!(
                    "Booking #{} is {}; only pending bookings can be paid.",
                    booking_id, bk.status
                );
                return Ok(());
            }
            None => {
                println!("Booking #{booking_id} is not yours or does not exist.");
                return Ok(());
            }
            Some(_) => {}
        }
    }

    let amount = match amount {
        Some(a) => a,
        None => inquire::Text::new("Amount:")
            .prompt()?
            .trim()
            .parse::<f64>()
            .map_err(|_| anyhow::anyhow!("not a valid amount"))?,
    };
    let mode = if deposit {
        PaymentMode::Deposit
    } else {
        PaymentMode::Full
    };
    let card = prompt_card(amount)?;
    validate_card_presence(&card)?;

    match api.pay(session.bearer(), booking_id, &card, mode).await {
        Ok(booking) => {
            println!("Payment accepted. Booking #{} is {}.", booking.id, booking.status);
            // Refresh the visible list so the new status shows.
            if let Some(token) = session.bearer() {
                if let Ok(bookings) = api.my_bookings(token).await {
                    print_bookings(&bookings);
                }
            }
        }
        Err(e) => {
            println!("{e}");
            println!("Booking #{booking_id} remains pending; you may retry payment or cancel.");
        }
    }
    Ok(())
}

fn prompt_card(amount: f64) -> anyhow::Result<PaymentRequest> {
    Ok(PaymentRequest {
        amount,
        card_number: inquire::Text::new("Card number:").prompt()?,
        expiry_month: inquire::Text::new("Expiry month (1-12):")
            .prompt()?
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("not a valid month"))?,
        expiry_year: inquire::Text::new("Expiry year:")
            .prompt()?
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("not a valid year"))?,
        cvv: inquire::Password::new("CVV:")
            .with_display_mode(inquire::PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()?,
        cardholder_name: inquire::Text::new("Cardholder name:").prompt()?,
    })
}

pub async fn run_cancel(
    api: Arc<dyn BookingApi>,
    session: &SessionContext,
    booking_id: i64,
    yes: bool,
) -> anyhow::Result<()> {
    let Some(token) = session.bearer() else {
        println!("Please log in to cancel a booking.");
        return Ok(());
    };

    if !yes {
        let confirmed = inquire::Confirm::new(&format!("Cancel booking #{booking_id}?"))
            .with_default(false)
            .prompt()?;
        if !confirmed {
            println!("Kept booking #{booking_id}.");
            return Ok(());
        }
    }

    match api.cancel(token, booking_id).await {
        Ok(booking) => println!("Booking #{} is {}.", booking.id, booking.status),
        Err(e @ SalonError::Api { .. }) => {
            // Cancelling twice is harmless; the message is still shown.
            println!("{e}");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

pub async fn run_schedule(api: Arc<dyn BookingApi>, session: &SessionContext) -> anyhow::Result<()> {
    let mut nav = Navigator::new();
    if nav.navigate(View::StylistSchedule, session) != View::StylistSchedule {
        if let Some(warning) = nav.last_denial() {
            println!("{warning}");
        }
        return Ok(());
    }
    // The stylist gate only passes for an authenticated stylist.
    let Some(token) = session.bearer() else {
        return Ok(());
    };

    let bookings = api.stylist_schedule(token).await?;
    if bookings.is_empty() {
        println!("No bookings assigned yet.");
        return Ok(());
    }
    println!(
        "  {:<18} {:<24} {:<9} {}",
        "Start", "Customer", "Service", "Status"
    );
    for bk in &bookings {
        let customer = match (&bk.customer_name, bk.customer_id) {
            (Some(name), _) if bk.is_walkin => format!("{name} (walk-in)"),
            (Some(name), _) => name.clone(),
            (None, Some(id)) => format!("user #{id}"),
            (None, None) => "-".into(),
        };
        println!(
            "  {:<18} {:<24} #{:<8} {}",
            bk.start_time.format("%Y-%m-%d %H:%M"),
            customer,
            bk.service_id,
            bk.status
        );
    }
    Ok(())
}
