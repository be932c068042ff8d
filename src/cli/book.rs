// src/cli/book.rs — Interactive booking flow
//
// Drives the reservation workflow end to end: pick service, stylist and
// date, query availability, choose a slot, reserve (guest or
// authenticated), then optionally pay. Every failure returns the
// workflow to a well-defined prior step; nothing retries on its own.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::api::types::{PaymentMode, PaymentRequest, TimeSlot};
use crate::api::BookingApi;
use crate::cli::browse;
use crate::infra::errors::SalonError;
use crate::nav::{Navigator, View};
use crate::session::SessionContext;
use crate::workflow::{GuestContact, ReservationWorkflow};

pub async fn run_book(api: Arc<dyn BookingApi>, session: &SessionContext) -> anyhow::Result<()> {
    let mut nav = Navigator::new();
    if nav.navigate(View::Booking, session) != View::Booking {
        if let Some(warning) = nav.last_denial() {
            println!("{warning}");
        }
        return Ok(());
    }

    let mut workflow = ReservationWorkflow::new(Arc::clone(&api));
    workflow.begin();

    // Service
    let services = browse::load_services(api.as_ref()).await;
    if services.is_empty() {
        println!("No services available right now. Try again later.");
        return Ok(());
    }
    let labels: Vec<String> = services
        .iter()
        .map(|s| format!("{} - ${:.2} ({}m)", s.name, s.price, s.duration_minutes))
        .collect();
    let choice = inquire::Select::new("Service:", labels.clone()).prompt()?;
    let idx = labels.iter().position(|l| l == &choice).unwrap_or(0);
    workflow.select_service(services[idx].clone())?;

    // Stylist
    let stylists = browse::load_stylists(api.as_ref()).await;
    if stylists.is_empty() {
        println!("No stylists available right now. Try again later.");
        return Ok(());
    }
    let labels: Vec<String> = stylists
        .iter()
        .map(|s| format!("{} ({:02}:00-{:02}:00)", s.display_name, s.start_hour, s.end_hour))
        .collect();
    let choice = inquire::Select::new("Stylist:", labels.clone()).prompt()?;
    let idx = labels.iter().position(|l| l == &choice).unwrap_or(0);
    workflow.select_stylist(stylists[idx].clone())?;

    // Date + slot + reserve, looping back on conflicts: the slot may have
    // been taken between the availability query and the reservation.
    let booking = loop {
        let date = prompt_date()?;
        workflow.select_date(date)?;

        let slots = workflow.query_availability().await?.to_vec();
        if slots.is_empty() {
            println!("No availability on {date}.");
            if inquire::Confirm::new("Try another date?")
                .with_default(true)
                .prompt()?
            {
                continue;
            }
            return Ok(());
        }

        let slot = prompt_slot(&slots)?;
        workflow.choose_slot(slot)?;
        println!("  {}", workflow.selection().summary());

        let reserved = if session.is_guest() {
            let contact = prompt_guest_contact()?;
            workflow.reserve_as_guest(&contact).await
        } else {
            workflow.reserve(session).await
        };

        match reserved {
            Ok(booking) => break booking.clone(),
            Err(e @ SalonError::Conflict { .. }) => {
                // Expected race; report it and let the user re-query.
                println!("{e}");
                if inquire::Confirm::new("Pick a different slot?")
                    .with_default(true)
                    .prompt()?
                {
                    continue;
                }
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    };

    println!(
        "Reserved: booking #{} ({}). The slot is held until you pay or cancel.",
        booking.id, booking.status
    );

    if !inquire::Confirm::new("Pay now?").with_default(true).prompt()? {
        println!("You can pay later with `salonctl pay {}`.", booking.id);
        return Ok(());
    }

    let price = workflow
        .selection()
        .service()
        .map(|s| s.price)
        .unwrap_or_default();
    let (card, mode) = prompt_payment(price)?;
    match workflow.pay(session, card, mode).await {
        Ok(booking) => println!("Payment accepted. Booking #{} is {}.", booking.id, booking.status),
        Err(e) => {
            // The reservation survives a failed payment.
            println!("{e}");
            println!(
                "Booking #{} is still pending; pay again with `salonctl pay {}` or cancel it.",
                booking.id, booking.id
            );
        }
    }
    Ok(())
}

fn prompt_date() -> anyhow::Result<NaiveDate> {
    loop {
        let raw = inquire::Text::new("Date (YYYY-MM-DD):").prompt()?;
        match raw.trim().parse::<NaiveDate>() {
            Ok(date) => return Ok(date),
            Err(_) => println!("Not a valid date: {raw}"),
        }
    }
}

fn prompt_slot(slots: &[TimeSlot]) -> anyhow::Result<TimeSlot> {
    let labels: Vec<String> = slots
        .iter()
        .map(|s| {
            format!(
                "{} - {}",
                s.start_time.format("%H:%M"),
                s.end_time.format("%H:%M")
            )
        })
        .collect();
    let choice = inquire::Select::new("Time slot:", labels.clone()).prompt()?;
    let idx = labels.iter().position(|l| l == &choice).unwrap_or(0);
    Ok(slots[idx].clone())
}

fn prompt_guest_contact() -> anyhow::Result<GuestContact> {
    Ok(GuestContact {
        name: inquire::Text::new("Your name:").prompt()?,
        email: inquire::Text::new("Email:").prompt()?,
        phone: inquire::Text::new("Phone:").prompt()?,
    })
}

pub fn prompt_payment(full_price: f64) -> anyhow::Result<(PaymentRequest, PaymentMode)> {
    let mode_labels = vec![
        format!("Full amount (${full_price:.2})"),
        "Deposit (partial, still confirms the booking)".to_string(),
    ];
    let choice = inquire::Select::new("Payment:", mode_labels.clone()).prompt()?;
    let mode = if choice == mode_labels[0] {
        PaymentMode::Full
    } else {
        PaymentMode::Deposit
    };

    let amount = match mode {
        PaymentMode::Full => full_price,
        PaymentMode::Deposit => {
            let raw = inquire::Text::new("Deposit amount:").prompt()?;
            raw.trim()
                .parse::<f64>()
                .map_err(|_| anyhow::anyhow!("not a valid amount: {raw}"))?
        }
    };

    let card = PaymentRequest {
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
    };
    Ok((card, mode))
}
