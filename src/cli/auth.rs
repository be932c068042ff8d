// src/cli/auth.rs — Register, login, logout, guest mode, status

use std::sync::Arc;

use crate::api::types::RegisterRequest;
use crate::api::BookingApi;
use crate::session::SessionContext;

pub async fn run_register(api: Arc<dyn BookingApi>) -> anyhow::Result<()> {
    let email = inquire::Text::new("Email:").prompt()?;
    let full_name = inquire::Text::new("Full name:").prompt()?;
    let password = inquire::Password::new("Password:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()?;

    let request = RegisterRequest {
        email,
        full_name,
        password,
    };
    api.register(&request).await?;
    println!("Registered. Log in with `salonctl login`.");
    Ok(())
}

pub async fn run_login(
    api: Arc<dyn BookingApi>,
    session: &mut SessionContext,
    email: Option<String>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(e) => e,
        None => inquire::Text::new("Email:").prompt()?,
    };
    let password = inquire::Password::new("Password:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let token = api.login(&email, &password).await?;
    session.login(token)?;

    match session.role() {
        Some(role) => println!("Logged in as {email} ({role})."),
        None => println!("Logged in as {email}."),
    }
    Ok(())
}

pub fn run_logout(session: &mut SessionContext) -> anyhow::Result<()> {
    session.logout()?;
    println!("Logged out.");
    Ok(())
}

pub fn run_guest(session: &mut SessionContext) -> anyhow::Result<()> {
    let had_token = session.is_authenticated();
    session.enter_guest_mode()?;
    if had_token {
        println!("Previous session cleared.");
    }
    println!("Guest mode: you can book now; bookings will ask for your contact details.");
    Ok(())
}

pub fn run_status(session: &SessionContext) -> anyhow::Result<()> {
    println!("salonctl v{}", env!("CARGO_PKG_VERSION"));
    println!();
    match (session.is_guest(), session.role()) {
        (true, _) => println!("  Identity:  guest (no account)"),
        (false, Some(role)) => {
            match session.user_id() {
                Some(id) => println!("  Identity:  user #{id}"),
                None => println!("  Identity:  authenticated"),
            }
            println!("  Role:      {role}");
        }
        (false, None) => println!("  Identity:  anonymous (not logged in)"),
    }
    Ok(())
}
