// src/main.rs — salonctl entry point

use clap::Parser;
use std::sync::Arc;

use salonctl::api::http::HttpBookingApi;
use salonctl::api::BookingApi;
use salonctl::cli::{Cli, Commands};
use salonctl::infra::config::Config;
use salonctl::infra::logger;
use salonctl::session::SessionContext;

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("warn");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    let api: Arc<dyn BookingApi> = Arc::new(HttpBookingApi::new(&config.api)?);

    // Resolve identity once; every command receives the same view of it.
    let mut session = SessionContext::resolve();

    match cli.command {
        Commands::Register => salonctl::cli::auth::run_register(api).await,
        Commands::Login { email } => {
            salonctl::cli::auth::run_login(api, &mut session, email).await
        }
        Commands::Logout => salonctl::cli::auth::run_logout(&mut session),
        Commands::Guest => salonctl::cli::auth::run_guest(&mut session),
        Commands::Status => salonctl::cli::auth::run_status(&session),
        Commands::Services => salonctl::cli::browse::run_services(api, &session).await,
        Commands::Stylists => salonctl::cli::browse::run_stylists(api, &session).await,
        Commands::Book => salonctl::cli::book::run_book(api, &session).await,
        Commands::Bookings => salonctl::cli::bookings::run_list(api, &session).await,
        Commands::Pay {
            booking_id,
            amount,
            deposit,
        } => salonctl::cli::bookings::run_pay(api, &session, booking_id, amount, deposit).await,
        Commands::Cancel { booking_id, yes } => {
            salonctl::cli::bookings::run_cancel(api, &session, booking_id, yes).await
        }
        Commands::Schedule => salonctl::cli::bookings::run_schedule(api, &session).await,
    }
}
