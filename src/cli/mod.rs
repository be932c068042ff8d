// src/cli/mod.rs — CLI definition (clap derive)

pub mod auth;
pub mod book;
pub mod bookings;
pub mod browse;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "salonctl", about = "Book and manage salon appointments from the terminal", version)]
pub struct Cli {
    /// Config file path
    #[arg(long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Register,
    /// Log in and store the session token
    Login {
        /// Account email — prompted for when omitted
        email: Option<String>,
    },
    /// Clear the stored session
    Logout,
    /// Continue as a guest: book with contact details, no account
    Guest,
    /// Show the current identity and role
    Status,
    /// List offerable services
    Services,
    /// List staff members
    Stylists,
    /// Interactive booking: pick service, stylist, date and slot, then
    /// reserve and optionally pay
    Book,
    /// List your bookings with their available actions
    Bookings,
    /// Pay for a pending booking
    Pay {
        booking_id: i64,
        /// Amount to pay — defaults to an interactive prompt
        #[arg(long)]
        amount: Option<f64>,
        /// Pay a partial deposit instead of the full amount
        #[arg(long)]
        deposit: bool,
    },
    /// Cancel a pending or confirmed booking
    Cancel {
        booking_id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the authenticated stylist's assigned bookings
    Schedule,
}
