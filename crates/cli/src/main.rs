//! Kasanje CLI - one-shot administrative tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the reference collections (categories, testimonials)
//! FIREBASE_SERVICE_ACCOUNT='{"project_id":...}' \
//! FIRESTORE_ACCESS_TOKEN=... \
//! kasanje-cli seed
//! ```
//!
//! # Commands
//!
//! - `seed` - Write the fixed category/testimonial fixtures, once

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod seed;

#[derive(Parser)]
#[command(name = "kasanje-cli")]
#[command(author, version, about = "Kasanje marketplace CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the reference collections with their fixed content.
    ///
    /// Idempotent: a guarded atomic commit means repeated or concurrent
    /// runs never duplicate the fixtures.
    Seed,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Seed => seed::run().await,
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}
