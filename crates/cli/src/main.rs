//! Cardfile CLI - Address-book tools for the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List every contact
//! cardfile list
//!
//! # Show one contact
//! cardfile get 3
//!
//! # Add a contact
//! cardfile add -f Ann -l Lee -e a@x.com --category friend
//!
//! # Update a contact
//! cardfile update 3 -f Ann -l Lee -e ann.lee@x.com
//!
//! # Delete a contact
//! cardfile delete 3
//!
//! # Search contacts
//! cardfile search --query acme --category business
//! ```
//!
//! # Environment Variables
//!
//! - `CARDFILE_API_URL` - Root URL of the remote address-book API
//!   (default: `http://localhost:8081/api`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::contacts::ContactArgs;

#[derive(Parser)]
#[command(name = "cardfile")]
#[command(author, version, about = "Cardfile address-book CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every contact
    List,
    /// Show a single contact
    Get {
        /// Contact id
        id: i64,
    },
    /// Add a new contact
    Add {
        #[command(flatten)]
        contact: ContactArgs,
    },
    /// Replace an existing contact
    Update {
        /// Contact id
        id: i64,

        #[command(flatten)]
        contact: ContactArgs,
    },
    /// Delete a contact
    Delete {
        /// Contact id
        id: i64,
    },
    /// Search contacts by query and category
    Search {
        /// Case-insensitive text matched against names, email, and company
        #[arg(short, long, default_value = "")]
        query: String,

        /// Exact category to keep (`personal`, `business`, `family`, `friend`, ...)
        #[arg(short, long, default_value = "")]
        category: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::List => commands::contacts::list().await?,
        Commands::Get { id } => commands::contacts::get(id).await?,
        Commands::Add { contact } => commands::contacts::add(contact).await?,
        Commands::Update { id, contact } => commands::contacts::update(id, contact).await?,
        Commands::Delete { id } => commands::contacts::delete(id).await?,
        Commands::Search { query, category } => {
            commands::contacts::search(&query, &category).await?;
        }
    }
    Ok(())
}
