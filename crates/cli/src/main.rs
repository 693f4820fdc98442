//! Kebumify CLI - database migrations and account management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! kb-cli migrate
//!
//! # Create an admin account
//! kb-cli account create-admin -e admin@kebumify.id -p 'rahasia-banget' -s Kebumify -w 081234567890
//!
//! # Review sellers
//! kb-cli account pending
//! kb-cli account approve -e sri@kebumen.id
//! kb-cli account reject -e sri@kebumen.id
//! ```
//!
//! # Environment Variables
//!
//! - `KEBUMIFY_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use kebumify_web::services::auth::RegistrationInput;

mod commands;

#[derive(Parser)]
#[command(name = "kb-cli")]
#[command(author, version, about = "Kebumify CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage seller and admin accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create an approved admin account
    CreateAdmin {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password (at least 8 characters)
        #[arg(short, long)]
        password: String,

        /// Store or team name shown on the dashboard
        #[arg(short, long, default_value = "Kebumify")]
        store_name: String,

        /// WhatsApp number, e.g. 081234567890
        #[arg(short, long)]
        whatsapp: String,
    },
    /// Approve a seller account
    Approve {
        /// Seller email address
        #[arg(short, long)]
        email: String,
    },
    /// Reject (or revoke) a seller account
    Reject {
        /// Seller email address
        #[arg(short, long)]
        email: String,
    },
    /// List accounts waiting for approval
    Pending,
}

#[tokio::main]
async fn main() {
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Account { action } => match action {
            AccountAction::CreateAdmin {
                email,
                password,
                store_name,
                whatsapp,
            } => {
                commands::account::create_admin(RegistrationInput {
                    email: &email,
                    password: &password,
                    store_name: &store_name,
                    whatsapp: &whatsapp,
                })
                .await?;
            }
            AccountAction::Approve { email } => {
                commands::account::set_active(&email, true).await?;
            }
            AccountAction::Reject { email } => {
                commands::account::set_active(&email, false).await?;
            }
            AccountAction::Pending => commands::account::pending().await?,
        },
    }
    Ok(())
}
