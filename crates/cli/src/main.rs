//! Lumera CLI - Store operations from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (tokens persist under LUMERA_DATA_DIR)
//! lumera login -u admin -p secret
//!
//! # Browse the catalog
//! lumera products list --search ring
//!
//! # Move an order along
//! lumera orders set-status 66b2f0c81ab5c2d4e8f01234 shipping
//!
//! # Answer a customer message
//! lumera contacts reply 66b2f0c81ab5c2d4e8f09999 "Thanks, it ships Monday."
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` - Session management
//! - `products` - Browse, hide, and unhide catalog entries
//! - `orders` - Browse orders, update status, show revenue stats
//! - `customers` - Browse, lock, and unlock customer accounts
//! - `vouchers` - Browse vouchers and their usage stats
//! - `contacts` - Work the contact inbox
//!
//! Configuration comes from the environment (`LUMERA_API_URL`,
//! `LUMERA_DATA_DIR`, `LUMERA_HTTP_TIMEOUT_SECS`), with `.env` support.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use lumera_client::{ApiClient, ApiConfig, ContactStatus, OrderStatus};

mod commands;

#[derive(Parser)]
#[command(name = "lumera")]
#[command(author, version, about = "Lumera store operations CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to the admin backend
    Login {
        /// Admin username or email
        #[arg(short, long)]
        username: String,

        /// Admin password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and clear the persisted session
    Logout,
    /// Show the signed-in admin
    Whoami,
    /// Browse and manage the product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Browse orders and move them through fulfillment
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Browse and manage customer accounts
    Customers {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Browse vouchers and their usage
    Vouchers {
        #[command(subcommand)]
        action: VoucherAction,
    },
    /// Work the contact inbox
    Contacts {
        #[command(subcommand)]
        action: ContactAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products, hidden ones included
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Items per page
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },
    /// Show one product
    Show {
        /// Product ID
        id: String,
    },
    /// Hide a product from the storefront
    Hide {
        /// Product ID
        id: String,
    },
    /// Put a hidden product back on the storefront
    Unhide {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List orders
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Items per page
        #[arg(short, long, default_value_t = 20)]
        limit: u32,

        /// Only orders in this status (`pending`, `confirmed`, `shipping`,
        /// `success`, `failed`)
        #[arg(short, long)]
        status: Option<OrderStatus>,
    },
    /// Show one order with its line items
    Show {
        /// Order ID
        id: String,
    },
    /// Move an order to a new status
    SetStatus {
        /// Order ID
        id: String,

        /// Target status (`pending`, `confirmed`, `shipping`, `success`,
        /// `failed`)
        status: OrderStatus,

        /// Free-form note recorded with the change
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Revenue totals and a per-status breakdown
    Stats,
}

#[derive(Subcommand)]
enum CustomerAction {
    /// List customer accounts
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Items per page
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },
    /// Show one customer account
    Show {
        /// Customer ID
        id: String,
    },
    /// Lock a customer out of their account
    Lock {
        /// Customer ID
        id: String,
    },
    /// Lift a customer's lock
    Unlock {
        /// Customer ID
        id: String,
    },
}

#[derive(Subcommand)]
enum VoucherAction {
    /// List vouchers
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Items per page
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },
    /// Show one voucher
    Show {
        /// Voucher ID
        id: String,
    },
    /// Voucher counts and usage totals
    Stats,
}

#[derive(Subcommand)]
enum ContactAction {
    /// List contact messages
    List {
        /// Only messages in this status (`pending`, `answered`)
        #[arg(short, long)]
        status: Option<ContactStatus>,
    },
    /// Show the unread message count
    Unread,
    /// Reply to a contact message
    Reply {
        /// Contact message ID
        id: String,

        /// Reply body sent to the customer
        message: String,
    },
    /// Mark a contact message as read
    MarkRead {
        /// Contact message ID
        id: String,
    },
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
    let config = ApiConfig::from_env()?;
    let client = ApiClient::new(&config)?;
    client.initialize()?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&client, &username, &password).await?;
        }
        Commands::Logout => commands::auth::logout(&client).await?,
        Commands::Whoami => commands::auth::whoami(&client),
        Commands::Products { action } => match action {
            ProductAction::List { page, limit } => {
                commands::products::list(&client, page, limit).await?;
            }
            ProductAction::Show { id } => commands::products::show(&client, &id).await?,
            ProductAction::Hide { id } => commands::products::hide(&client, &id).await?,
            ProductAction::Unhide { id } => commands::products::unhide(&client, &id).await?,
        },
        Commands::Orders { action } => match action {
            OrderAction::List {
                page,
                limit,
                status,
            } => commands::orders::list(&client, page, limit, status).await?,
            OrderAction::Show { id } => commands::orders::show(&client, &id).await?,
            OrderAction::SetStatus { id, status, notes } => {
                commands::orders::set_status(&client, &id, status, notes).await?;
            }
            OrderAction::Stats => commands::orders::stats(&client).await?,
        },
        Commands::Customers { action } => match action {
            CustomerAction::List { page, limit } => {
                commands::customers::list(&client, page, limit).await?;
            }
            CustomerAction::Show { id } => commands::customers::show(&client, &id).await?,
            CustomerAction::Lock { id } => commands::customers::lock(&client, &id).await?,
            CustomerAction::Unlock { id } => commands::customers::unlock(&client, &id).await?,
        },
        Commands::Vouchers { action } => match action {
            VoucherAction::List { page, limit } => {
                commands::vouchers::list(&client, page, limit).await?;
            }
            VoucherAction::Show { id } => commands::vouchers::show(&client, &id).await?,
            VoucherAction::Stats => commands::vouchers::stats(&client).await?,
        },
        Commands::Contacts { action } => match action {
            ContactAction::List { status } => commands::contacts::list(&client, status).await?,
            ContactAction::Unread => commands::contacts::unread(&client).await?,
            ContactAction::Reply { id, message } => {
                commands::contacts::reply(&client, &id, &message).await?;
            }
            ContactAction::MarkRead { id } => commands::contacts::mark_read(&client, &id).await?,
        },
    }
    Ok(())
}
