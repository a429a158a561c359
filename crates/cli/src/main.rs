//! Penny Black CLI - the storefront and admin shell.
//!
//! # Usage
//!
//! ```bash
//! # Load demo accounts and show the sample catalog
//! pb-cli seed
//!
//! # Browse and shop
//! pb-cli catalog list --circle west_bengal
//! pb-cli cart add 2 --quantity 2
//! pb-cli cart show
//!
//! # Pay from the deposit account
//! pb-cli login --email asha@example.in --password penny-red-1841
//! pb-cli wallet deposit 500
//! pb-cli checkout --full-name "Asha Venkatesan" --line1 "12 Marine Drive" \
//!     --city Mumbai --state Maharashtra --pincode 400002 --phone 9876543210
//!
//! # Admin shell (requires an admin sign-in)
//! pb-cli admin orders
//! pb-cli admin set-status --user 2 ORD-1709290800000 shipped
//! ```
//!
//! State persists across invocations in the data directory (`PB_DATA_DIR`,
//! default `./data`), which is what makes a multi-command session work.

// A CLI's output is its interface; the print lints are for the library
// crates.
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use penny_black_core::{OrderStatus, PaymentMethod, Role};
use penny_black_storefront::catalog::{ItemCategory, PostalCircle};
use penny_black_storefront::config::StorefrontConfig;
use penny_black_storefront::{AppState, Result};

mod commands;

#[derive(Parser)]
#[command(name = "pb-cli")]
#[command(author, version, about = "Penny Black marketplace shell")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load demo accounts and print the sample catalog summary
    Seed,
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Create a customer account
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Login email
        #[arg(short, long)]
        email: String,

        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,
    },
    /// Sign in
    Login {
        /// Login email
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Update the signed-in account's display name
    Profile {
        /// New display name
        #[arg(short, long)]
        name: String,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wallet / deposit account
    Wallet {
        #[command(subcommand)]
        action: WalletAction,
    },
    /// Place an order for the current cart
    Checkout {
        /// Recipient name
        #[arg(long)]
        full_name: String,

        /// Street address
        #[arg(long)]
        line1: String,

        /// Apartment / landmark
        #[arg(long)]
        line2: Option<String>,

        /// City or town
        #[arg(long)]
        city: String,

        /// State or union territory
        #[arg(long)]
        state: String,

        /// Six-digit PIN code
        #[arg(long)]
        pincode: String,

        /// Ten-digit mobile number
        #[arg(long)]
        phone: String,

        /// Payment method: wallet or online
        #[arg(long, default_value = "wallet")]
        pay: PaymentMethod,
    },
    /// Order history
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Personal stamp collection
    Collection {
        #[command(subcommand)]
        action: CollectionAction,
    },
    /// Admin shell (requires the admin role)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List items, optionally filtered
    List {
        /// Filter by postal circle (e.g. delhi, tamil_nadu)
        #[arg(long)]
        circle: Option<PostalCircle>,

        /// Filter by category (stamp, cover, sheet)
        #[arg(long)]
        category: Option<ItemCategory>,

        /// Title substring search
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one item in detail
    Show {
        /// Catalog item id
        id: i32,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add an item to the cart
    Add {
        /// Catalog item id
        item: i32,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a cart line (0 removes it)
    Update {
        /// Catalog item id
        item: i32,

        /// New quantity
        #[arg(short, long)]
        quantity: i64,
    },
    /// Remove a line from the cart
    Remove {
        /// Catalog item id
        item: i32,
    },
    /// Empty the cart
    Clear,
    /// Show the cart with computed totals
    Show,
}

#[derive(Subcommand)]
enum WalletAction {
    /// Show the balance and transaction ledger
    Show,
    /// Add money to the deposit account (1 to 50000 rupees)
    Deposit {
        /// Amount in rupees
        amount: Decimal,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List your orders, newest first
    List,
    /// Show one order in detail
    Show {
        /// Order id (ORD-...)
        id: String,
    },
}

#[derive(Subcommand)]
enum CollectionAction {
    /// Show your collection
    List,
    /// Add a catalog item to your collection
    Add {
        /// Catalog item id
        item: i32,
    },
    /// Remove an item from your collection
    Remove {
        /// Catalog item id
        item: i32,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// List orders across accounts
    Orders {
        /// Restrict to one user id
        #[arg(long)]
        user: Option<i32>,

        /// Restrict to one status
        #[arg(long)]
        status: Option<OrderStatus>,
    },
    /// Move an order to a new status
    SetStatus {
        /// User id owning the order
        #[arg(long)]
        user: i32,

        /// Order id (ORD-...)
        order: String,

        /// Target status (shipped, delivered, cancelled)
        status: OrderStatus,
    },
    /// Set the stock for a catalog item
    Restock {
        /// Catalog item id
        item: i32,

        /// New stock level
        stock: u32,
    },
    /// List registered accounts
    Users,
    /// Create an account with an explicit role
    CreateUser {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Login email
        #[arg(short, long)]
        email: String,

        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,

        /// Role (customer, admin)
        #[arg(short, long, default_value = "customer")]
        role: Role,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::debug!(error = %e, "command failed");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::open(config)?;

    match cli.command {
        Commands::Seed => commands::seed::run(&state)?,
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                circle,
                category,
                search,
            } => commands::shop::catalog_list(&state, circle, category, search.as_deref()),
            CatalogAction::Show { id } => commands::shop::catalog_show(&state, id)?,
        },
        Commands::Register {
            name,
            email,
            password,
        } => commands::shop::register(&state, &name, &email, &password)?,
        Commands::Login { email, password } => commands::shop::login(&state, &email, &password)?,
        Commands::Logout => commands::shop::logout(&state)?,
        Commands::Whoami => commands::shop::whoami(&state)?,
        Commands::Profile { name } => commands::shop::profile(&state, &name)?,
        Commands::Cart { action } => match action {
            CartAction::Add { item, quantity } => commands::shop::cart_add(&state, item, quantity)?,
            CartAction::Update { item, quantity } => {
                commands::shop::cart_update(&state, item, quantity)?;
            }
            CartAction::Remove { item } => commands::shop::cart_remove(&state, item)?,
            CartAction::Clear => commands::shop::cart_clear(&state)?,
            CartAction::Show => commands::shop::cart_show(&state)?,
        },
        Commands::Wallet { action } => match action {
            WalletAction::Show => commands::shop::wallet_show(&state)?,
            WalletAction::Deposit { amount } => commands::shop::wallet_deposit(&state, amount)?,
        },
        Commands::Checkout {
            full_name,
            line1,
            line2,
            city,
            state: region,
            pincode,
            phone,
            pay,
        } => commands::shop::checkout(
            &state,
            &full_name,
            &line1,
            line2.as_deref(),
            &city,
            &region,
            &pincode,
            &phone,
            pay,
        )?,
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::shop::orders_list(&state)?,
            OrdersAction::Show { id } => commands::shop::orders_show(&state, &id)?,
        },
        Commands::Collection { action } => match action {
            CollectionAction::List => commands::shop::collection_list(&state)?,
            CollectionAction::Add { item } => commands::shop::collection_add(&state, item)?,
            CollectionAction::Remove { item } => commands::shop::collection_remove(&state, item)?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Orders { user, status } => {
                commands::admin::orders(&state, user, status)?;
            }
            AdminAction::SetStatus {
                user,
                order,
                status,
            } => commands::admin::set_status(&state, user, &order, status)?,
            AdminAction::Restock { item, stock } => commands::admin::restock(&state, item, stock)?,
            AdminAction::Users => commands::admin::users(&state)?,
            AdminAction::CreateUser {
                name,
                email,
                password,
                role,
            } => commands::admin::create_user(&state, &name, &email, &password, role)?,
        },
    }
    Ok(())
}
