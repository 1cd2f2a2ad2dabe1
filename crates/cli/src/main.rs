//! Emporium CLI - a command-line storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! emporium products list --category electronics --min-price 10 --max-price 200
//! emporium products search backpack
//!
//! # Manage the cart
//! emporium cart add 1
//! emporium cart set 1 3
//!
//! # Sign in and check out
//! emporium auth login -e ada@example.com -p hunter22
//! emporium checkout --first-name Ada --last-name Lovelace --address "12 St James's Square" \
//!     --city London --state LDN --zip-code "SW1Y 4JH" --phone "+44 20 7946 0000"
//! ```
//!
//! # Commands
//!
//! - `products` - Browse, filter and search the catalog
//! - `cart` - Inspect and change the cart
//! - `wishlist` - Inspect and change the wishlist
//! - `auth` - Register, sign in and edit the profile
//! - `orders` - Order history of the signed-in user
//! - `checkout` - Place an order for the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use emporium_core::{DEFAULT_COUNTRY, ProductId, ViewType};
use emporium_storefront::Storefront;
use emporium_storefront::config::StorefrontConfig;
use rust_decimal::Decimal;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "emporium")]
#[command(author, version, about = "Emporium storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Account and session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Show the signed-in user's orders
    Orders,
    /// Place an order for the current cart
    Checkout(CheckoutArgs),
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products, optionally filtered
    List(ListArgs),
    /// Show one product
    Show { id: ProductId },
    /// List products of one category, fetched from the catalog
    Category {
        /// Category label (e.g. "electronics", "Jewelry", "all")
        label: String,
    },
    /// Search titles and descriptions
    Search { query: String },
    /// List categories
    Categories,
    /// Show the first few products of the catalog
    Featured {
        #[arg(short = 'n', long, default_value_t = 4)]
        count: usize,
    },
}

#[derive(Args)]
struct ListArgs {
    /// Category label
    #[arg(short, long)]
    category: Option<String>,

    /// Listing query string, e.g. "?category=men's clothing"
    #[arg(long)]
    query: Option<String>,

    /// Lowest price
    #[arg(long)]
    min_price: Option<Decimal>,

    /// Highest price
    #[arg(long)]
    max_price: Option<Decimal>,

    /// Minimum rating (0-5)
    #[arg(short, long)]
    rating: Option<u8>,

    /// Layout (`grid` or `list`)
    #[arg(long, default_value = "grid")]
    view: ViewType,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add one unit of a product
    Add { id: ProductId },
    /// Remove one unit of a product
    Remove { id: ProductId },
    /// Set the quantity of a line
    Set { id: ProductId, quantity: u32 },
    /// Remove a line entirely
    Drop { id: ProductId },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show the wishlist
    Show,
    /// Add a product
    Add { id: ProductId },
    /// Remove a product
    Remove { id: ProductId },
    /// Empty the wishlist
    Clear,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Create an account and sign in
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Edit the signed-in user's profile
    Update {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        /// New password; empty keeps the current one
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[derive(Args)]
struct CheckoutArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    /// Contact email; defaults to the account email
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long)]
    zip_code: String,
    #[arg(long, default_value = DEFAULT_COUNTRY)]
    country: String,
    #[arg(long)]
    phone: String,
    /// Payment method token from the processor
    #[arg(long, default_value = "pm_card_visa")]
    payment_method: String,
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
    let config = StorefrontConfig::from_env()?;
    let shop = Storefront::open(&config)?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List(args) => commands::products::list(&shop, args.into()).await?,
            ProductsAction::Show { id } => commands::products::show(&shop, id).await?,
            ProductsAction::Category { label } => {
                commands::products::by_category(&shop, &label).await?;
            }
            ProductsAction::Search { query } => commands::products::search(&shop, &query).await?,
            ProductsAction::Categories => commands::products::categories(&shop).await?,
            ProductsAction::Featured { count } => {
                commands::products::featured(&shop, count).await?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&shop),
            CartAction::Add { id } => commands::cart::add(&shop, id).await?,
            CartAction::Remove { id } => commands::cart::remove(&shop, id),
            CartAction::Set { id, quantity } => commands::cart::set(&shop, id, quantity)?,
            CartAction::Drop { id } => commands::cart::drop_line(&shop, id),
            CartAction::Clear => commands::cart::clear(&shop),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(&shop),
            WishlistAction::Add { id } => commands::wishlist::add(&shop, id).await?,
            WishlistAction::Remove { id } => commands::wishlist::remove(&shop, id),
            WishlistAction::Clear => commands::wishlist::clear(&shop),
        },
        Commands::Auth { action } => match action {
            AuthAction::Register {
                first_name,
                last_name,
                email,
                password,
            } => {
                commands::auth::register(&shop, first_name, last_name, email, password).await?;
            }
            AuthAction::Login { email, password } => {
                commands::auth::login(&shop, email, password).await?;
            }
            AuthAction::Logout => commands::auth::logout(&shop).await,
            AuthAction::Whoami => commands::auth::whoami(&shop),
            AuthAction::Update {
                name,
                email,
                password,
            } => commands::auth::update(&shop, name, email, password).await?,
        },
        Commands::Orders => commands::orders::list(&shop)?,
        Commands::Checkout(args) => commands::checkout::run(&shop, args.into()).await?,
    }
    Ok(())
}

impl From<ListArgs> for commands::products::ListOptions {
    fn from(args: ListArgs) -> Self {
        Self {
            category: args.category,
            query: args.query,
            min_price: args.min_price,
            max_price: args.max_price,
            rating: args.rating,
            view: args.view,
        }
    }
}

impl From<CheckoutArgs> for commands::checkout::CheckoutOptions {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            address: args.address,
            city: args.city,
            state: args.state,
            zip_code: args.zip_code,
            country: args.country,
            phone_number: args.phone,
            payment_method: args.payment_method,
        }
    }
}
