//! Redline CLI - browse the catalog and run storefront flows from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Shop page, hoodies from $60 up, cheapest first
//! redline products --category hood --min 60 --sort price-low-high
//!
//! # Product page
//! redline product rl-tee-001
//!
//! # Header search
//! redline search pit --limit 5
//!
//! # Full checkout from a form file
//! redline order --item rl-tee-001:M:Black:2 --coupon REDLINE10 --form checkout.json
//!
//! # Walk through add to cart → coupon → place order with sample data
//! redline demo --instant
//! ```
//!
//! Output is pretty-printed JSON on stdout; logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};

use redline_core::{CheckoutForm, ContactForm, SortKey};
use redline_storefront::commands::{cart, catalog, checkout, contact};
use redline_storefront::error::ApiError;
use redline_storefront::state::StorefrontConfig;
use redline_storefront::{init_tracing, Storefront};

#[derive(Parser)]
#[command(name = "redline")]
#[command(author, version, about = "Redline Apparel storefront CLI")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "REDLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Skip the simulated network delays
    #[arg(long, global = true)]
    instant: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products through the shop filters
    Products {
        /// Category substring ("car", "hood"); "all" keeps everything
        #[arg(short, long, default_value = "")]
        category: String,

        /// Price floor in dollars
        #[arg(long, default_value_t = 0)]
        min: i64,

        /// Price slider position, scaled ×100 (defaults to the configured slider max)
        #[arg(long)]
        max: Option<i64>,

        /// Size to include (repeatable)
        #[arg(short, long)]
        size: Vec<String>,

        /// Color to include (repeatable)
        #[arg(long)]
        color: Vec<String>,

        /// featured, price-low-high, price-high-low, newest, best-selling
        #[arg(long, default_value = "featured")]
        sort: SortKey,
    },
    /// Show a product page
    Product {
        /// Product id ("rl-tee-001")
        id: String,
    },
    /// List categories with product counts
    Categories,
    /// Home page rails (featured, best sellers, new arrivals)
    Home,
    /// Filter sidebar options
    Filters,
    /// Search products by name, category or tag
    Search {
        query: String,

        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Build a cart and place an order
    Order {
        /// Cart line as `id:size:color[:qty]` (repeatable)
        #[arg(short, long = "item", value_parser = parse_item, required = true)]
        items: Vec<cart::AddToCartRequest>,

        /// Coupon code
        #[arg(long)]
        coupon: Option<String>,

        /// Checkout form as JSON
        #[arg(short, long)]
        form: PathBuf,
    },
    /// Send a contact message from a JSON form
    Contact {
        #[arg(short, long)]
        form: PathBuf,
    },
    /// Walk through add to cart, coupon and checkout with sample data
    Demo,
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<ApiError>() {
            Some(api) => {
                // The structured error is the command's output.
                if let Ok(json) = serde_json::to_string_pretty(api) {
                    println!("{json}");
                }
                error!(code = ?api.code, "{}", api.message);
            }
            None => error!("Command failed: {e}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StorefrontConfig::load(cli.config)?;
    if cli.instant {
        config.simulation.add_to_cart_delay_ms = 0;
        config.simulation.checkout_delay_ms = 0;
        config.simulation.contact_delay_ms = 0;
    }
    let shop = Storefront::new(config)?;

    match cli.command {
        Commands::Products {
            category,
            min,
            max,
            size,
            color,
            sort,
        } => {
            let mut criteria = catalog::default_criteria(&shop.config)
                .with_category(category)
                .with_price_range(min, max.unwrap_or(shop.config.filters.price_slider_max))
                .with_sort(sort);
            criteria.sizes.extend(size);
            criteria.colors.extend(color);

            print_json(&catalog::list_products(shop.catalog, &shop.config, criteria))?;
        }
        Commands::Product { id } => {
            print_json(&catalog::get_product(shop.catalog, &shop.config, &id)?)?;
        }
        Commands::Categories => {
            print_json(&catalog::list_categories(shop.catalog, &shop.config))?;
        }
        Commands::Home => {
            print_json(&catalog::home_sections(shop.catalog, &shop.config))?;
        }
        Commands::Filters => {
            print_json(&catalog::filter_options(shop.catalog, &shop.config))?;
        }
        Commands::Search { query, limit } => {
            print_json(&catalog::search_products(
                shop.catalog,
                &shop.config,
                &query,
                limit,
            )?)?;
        }
        Commands::Order {
            items,
            coupon,
            form,
        } => {
            let form: CheckoutForm = read_json(&form)?;
            let confirmation = place(&shop, items, coupon.as_deref(), form).await?;
            print_json(&confirmation)?;
        }
        Commands::Contact { form } => {
            let form: ContactForm = read_json(&form)?;
            print_json(&contact::send_message(&shop.contact, &shop.config, form).await?)?;
        }
        Commands::Demo => demo(&shop).await?,
        Commands::Config => print_json(&shop.config)?,
    }
    Ok(())
}

/// Adds every item, applies the coupon and places the order.
async fn place(
    shop: &Storefront,
    items: Vec<cart::AddToCartRequest>,
    coupon: Option<&str>,
    form: CheckoutForm,
) -> Result<redline_storefront::state::OrderConfirmation, ApiError> {
    for item in items {
        cart::add_to_cart(shop.catalog, &shop.cart, &shop.config, item).await?;
    }
    if let Some(code) = coupon {
        checkout::apply_coupon(&shop.cart, &shop.checkout, &shop.config, code)?;
    }
    checkout::place_order(&shop.cart, &shop.checkout, &shop.config, form).await
}

async fn demo(shop: &Storefront) -> Result<(), Box<dyn std::error::Error>> {
    info!("Adding two items to the cart");
    let items = vec![
        parse_item("rl-tee-001:M:Black:2")?,
        parse_item("rl-hat-001:One Size:Red")?,
    ];
    for item in items {
        cart::add_to_cart(shop.catalog, &shop.cart, &shop.config, item).await?;
    }
    print_json(&cart::get_cart(&shop.cart, &shop.config))?;

    info!("Applying coupon REDLINE10");
    print_json(&checkout::apply_coupon(
        &shop.cart,
        &shop.checkout,
        &shop.config,
        "REDLINE10",
    )?)?;

    info!("Placing order");
    let confirmation =
        checkout::place_order(&shop.cart, &shop.checkout, &shop.config, sample_form()).await?;
    print_json(&confirmation)?;
    Ok(())
}

fn sample_form() -> CheckoutForm {
    CheckoutForm {
        first_name: "Brian".into(),
        last_name: "O'Conner".into(),
        email: "brian@example.com".into(),
        address: "1327 Bellevue Ave".into(),
        city: "Los Angeles".into(),
        state: "CA".into(),
        zip_code: "90026".into(),
        phone: "(213) 555-0199".into(),
        card_number: "4242 4242 4242 4242".into(),
        card_name: "Brian O'Conner".into(),
        expiry_date: "12/29".into(),
        cvv: "321".into(),
    }
}

/// Parses `id:size:color[:qty]`.
fn parse_item(raw: &str) -> Result<cart::AddToCartRequest, String> {
    let parts: Vec<&str> = raw.split(':').collect();
    let (product_id, size, color, quantity) = match parts.as_slice() {
        [id, size, color] => (*id, *size, *color, None),
        [id, size, color, qty] => {
            let qty = qty
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("invalid quantity '{qty}' in '{raw}'"))?;
            (*id, *size, *color, Some(qty))
        }
        _ => return Err(format!("expected id:size:color[:qty], got '{raw}'")),
    };

    Ok(cart::AddToCartRequest {
        product_id: product_id.trim().to_string(),
        quantity,
        size: size.trim().to_string(),
        color: color.trim().to_string(),
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_item() {
        let item = parse_item("rl-tee-001:M:Black:2").unwrap();
        assert_eq!(item.product_id, "rl-tee-001");
        assert_eq!(item.quantity, Some(2));

        let item = parse_item("rl-hat-001:One Size:Red").unwrap();
        assert_eq!(item.size, "One Size");
        assert_eq!(item.quantity, None);

        assert!(parse_item("rl-tee-001:M").is_err());
        assert!(parse_item("rl-tee-001:M:Black:two").is_err());
    }

    #[test]
    fn test_products_args() {
        let cli = Cli::try_parse_from([
            "redline", "products", "--category", "hood", "--size", "M", "--size", "L", "--sort",
            "price-high-low",
        ])
        .unwrap();
        match cli.command {
            Commands::Products { category, size, sort, max, .. } => {
                assert_eq!(category, "hood");
                assert_eq!(size, ["M", "L"]);
                assert_eq!(sort, SortKey::PriceHighLow);
                assert_eq!(max, None);
            }
            _ => panic!("expected products"),
        }
    }

    #[test]
    fn test_sample_form_is_valid() {
        assert!(sample_form().validate().is_ok());
    }
}
