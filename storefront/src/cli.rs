//! Command-line presentation surface.
//!
//! The CLI is a thin stand-in for a UI shell: it parses shopper intent,
//! drives the [`StorefrontSession`] facade, and renders plain-text views.
//! Engine state never leaks out un-rendered, and every catalogue failure
//! surfaces as a visible, retryable error rather than a hang.

use std::fmt::Write as _;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{self, WrapErr, eyre};
use pagination::PageNumber;
use url::Url;
use rust_decimal::Decimal;

use crate::config::StorefrontSettings;
use crate::domain::cart::{AddOutcome, Cart, QuantityOutcome};
use crate::domain::filter::{BrowseView, CategoryGroup, FilterSpec, PriceRange, SortKey};
use crate::domain::ports::{CatalogueSource, StateStore};
use crate::domain::product::{ItemKey, Price, Product, ProductId, StockLevel};
use crate::domain::variants::options_by_dimension;
use crate::domain::wishlist::Wishlist;
use crate::outbound::catalogue::HttpCatalogueSource;
use crate::outbound::persistence::JsonStateStore;
use crate::session::StorefrontSession;

/// Headless storefront client.
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Browse a product catalogue and manage a cart")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the catalogue with filters.
    Browse(BrowseArgs),
    /// Show one product's details, recording it as recently viewed.
    Product {
        /// Catalogue product id.
        id: i64,
    },
    /// Manage the shopping cart.
    Cart {
        /// Cart operation.
        #[command(subcommand)]
        command: CartCommand,
    },
    /// Manage the wishlist.
    Wishlist {
        /// Wishlist operation.
        #[command(subcommand)]
        command: WishlistCommand,
    },
    /// Inspect the recently-viewed history.
    Recent {
        /// History operation.
        #[command(subcommand)]
        command: RecentCommand,
    },
}

/// Filter criteria for the browse view.
#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Free-text search across name, description, and category.
    #[arg(long)]
    pub query: Option<String>,
    /// Restrict to these categories (exact, case-insensitive match).
    #[arg(long = "category")]
    pub categories: Vec<String>,
    /// Restrict to these brands (exact, case-insensitive match).
    #[arg(long = "brand")]
    pub brands: Vec<String>,
    /// Inclusive minimum price.
    #[arg(long)]
    pub price_min: Option<f64>,
    /// Inclusive maximum price.
    #[arg(long)]
    pub price_max: Option<f64>,
    /// Inclusive minimum rating (unrated products count as zero).
    #[arg(long)]
    pub min_rating: Option<f64>,
    /// Sort order: popular, price-asc, price-desc, name-asc, name-desc.
    #[arg(long, default_value = "popular")]
    pub sort: String,
    /// Page to show when a category restriction is active.
    #[arg(long, default_value_t = 1)]
    pub page: u32,
}

/// Cart operations.
#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Add one unit by product id or variant id.
    Add {
        /// Identity key: a product id (`5`) or variant id (`5-2`).
        key: String,
    },
    /// Remove a line by identity key.
    Remove {
        /// Identity key of the line to remove.
        key: String,
    },
    /// Set a line's quantity directly; zero removes the line.
    SetQuantity {
        /// Identity key of the line to change.
        key: String,
        /// New quantity.
        quantity: u32,
    },
    /// Empty the cart.
    Clear,
    /// Print the cart contents and totals.
    Show,
}

/// Wishlist operations.
#[derive(Debug, Subcommand)]
pub enum WishlistCommand {
    /// Save an item by product id or variant id. Idempotent.
    Add {
        /// Identity key: a product id (`5`) or variant id (`5-2`).
        key: String,
    },
    /// Remove an entry by identity key.
    Remove {
        /// Identity key of the entry to remove.
        key: String,
    },
    /// Empty the wishlist.
    Clear,
    /// Print the wishlist contents.
    Show,
}

/// Recently-viewed operations.
#[derive(Debug, Subcommand)]
pub enum RecentCommand {
    /// Print the history, most recent first.
    Show,
    /// Empty the history.
    Clear,
}

/// Execute a parsed command against a fresh session and render the result.
///
/// # Errors
///
/// Returns an error for malformed arguments, unreachable state storage, or
/// catalogue failures on commands that need the catalogue.
pub async fn run(cli: Cli, settings: &StorefrontSettings) -> eyre::Result<String> {
    let base_url = Url::parse(settings.api_base_url())
        .wrap_err_with(|| format!("invalid catalogue base URL '{}'", settings.api_base_url()))?;
    let source = HttpCatalogueSource::new(base_url, settings.request_timeout())
        .wrap_err("failed to construct catalogue client")?;
    let store = JsonStateStore::open(&settings.state_dir())
        .wrap_err("failed to open state directory")?;
    let mut session = StorefrontSession::new(source, Arc::new(store));

    match cli.command {
        Command::Browse(args) => {
            let (spec, page) = browse_spec(&args)?;
            session.load_catalogue().await;
            session.set_filter(spec);
            session.set_page(page);
            let view = session.browse_view()?;
            Ok(render_browse_view(&view))
        }
        Command::Product { id } => {
            session.load_catalogue().await;
            let product = session.view_product(ProductId::new(id))?;
            Ok(render_product_detail(&product))
        }
        Command::Cart { command } => run_cart(command, &mut session).await,
        Command::Wishlist { command } => run_wishlist(command, &mut session).await,
        Command::Recent { command } => Ok(run_recent(command, &mut session)),
    }
}

async fn run_cart<C: CatalogueSource, S: StateStore>(
    command: CartCommand,
    session: &mut StorefrontSession<C, S>,
) -> eyre::Result<String> {
    match command {
        CartCommand::Add { key } => {
            let key = parse_key(&key)?;
            session.load_catalogue().await;
            let outcome = session.add_to_cart(&key)?;
            let message = match outcome {
                AddOutcome::Inserted => format!("Added '{key}' to the cart."),
                AddOutcome::Incremented { quantity } => {
                    format!("'{key}' is now at quantity {quantity}.")
                }
                AddOutcome::AtStockCeiling { quantity: 0 } => {
                    format!("'{key}' is out of stock; nothing added.")
                }
                AddOutcome::AtStockCeiling { quantity } => {
                    format!("'{key}' is already at its stock ceiling of {quantity}.")
                }
            };
            Ok(format!("{message}\n{}", render_cart_summary(session.cart())))
        }
        CartCommand::Remove { key } => {
            let key = parse_key(&key)?;
            let removed = session.remove_from_cart(&key);
            let message = if removed {
                format!("Removed '{key}' from the cart.")
            } else {
                format!("'{key}' was not in the cart.")
            };
            Ok(format!("{message}\n{}", render_cart_summary(session.cart())))
        }
        CartCommand::SetQuantity { key, quantity } => {
            let key = parse_key(&key)?;
            let outcome = session.set_cart_quantity(&key, quantity);
            let message = match outcome {
                QuantityOutcome::Updated { quantity } => {
                    format!("'{key}' set to quantity {quantity}.")
                }
                QuantityOutcome::Clamped { quantity } => {
                    format!("'{key}' clamped to the stock ceiling of {quantity}.")
                }
                QuantityOutcome::Removed => format!("'{key}' removed from the cart."),
                QuantityOutcome::Absent => format!("'{key}' was not in the cart."),
            };
            Ok(format!("{message}\n{}", render_cart_summary(session.cart())))
        }
        CartCommand::Clear => {
            session.clear_cart();
            Ok("Cart cleared.".to_owned())
        }
        CartCommand::Show => Ok(render_cart(session.cart())),
    }
}

async fn run_wishlist<C: CatalogueSource, S: StateStore>(
    command: WishlistCommand,
    session: &mut StorefrontSession<C, S>,
) -> eyre::Result<String> {
    match command {
        WishlistCommand::Add { key } => {
            let key = parse_key(&key)?;
            session.load_catalogue().await;
            let added = session.add_to_wishlist(&key)?;
            let message = if added {
                format!("Saved '{key}' to the wishlist.")
            } else {
                format!("'{key}' is already on the wishlist.")
            };
            Ok(message)
        }
        WishlistCommand::Remove { key } => {
            let key = parse_key(&key)?;
            let removed = session.remove_from_wishlist(&key);
            let message = if removed {
                format!("Removed '{key}' from the wishlist.")
            } else {
                format!("'{key}' was not on the wishlist.")
            };
            Ok(message)
        }
        WishlistCommand::Clear => {
            session.clear_wishlist();
            Ok("Wishlist cleared.".to_owned())
        }
        WishlistCommand::Show => Ok(render_wishlist(session.wishlist())),
    }
}

fn run_recent<C: CatalogueSource, S: StateStore>(
    command: RecentCommand,
    session: &mut StorefrontSession<C, S>,
) -> String {
    match command {
        RecentCommand::Show => {
            let entries = session.recently_viewed().entries();
            if entries.is_empty() {
                return "No recently viewed products.".to_owned();
            }
            let mut out = String::from("Recently viewed:\n");
            for entry in entries {
                let _ = writeln!(out, "  [{}] {} - {}", entry.key, entry.name, entry.price);
            }
            out
        }
        RecentCommand::Clear => {
            session.clear_recently_viewed();
            "Recently viewed history cleared.".to_owned()
        }
    }
}

fn browse_spec(args: &BrowseArgs) -> eyre::Result<(FilterSpec, PageNumber)> {
    let default_range = PriceRange::default();
    let min = match args.price_min {
        Some(value) => parse_price(value, "--price-min")?,
        None => default_range.min,
    };
    let max = match args.price_max {
        Some(value) => parse_price(value, "--price-max")?,
        None => default_range.max,
    };

    let min_rating = match args.min_rating {
        Some(value) => Decimal::from_f64_retain(value)
            .map(|rating| rating.round_dp(1))
            .ok_or_else(|| eyre!("--min-rating must be a finite number"))?,
        None => Decimal::ZERO,
    };

    let spec = FilterSpec {
        search_query: args.query.clone().unwrap_or_default(),
        price_range: PriceRange::new(min, max),
        categories: args.categories.clone(),
        brands: args.brands.clone(),
        min_rating,
        sort: SortKey::parse_lenient(&args.sort),
    };
    let page = PageNumber::new(args.page).map_err(|err| eyre!("--page: {err}"))?;
    Ok((spec, page))
}

fn parse_price(value: f64, flag: &str) -> eyre::Result<Price> {
    Price::from_f64(value).map_err(|err| eyre!("{flag}: {err}"))
}

fn parse_key(raw: &str) -> eyre::Result<ItemKey> {
    raw.parse().map_err(|_| eyre!("'{raw}' is not a valid identity key"))
}

fn render_browse_view(view: &BrowseView) -> String {
    match view {
        BrowseView::Grouped(groups) => render_groups(groups),
        BrowseView::Paged(page) => {
            if page.total_items == 0 {
                return "No products found matching your criteria.".to_owned();
            }
            let mut out = format!(
                "Page {} of {} ({} products)\n",
                page.page, page.page_count, page.total_items
            );
            for product in &page.items {
                out.push_str(&render_product_line(product));
            }
            out
        }
    }
}

fn render_groups(groups: &[CategoryGroup]) -> String {
    if groups.is_empty() {
        return "No products found matching your criteria.".to_owned();
    }
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(out, "{} ({} products)", group.name, group.total);
        for product in &group.preview {
            out.push_str(&render_product_line(product));
        }
        if group.total > group.preview.len() {
            let _ = writeln!(
                out,
                "  ... and {} more in {}",
                group.total - group.preview.len(),
                group.name
            );
        }
    }
    out
}

fn render_product_line(product: &Product) -> String {
    let mut line = format!("  [{}] {} - {}", product.id, product.name, product.price);
    if let Some(rating) = product.rating {
        let _ = write!(line, " ({rating}★)");
    }
    if product.stock == 0 {
        line.push_str(" [out of stock]");
    }
    line.push('\n');
    line
}

fn render_product_detail(product: &Product) -> String {
    let mut out = format!("[{}] {} - {}\n", product.id, product.name, product.price);
    if let Some(category) = product.category.as_deref() {
        let _ = writeln!(out, "  Category: {category}");
    }
    if let Some(brand) = product.brand.as_deref() {
        let _ = writeln!(out, "  Brand: {brand}");
    }
    if let Some(rating) = product.rating {
        let _ = writeln!(out, "  Rating: {rating}★");
    }
    out.push_str(&match StockLevel::for_units(product.stock) {
        StockLevel::OutOfStock => "  Out of stock\n".to_owned(),
        StockLevel::Low(units) => format!("  Low stock: only {units} left\n"),
        StockLevel::InStock(units) => format!("  In stock: {units} available\n"),
    });
    if !product.description.is_empty() {
        let _ = writeln!(out, "  {}", product.description);
    }

    if product.has_variants() {
        out.push_str("  Options:\n");
        for (dimension, values) in options_by_dimension(&product.variants) {
            let _ = writeln!(out, "    {dimension}: {}", values.join(", "));
        }
        out.push_str("  Variants:\n");
        for variant in &product.variants {
            let mut line = format!("    [{}] {}", variant.id, variant.price);
            if variant.stock == 0 {
                line.push_str(" [out of stock]");
            }
            line.push('\n');
            out.push_str(&line);
        }
    }
    out
}

fn render_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "The cart is empty.".to_owned();
    }
    let mut out = String::from("Cart:\n");
    for line in cart.items() {
        let _ = writeln!(
            out,
            "  [{}] {} x {} - {}",
            line.item.key,
            line.item.name,
            line.quantity,
            line.line_total()
        );
        for (dimension, value) in &line.item.options {
            let _ = writeln!(out, "      {dimension}: {value}");
        }
    }
    out.push_str(&render_cart_summary(cart));
    out
}

fn render_cart_summary(cart: &Cart) -> String {
    format!("{} items, total {}", cart.item_count(), cart.total())
}

fn render_wishlist(wishlist: &Wishlist) -> String {
    if wishlist.is_empty() {
        return "The wishlist is empty.".to_owned();
    }
    let mut out = String::from("Wishlist:\n");
    for entry in wishlist.entries() {
        let _ = writeln!(out, "  [{}] {} - {}", entry.key, entry.name, entry.price);
    }
    out
}

#[cfg(test)]
mod tests {
    //! Regression coverage for argument parsing and rendering helpers.
    use clap::CommandFactory;
    use rstest::rstest;

    use super::*;
    use crate::domain::product::ProductId;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    fn browse_args(overrides: impl FnOnce(&mut BrowseArgs)) -> BrowseArgs {
        let mut args = BrowseArgs {
            query: None,
            categories: Vec::new(),
            brands: Vec::new(),
            price_min: None,
            price_max: None,
            min_rating: None,
            sort: "popular".to_owned(),
            page: 1,
        };
        overrides(&mut args);
        args
    }

    #[rstest]
    fn browse_spec_defaults_to_the_full_range() {
        let (spec, page) = browse_spec(&browse_args(|_| {})).expect("spec builds");

        assert_eq!(spec, FilterSpec::default());
        assert_eq!(page, PageNumber::FIRST);
    }

    #[rstest]
    fn browse_spec_honours_overrides() {
        let args = browse_args(|args| {
            args.query = Some("lamp".to_owned());
            args.categories = vec!["Home".to_owned()];
            args.price_min = Some(5.0);
            args.price_max = Some(50.0);
            args.min_rating = Some(4.0);
            args.sort = "price-desc".to_owned();
            args.page = 2;
        });
        let (spec, page) = browse_spec(&args).expect("spec builds");

        assert_eq!(spec.search_query, "lamp");
        assert_eq!(spec.categories, vec!["Home".to_owned()]);
        assert_eq!(spec.sort, SortKey::PriceDesc);
        assert_eq!(spec.min_rating, Decimal::new(40, 1));
        assert_eq!(page.get(), 2);
    }

    #[rstest]
    fn browse_spec_rejects_invalid_values() {
        assert!(browse_spec(&browse_args(|args| args.page = 0)).is_err());
        assert!(browse_spec(&browse_args(|args| args.price_min = Some(-1.0))).is_err());
        assert!(browse_spec(&browse_args(|args| args.min_rating = Some(f64::NAN))).is_err());
    }

    #[rstest]
    fn unknown_sort_values_degrade_to_popular() {
        let (spec, _) =
            browse_spec(&browse_args(|args| args.sort = "newest".to_owned())).expect("spec");
        assert_eq!(spec.sort, SortKey::Popular);
    }

    #[rstest]
    fn keys_parse_and_reject_blank_input() {
        assert_eq!(
            parse_key("5").expect("key parses"),
            ItemKey::Product(ProductId::new(5))
        );
        assert!(parse_key("  ").is_err());
    }

    #[rstest]
    fn product_detail_lists_variant_dimensions() {
        use std::collections::BTreeMap;

        use crate::domain::product::{Variant, VariantId};

        let product = Product {
            id: ProductId::new(5),
            name: "Shirt".to_owned(),
            description: "A shirt.".to_owned(),
            price: Price::from_f64(20.0).expect("valid price"),
            image: String::new(),
            category: Some("Fashion".to_owned()),
            stock: 2,
            brand: None,
            rating: None,
            variants: vec![
                Variant {
                    id: VariantId::new("5-1"),
                    options: BTreeMap::from([
                        ("color".to_owned(), "Black".to_owned()),
                        ("size".to_owned(), "M".to_owned()),
                    ]),
                    price: Price::from_f64(20.0).expect("valid price"),
                    stock: 0,
                    image: String::new(),
                },
                Variant {
                    id: VariantId::new("5-2"),
                    options: BTreeMap::from([
                        ("color".to_owned(), "Blue".to_owned()),
                        ("size".to_owned(), "M".to_owned()),
                    ]),
                    price: Price::from_f64(22.0).expect("valid price"),
                    stock: 4,
                    image: String::new(),
                },
            ],
        };
        let detail = render_product_detail(&product);

        assert!(detail.contains("color: Black, Blue"));
        assert!(detail.contains("size: M"));
        assert!(detail.contains("Low stock: only 2 left"));
        assert!(detail.contains("[5-1] 20.00 [out of stock]"));
    }

    #[rstest]
    fn out_of_stock_products_are_flagged_in_listings() {
        let product = Product {
            id: ProductId::new(1),
            name: "Mug".to_owned(),
            description: String::new(),
            price: Price::from_f64(5.0).expect("valid price"),
            image: String::new(),
            category: None,
            stock: 0,
            brand: None,
            rating: None,
            variants: Vec::new(),
        };
        let line = render_product_line(&product);
        assert!(line.contains("[out of stock]"));
    }
}
