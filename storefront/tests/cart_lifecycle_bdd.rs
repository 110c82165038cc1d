//! Behavioural tests for the cart and wishlist engines.
//!
//! These tests validate the engines' behaviour against Gherkin scenarios
//! covering quantity accumulation, removal via zero quantity, durable
//! round-trips, and corruption recovery.

// `expect` is idiomatic in test code for failing fast on precondition violations.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::sync::Arc;

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use rust_decimal::Decimal;
use storefront::domain::cart::CartService;
use storefront::domain::product::{ItemKey, Price, Product, ProductId};
use storefront::domain::wishlist::WishlistService;
use storefront::outbound::persistence::JsonStateStore;
use tempfile::TempDir;

// ============================================================================
// Test fixtures
// ============================================================================

/// Test world holding the state directory and the catalogue product.
#[derive(Default, ScenarioState)]
struct World {
    state_dir: Slot<Arc<TempDir>>,
    product: Slot<Product>,
}

impl World {
    fn state_dir(&self) -> Arc<TempDir> {
        self.state_dir.get().expect("state directory should be set")
    }

    fn product(&self) -> Product {
        self.product.get().expect("product should be set")
    }

    fn store(&self) -> Arc<JsonStateStore> {
        let dir = self.state_dir();
        Arc::new(JsonStateStore::open(dir.path()).expect("open state store"))
    }

    fn cart(&self) -> CartService<JsonStateStore> {
        CartService::open(self.store())
    }

    fn wishlist(&self) -> WishlistService<JsonStateStore> {
        WishlistService::open(self.store())
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

fn sample_product() -> Product {
    Product {
        id: ProductId::new(5),
        name: "Alpha Speaker".to_owned(),
        description: "A speaker for tests.".to_owned(),
        price: Price::from_f64(9.99).expect("valid price"),
        image: String::new(),
        category: Some("Electronics".to_owned()),
        stock: 10,
        brand: None,
        rating: None,
        variants: Vec::new(),
    }
}

fn sample_key() -> ItemKey {
    ItemKey::Product(ProductId::new(5))
}

// ============================================================================
// Given steps
// ============================================================================

#[given("a catalogue with a product priced 9.99")]
fn a_catalogue_with_a_product(world: &World) {
    world
        .state_dir
        .set(Arc::new(TempDir::new().expect("create state dir")));
    world.product.set(sample_product());
}

#[given("the product is already in the cart")]
fn the_product_is_already_in_the_cart(world: &World) {
    let mut cart = world.cart();
    cart.add_product(&world.product());
}

#[given("corrupt cart storage")]
fn corrupt_cart_storage(world: &World) {
    let dir = Arc::new(TempDir::new().expect("create state dir"));
    std::fs::write(dir.path().join("cart.json"), "{ not a cart record")
        .expect("write corrupt record");
    world.state_dir.set(dir);
}

// ============================================================================
// When steps
// ============================================================================

#[when("the shopper adds the product to the cart twice")]
fn the_shopper_adds_the_product_twice(world: &World) {
    let mut cart = world.cart();
    let product = world.product();
    cart.add_product(&product);
    cart.add_product(&product);
}

#[when("the quantity is set to zero")]
fn the_quantity_is_set_to_zero(world: &World) {
    let mut cart = world.cart();
    cart.set_quantity(&sample_key(), 0);
}

#[when("the session is reopened")]
fn the_session_is_reopened(world: &World) {
    // Reopening happens implicitly: every Then step opens fresh engines
    // against the same state directory.
    let _ = world;
}

#[when("the shopper saves the product to the wishlist twice")]
fn the_shopper_saves_the_product_twice(world: &World) {
    let mut wishlist = world.wishlist();
    let product = world.product();
    wishlist.add_product(&product);
    wishlist.add_product(&product);
}

// ============================================================================
// Then steps
// ============================================================================

#[then("the cart holds one line with quantity {quantity:u32}")]
fn the_cart_holds_one_line_with_quantity(world: &World, quantity: u32) {
    let cart = world.cart();
    assert_eq!(cart.cart().len(), 1, "expected exactly one line");
    assert_eq!(
        cart.cart().find(&sample_key()).map(|line| line.quantity),
        Some(quantity)
    );
}

#[then("the cart total is 19.98")]
fn the_cart_total_is_correct(world: &World) {
    let cart = world.cart();
    assert_eq!(cart.cart().total().amount(), Decimal::new(1998, 2));
    assert_eq!(cart.cart().item_count(), 2);
}

#[then("the cart is empty")]
fn the_cart_is_empty(world: &World) {
    let cart = world.cart();
    assert!(cart.cart().is_empty());
}

#[then("the wishlist holds exactly one entry")]
fn the_wishlist_holds_exactly_one_entry(world: &World) {
    let wishlist = world.wishlist();
    assert_eq!(wishlist.wishlist().len(), 1);
    assert!(wishlist.wishlist().contains(&sample_key()));
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/cart_lifecycle.feature",
    name = "Repeated adds accumulate quantity on one line"
)]
fn repeated_adds_accumulate_quantity(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/cart_lifecycle.feature",
    name = "Setting the quantity to zero removes the line"
)]
fn setting_quantity_to_zero_removes_the_line(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/cart_lifecycle.feature",
    name = "Cart contents survive a session restart"
)]
fn cart_contents_survive_a_session_restart(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/cart_lifecycle.feature",
    name = "Corrupt cart storage recovers to an empty cart"
)]
fn corrupt_cart_storage_recovers(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/cart_lifecycle.feature",
    name = "Wishlist adds are idempotent"
)]
fn wishlist_adds_are_idempotent(world: World) {
    let _ = world;
}
