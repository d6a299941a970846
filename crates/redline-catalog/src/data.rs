//! # Built-in Dataset
//!
//! The products, categories and reviews the storefront ships with.
//!
//! Rows are plain `&'static` tables so the whole catalog is readable at a
//! glance; [`products`], [`categories`] and [`reviews`] turn them into the
//! owned domain types.
//!
//! ## Product Ids
//! `rl-{kind}-{index}`: `tee`, `hood`, `hat`, `acc`, `jkt`.

use chrono::NaiveDate;
use redline_core::{Category, ColorOption, Product, Review};

use crate::error::{CatalogError, CatalogResult};

const ALL_SIZES: &[&str] = &["S", "M", "L", "XL", "XXL"];
const TOP_SIZES: &[&str] = &["S", "M", "L", "XL"];
const ONE_SIZE: &[&str] = &["One Size"];

const BLACK: (&str, &str) = ("Black", "#111111");
const WHITE: (&str, &str) = ("White", "#f5f5f5");
const RED: (&str, &str) = ("Red", "#d7263d");
const GREY: (&str, &str) = ("Grey", "#8d8d8d");
const NAVY: (&str, &str) = ("Navy", "#1b2a4a");
const BLUE: (&str, &str) = ("Blue", "#2a6fdb");
const GREEN: (&str, &str) = ("Green", "#1f5f3a");
const SILVER: (&str, &str) = ("Silver", "#c0c0c0");
const MULTI: (&str, &str) = ("Multi", "linear-gradient(90deg, #d7263d, #2a6fdb)");

// =============================================================================
// Seed Rows
// =============================================================================

struct ProductRow {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price_cents: i64,
    original_price_cents: Option<i64>,
    image: &'static str,
    category: &'static str,
    tags: &'static [&'static str],
    sizes: &'static [&'static str],
    colors: &'static [(&'static str, &'static str)],
    featured: bool,
    best_seller: bool,
    is_new: bool,
    stock: i64,
}

const PRODUCTS: &[ProductRow] = &[
    ProductRow {
        id: "rl-tee-001",
        name: "Rev Limiter Tee",
        description: "Soft ringspun cotton with a tach needle pinned at 9,000 RPM across the chest.",
        price_cents: 3499,
        original_price_cents: Some(3999),
        image: "images/products/rev-limiter-tee.jpg",
        category: "Car T-Shirts",
        tags: &["tachometer", "redline", "classic"],
        sizes: ALL_SIZES,
        colors: &[BLACK, WHITE, RED],
        featured: true,
        best_seller: true,
        is_new: false,
        stock: 50,
    },
    ProductRow {
        id: "rl-tee-002",
        name: "Boost Junkie Tee",
        description: "A turbo snail on the front, a boost gauge on the back. For the psi-obsessed.",
        price_cents: 2999,
        original_price_cents: None,
        image: "images/products/boost-junkie-tee.jpg",
        category: "Car T-Shirts",
        tags: &["turbo", "boost"],
        sizes: TOP_SIZES,
        colors: &[BLACK, GREY],
        featured: false,
        best_seller: true,
        is_new: false,
        stock: 35,
    },
    ProductRow {
        id: "rl-tee-003",
        name: "Apex Hunter Tee",
        description: "Racing line diagram of a hairpin, printed in water-based ink.",
        price_cents: 3299,
        original_price_cents: None,
        image: "images/products/apex-hunter-tee.jpg",
        category: "Car T-Shirts",
        tags: &["track", "racing"],
        sizes: TOP_SIZES,
        colors: &[WHITE, BLUE],
        featured: false,
        best_seller: false,
        is_new: true,
        stock: 20,
    },
    ProductRow {
        id: "rl-tee-004",
        name: "Rotary Club Tee",
        description: "Three sides, zero apologies. A triangle rotor tribute.",
        price_cents: 2799,
        original_price_cents: Some(3499),
        image: "images/products/rotary-club-tee.jpg",
        category: "Car T-Shirts",
        tags: &["rotary", "jdm"],
        sizes: &["M", "L", "XL"],
        colors: &[BLACK, RED],
        featured: false,
        best_seller: false,
        is_new: false,
        stock: 8,
    },
    ProductRow {
        id: "rl-hood-001",
        name: "Midnight Run Hoodie",
        description: "Heavyweight fleece with reflective highway-sign print on the sleeve.",
        price_cents: 6499,
        original_price_cents: None,
        image: "images/products/midnight-run-hoodie.jpg",
        category: "Hoodies",
        tags: &["night", "reflective", "jdm"],
        sizes: ALL_SIZES,
        colors: &[BLACK, NAVY],
        featured: true,
        best_seller: false,
        is_new: true,
        stock: 15,
    },
    ProductRow {
        id: "rl-hood-002",
        name: "Track Day Zip Hoodie",
        description: "Full-zip midweight hoodie with a checkered-flag lining in the hood.",
        price_cents: 7499,
        original_price_cents: None,
        image: "images/products/track-day-zip.jpg",
        category: "Hoodies",
        tags: &["track", "racing", "zip"],
        sizes: &["M", "L", "XL"],
        colors: &[GREY, BLACK],
        featured: false,
        best_seller: true,
        is_new: false,
        stock: 12,
    },
    ProductRow {
        id: "rl-hood-003",
        name: "Drift Society Hoodie",
        description: "Tire smoke graphic, oversized fit. Currently sold out.",
        price_cents: 5999,
        original_price_cents: Some(6999),
        image: "images/products/drift-society-hoodie.jpg",
        category: "Hoodies",
        tags: &["drift", "jdm"],
        sizes: &["S", "M", "L"],
        colors: &[RED, BLACK],
        featured: false,
        best_seller: false,
        is_new: false,
        stock: 0,
    },
    ProductRow {
        id: "rl-hat-001",
        name: "Redline Snapback",
        description: "Structured six-panel snapback with an embroidered shift light.",
        price_cents: 2499,
        original_price_cents: None,
        image: "images/products/redline-snapback.jpg",
        category: "Hats",
        tags: &["redline", "embroidered"],
        sizes: ONE_SIZE,
        colors: &[BLACK, RED],
        featured: true,
        best_seller: false,
        is_new: false,
        stock: 40,
    },
    ProductRow {
        id: "rl-hat-002",
        name: "Pit Crew Trucker Cap",
        description: "Mesh-back trucker cap, the one the crew chief wears.",
        price_cents: 2299,
        original_price_cents: None,
        image: "images/products/pit-crew-trucker.jpg",
        category: "Hats",
        tags: &["pit", "trucker"],
        sizes: ONE_SIZE,
        colors: &[WHITE, NAVY],
        featured: false,
        best_seller: false,
        is_new: true,
        stock: 25,
    },
    ProductRow {
        id: "rl-acc-001",
        name: "Shift Knob Keychain",
        description: "Machined aluminium six-speed shift knob on a split ring.",
        price_cents: 1299,
        original_price_cents: None,
        image: "images/products/shift-knob-keychain.jpg",
        category: "Accessories",
        tags: &["manual", "keychain", "gift"],
        sizes: ONE_SIZE,
        colors: &[SILVER],
        featured: false,
        best_seller: true,
        is_new: false,
        stock: 100,
    },
    ProductRow {
        id: "rl-acc-002",
        name: "Garage Sticker Pack",
        description: "Ten vinyl stickers for toolboxes, laptops and rear quarter windows.",
        price_cents: 999,
        original_price_cents: None,
        image: "images/products/garage-sticker-pack.jpg",
        category: "Accessories",
        tags: &["stickers", "gift"],
        sizes: ONE_SIZE,
        colors: &[MULTI],
        featured: false,
        best_seller: false,
        is_new: true,
        stock: 200,
    },
    ProductRow {
        id: "rl-jkt-001",
        name: "Pit Lane Coach Jacket",
        description: "Water-resistant nylon coach jacket with sponsor-style patches.",
        price_cents: 11999,
        original_price_cents: Some(14999),
        image: "images/products/pit-lane-coach-jacket.jpg",
        category: "Jackets",
        tags: &["pit", "racing", "outerwear"],
        sizes: TOP_SIZES,
        colors: &[BLACK, GREEN],
        featured: true,
        best_seller: false,
        is_new: false,
        stock: 6,
    },
];

const CATEGORIES: &[(&str, &str, &str, &str)] = &[
    (
        "car-t-shirts",
        "Car T-Shirts",
        "Graphic tees for people who know their redline.",
        "images/categories/tees.jpg",
    ),
    (
        "hoodies",
        "Hoodies",
        "Fleece for cold mornings at the track.",
        "images/categories/hoodies.jpg",
    ),
    (
        "hats",
        "Hats",
        "Snapbacks and truckers.",
        "images/categories/hats.jpg",
    ),
    (
        "accessories",
        "Accessories",
        "Keychains, stickers and garage goods.",
        "images/categories/accessories.jpg",
    ),
    (
        "jackets",
        "Jackets",
        "Outerwear for the paddock.",
        "images/categories/jackets.jpg",
    ),
];

struct ReviewRow {
    id: &'static str,
    product_id: &'static str,
    author: &'static str,
    rating: u8,
    title: &'static str,
    body: &'static str,
    date: (i32, u32, u32),
    verified: bool,
}

const REVIEWS: &[ReviewRow] = &[
    ReviewRow {
        id: "rv-001",
        product_id: "rl-tee-001",
        author: "Marcus T.",
        rating: 5,
        title: "Wear it every weekend",
        body: "Fits true to size and the print hasn't faded after a dozen washes.",
        date: (2024, 3, 14),
        verified: true,
    },
    ReviewRow {
        id: "rv-002",
        product_id: "rl-tee-001",
        author: "Priya K.",
        rating: 4,
        title: "Great shirt, runs a bit long",
        body: "Love the design. Sized down and it's perfect.",
        date: (2024, 4, 2),
        verified: true,
    },
    ReviewRow {
        id: "rv-003",
        product_id: "rl-tee-002",
        author: "Jess W.",
        rating: 5,
        title: "Turbo noises intensify",
        body: "Got compliments at cars and coffee within ten minutes.",
        date: (2024, 2, 20),
        verified: false,
    },
    ReviewRow {
        id: "rv-004",
        product_id: "rl-hood-001",
        author: "Dan R.",
        rating: 5,
        title: "Warmest hoodie I own",
        body: "The reflective sleeve print is a nice touch for night meets.",
        date: (2024, 11, 8),
        verified: true,
    },
    ReviewRow {
        id: "rv-005",
        product_id: "rl-hood-002",
        author: "Alex M.",
        rating: 4,
        title: "Solid zip hoodie",
        body: "Zipper is sturdy. Wish it came in red.",
        date: (2024, 10, 1),
        verified: true,
    },
    ReviewRow {
        id: "rv-006",
        product_id: "rl-hat-001",
        author: "Sam L.",
        rating: 3,
        title: "Nice embroidery, shallow fit",
        body: "Looks great but sits high on my head.",
        date: (2024, 6, 17),
        verified: true,
    },
    ReviewRow {
        id: "rv-007",
        product_id: "rl-acc-001",
        author: "Rosa G.",
        rating: 5,
        title: "Perfect gift",
        body: "Bought three for my track day friends.",
        date: (2024, 12, 3),
        verified: true,
    },
    ReviewRow {
        id: "rv-008",
        product_id: "rl-jkt-001",
        author: "Kenji H.",
        rating: 5,
        title: "Paddock approved",
        body: "Kept me dry through a rainy endurance race.",
        date: (2025, 1, 22),
        verified: false,
    },
];

// =============================================================================
// Conversion
// =============================================================================

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The built-in products, in catalog order.
pub fn products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|row| Product {
            id: row.id.to_string(),
            name: row.name.to_string(),
            description: row.description.to_string(),
            price_cents: row.price_cents,
            original_price_cents: row.original_price_cents,
            images: vec![row.image.to_string()],
            category: row.category.to_string(),
            tags: to_strings(row.tags),
            sizes: to_strings(row.sizes),
            colors: row
                .colors
                .iter()
                .map(|(name, value)| ColorOption::new(*name, *value))
                .collect(),
            featured: row.featured,
            best_seller: row.best_seller,
            is_new: row.is_new,
            stock: row.stock,
        })
        .collect()
}

/// The built-in categories, in menu order.
pub fn categories() -> Vec<Category> {
    CATEGORIES
        .iter()
        .map(|(slug, name, description, image)| Category {
            slug: slug.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            image: image.to_string(),
        })
        .collect()
}

/// The built-in reviews.
pub fn reviews() -> CatalogResult<Vec<Review>> {
    REVIEWS
        .iter()
        .map(|row| {
            let (year, month, day) = row.date;
            let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
                CatalogError::InvalidDate {
                    review_id: row.id.to_string(),
                }
            })?;
            Ok(Review {
                id: row.id.to_string(),
                product_id: row.product_id.to_string(),
                author: row.author.to_string(),
                rating: row.rating,
                title: row.title.to_string(),
                body: row.body.to_string(),
                date,
                verified: row.verified,
            })
        })
        .collect()
}
