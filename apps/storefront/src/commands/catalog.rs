//! # Catalog Commands
//!
//! Product listing, detail, search and the shop sidebar's options.
//!
//! ## Shop Page Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Shop Page Flow                                       │
//! │                                                                         │
//! │  Sidebar: category ▾  price ━━━●━━  [S][M][L]  ● ● ●   sort ▾           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  list_products({ category, priceRange, sizes, colors, sort })           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  redline_core::filter::apply(catalog.products(), criteria)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductDto[] (asset URLs resolved, prices pre-formatted)               │
//! │  empty list → "No products match your filters"                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use redline_catalog::Catalog;
use redline_core::filter::{self, FilterCriteria, SortKey};
use redline_core::validation::validate_search_query;
use redline_core::{ColorOption, Product, Review};

use crate::error::ApiError;
use crate::state::StorefrontConfig;

/// Search results returned when the caller gives no limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Related products shown under a product page.
pub const RELATED_LIMIT: usize = 4;

/// Product DTO for the frontend.
///
/// Image paths are resolved against the configured base path and prices come
/// pre-formatted alongside the raw cents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price_cents: i64,
    pub price_display: String,
    pub original_price_cents: Option<i64>,
    pub discount_percent: Option<u32>,
    pub image_urls: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<ColorOption>,
    pub featured: bool,
    pub best_seller: bool,
    pub is_new: bool,
    pub stock: i64,
    pub in_stock: bool,
}

impl ProductDto {
    pub fn new(product: &Product, config: &StorefrontConfig) -> Self {
        ProductDto {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price_cents: product.price_cents,
            price_display: config.format_currency(product.price_cents),
            original_price_cents: product.original_price_cents,
            discount_percent: product.discount_percent(),
            image_urls: product.images.iter().map(|p| config.asset_url(p)).collect(),
            sizes: product.sizes.clone(),
            colors: product.colors.clone(),
            featured: product.featured,
            best_seller: product.best_seller,
            is_new: product.is_new,
            stock: product.stock,
            in_stock: product.in_stock(),
        }
    }
}

fn to_dtos<'a, I>(products: I, config: &StorefrontConfig) -> Vec<ProductDto>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .map(|p| ProductDto::new(p, config))
        .collect()
}

// =============================================================================
// Listing
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<ProductDto>,
    pub total: usize,
    pub criteria: FilterCriteria,
}

/// Runs the shop page's filter/sort pipeline over the catalog.
pub fn list_products(
    catalog: &Catalog,
    config: &StorefrontConfig,
    criteria: FilterCriteria,
) -> ProductListResponse {
    debug!(
        category = %criteria.category,
        sort = %criteria.sort,
        sizes = criteria.sizes.len(),
        colors = criteria.colors.len(),
        "list_products command"
    );

    let shown = filter::apply(catalog.products().iter().map(|p| p.as_ref()), &criteria);
    let products = to_dtos(shown, config);

    ProductListResponse {
        total: products.len(),
        products,
        criteria,
    }
}

/// Criteria matching the sidebar's initial state.
pub fn default_criteria(config: &StorefrontConfig) -> FilterCriteria {
    FilterCriteria::new().with_price_range(0, config.filters.price_slider_max)
}

// =============================================================================
// Product Page
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product: ProductDto,
    pub description: String,
    pub tags: Vec<String>,
    pub reviews: Vec<Review>,
    pub review_count: usize,
    pub average_rating: Option<f64>,
    pub related: Vec<ProductDto>,
}

/// Gets everything the product page shows.
pub fn get_product(
    catalog: &Catalog,
    config: &StorefrontConfig,
    id: &str,
) -> Result<ProductDetail, ApiError> {
    debug!(id = %id, "get_product command");

    let product = catalog
        .get_by_id(id)
        .ok_or_else(|| ApiError::not_found("Product", id))?;

    let reviews: Vec<Review> = catalog.reviews_for(id).into_iter().cloned().collect();
    let related = catalog.related(product, RELATED_LIMIT);

    Ok(ProductDetail {
        product: ProductDto::new(product, config),
        description: product.description.clone(),
        tags: product.tags.clone(),
        review_count: reviews.len(),
        average_rating: catalog.average_rating(id),
        reviews,
        related: to_dtos(related.iter().map(|p| p.as_ref()), config),
    })
}

// =============================================================================
// Categories, Search, Home
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub product_count: usize,
}

pub fn list_categories(catalog: &Catalog, config: &StorefrontConfig) -> Vec<CategoryDto> {
    debug!("list_categories command");

    let counts = catalog.category_counts();
    catalog
        .categories()
        .iter()
        .zip(counts)
        .map(|(category, count)| CategoryDto {
            slug: category.slug.clone(),
            name: category.name.clone(),
            description: category.description.clone(),
            image_url: config.asset_url(&category.image),
            product_count: count.product_count,
        })
        .collect()
}

/// Header search box.
pub fn search_products(
    catalog: &Catalog,
    config: &StorefrontConfig,
    query: &str,
    limit: Option<usize>,
) -> Result<Vec<ProductDto>, ApiError> {
    let query = validate_search_query(query)?;
    let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    debug!(query = %query, limit, "search_products command");

    let results = catalog.search(&query, limit);
    Ok(to_dtos(results.iter().map(|p| p.as_ref()), config))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSections {
    pub featured: Vec<ProductDto>,
    pub best_sellers: Vec<ProductDto>,
    pub new_arrivals: Vec<ProductDto>,
}

/// The home page's product rails.
pub fn home_sections(catalog: &Catalog, config: &StorefrontConfig) -> HomeSections {
    debug!("home_sections command");
    HomeSections {
        featured: to_dtos(catalog.featured().iter().map(|p| p.as_ref()), config),
        best_sellers: to_dtos(catalog.best_sellers().iter().map(|p| p.as_ref()), config),
        new_arrivals: to_dtos(catalog.new_arrivals().iter().map(|p| p.as_ref()), config),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortOption {
    pub value: SortKey,
    pub label: &'static str,
}

/// Everything the filter sidebar needs to render its controls.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<ColorOption>,
    pub sort_options: Vec<SortOption>,
    pub price_slider_max: i64,
}

pub fn filter_options(catalog: &Catalog, config: &StorefrontConfig) -> FilterOptions {
    FilterOptions {
        categories: catalog.categories().iter().map(|c| c.name.clone()).collect(),
        sizes: catalog.available_sizes(),
        colors: catalog.available_colors(),
        sort_options: SortKey::ALL
            .into_iter()
            .map(|key| SortOption {
                value: key,
                label: sort_label(key),
            })
            .collect(),
        price_slider_max: config.filters.price_slider_max,
    }
}

fn sort_label(key: SortKey) -> &'static str {
    match key {
        SortKey::Featured => "Featured",
        SortKey::PriceLowHigh => "Price: Low to High",
        SortKey::PriceHighLow => "Price: High to Low",
        SortKey::Newest => "Newest",
        SortKey::BestSelling => "Best Selling",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
