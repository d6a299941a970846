//! # Storefront Configuration
//!
//! Store identity, pricing rules, coupons and simulated latencies.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     REDLINE_STORE_NAME="Redline Apparel"                               │
//! │     REDLINE_TAX_RATE_BPS=825                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/config.toml (Linux)                           │
//! │     ~/Library/Application Support/com.redline.storefront/config.toml   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Redline Apparel"
//! currency_symbol = "$"
//! base_path = "/redline-store/"
//!
//! [pricing]
//! free_shipping_threshold_cents = 10000
//! flat_shipping_cents = 999
//! tax_rate_bps = 800
//!
//! [[coupons]]
//! code = "REDLINE10"
//! percentOffBps = 1000
//!
//! [simulation]
//! add_to_cart_delay_ms = 500
//! checkout_delay_ms = 2000
//! contact_delay_ms = 1500
//! declined_cards = ["4000000000000002"]
//!
//! [filters]
//! price_slider_max = 100
//! ```
//!
//! Read-only after startup, so no lock is needed.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use redline_core::{Coupon, CouponBook, PricingPolicy, DEFAULT_PRICE_SLIDER_MAX};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Sections
// =============================================================================

/// `[store]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub name: String,
    pub currency_symbol: String,
    /// Prefix for static asset URLs, set at deploy time.
    pub base_path: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: "Redline Apparel".to_string(),
            currency_symbol: "$".to_string(),
            base_path: "/".to_string(),
        }
    }
}

/// `[simulation]`: stand-ins for network latency and payment outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub add_to_cart_delay_ms: u64,
    pub checkout_delay_ms: u64,
    pub contact_delay_ms: u64,
    /// Card numbers (digits only) that the simulated processor declines.
    pub declined_cards: Vec<String>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            add_to_cart_delay_ms: 500,
            checkout_delay_ms: 2000,
            contact_delay_ms: 1500,
            declined_cards: vec!["4000000000000002".to_string()],
        }
    }
}

/// `[filters]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Initial position of the price slider's upper handle.
    pub price_slider_max: i64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        FilterSettings {
            price_slider_max: DEFAULT_PRICE_SLIDER_MAX,
        }
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub store: StoreSettings,
    pub pricing: PricingPolicy,
    pub coupons: Vec<Coupon>,
    pub simulation: SimulationSettings,
    pub filters: FilterSettings,
}

impl Default for StorefrontConfig {
    /// Development defaults, with the two launch coupons.
    fn default() -> Self {
        StorefrontConfig {
            store: StoreSettings::default(),
            pricing: PricingPolicy::default(),
            coupons: vec![
                Coupon::new("REDLINE10", 1000),
                Coupon::new("PITSTOP20", 2000),
            ],
            simulation: SimulationSettings::default(),
            filters: FilterSettings::default(),
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (config.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name must not be empty".into()));
        }
        if !self.store.base_path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "store.base_path must start with '/', got: {}",
                self.store.base_path
            )));
        }

        if self.pricing.tax_rate_bps > 10_000 {
            return Err(ConfigError::Invalid(
                "pricing.tax_rate_bps must be at most 10000".into(),
            ));
        }
        if self.pricing.flat_shipping_cents < 0 || self.pricing.free_shipping_threshold_cents < 0 {
            return Err(ConfigError::Invalid(
                "pricing amounts must not be negative".into(),
            ));
        }

        let mut seen = HashSet::new();
        for coupon in &self.coupons {
            let code = coupon.code.trim().to_ascii_uppercase();
            if code.is_empty() {
                return Err(ConfigError::Invalid("coupon code must not be empty".into()));
            }
            if coupon.percent_off_bps == 0 || coupon.percent_off_bps > 10_000 {
                return Err(ConfigError::Invalid(format!(
                    "coupon {} must take between 1 and 10000 bps off",
                    coupon.code
                )));
            }
            if !seen.insert(code) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate coupon code: {}",
                    coupon.code
                )));
            }
        }

        if self.filters.price_slider_max <= 0 {
            return Err(ConfigError::Invalid(
                "filters.price_slider_max must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `REDLINE_*` overrides read through `lookup`.
    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("REDLINE_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(symbol) = lookup("REDLINE_CURRENCY_SYMBOL") {
            self.store.currency_symbol = symbol;
        }

        if let Some(base_path) = lookup("REDLINE_BASE_PATH") {
            debug!(base_path = %base_path, "Overriding base path from environment");
            self.store.base_path = base_path;
        }

        if let Some(bps) = lookup("REDLINE_TAX_RATE_BPS") {
            match bps.parse::<u32>() {
                Ok(bps) => self.pricing.tax_rate_bps = bps,
                Err(_) => warn!(value = %bps, "Ignoring unparseable REDLINE_TAX_RATE_BPS"),
            }
        }

        if let Some(cents) = lookup("REDLINE_FREE_SHIPPING_CENTS") {
            if let Ok(cents) = cents.parse::<i64>() {
                self.pricing.free_shipping_threshold_cents = cents;
            }
        }

        if let Some(ms) = lookup("REDLINE_CHECKOUT_DELAY_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                debug!(ms, "Overriding checkout delay from environment");
                self.simulation.checkout_delay_ms = ms;
            }
        }

        if let Some(ms) = lookup("REDLINE_ADD_TO_CART_DELAY_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                self.simulation.add_to_cart_delay_ms = ms;
            }
        }

        if let Some(ms) = lookup("REDLINE_CONTACT_DELAY_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                self.simulation.contact_delay_ms = ms;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "redline", "storefront")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// # use redline_storefront::state::StorefrontConfig;
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.store.currency_symbol,
            (cents / 100).abs(),
            (cents % 100).abs()
        )
    }

    /// Prefixes a static asset path with the configured base path.
    ///
    /// Absolute URLs pass through unchanged.
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.store.base_path.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// The coupons the checkout accepts.
    pub fn coupon_book(&self) -> CouponBook {
        CouponBook::new(self.coupons.clone())
    }

    /// Whether the simulated processor declines this card.
    pub fn is_declined_card(&self, card_digits: &str) -> bool {
        self.simulation.declined_cards.iter().any(|c| c == card_digits)
    }

    pub fn add_to_cart_delay(&self) -> Duration {
        Duration::from_millis(self.simulation.add_to_cart_delay_ms)
    }

    pub fn checkout_delay(&self) -> Duration {
        Duration::from_millis(self.simulation.checkout_delay_ms)
    }

    pub fn contact_delay(&self) -> Duration {
        Duration::from_millis(self.simulation.contact_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = StorefrontConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.coupon_book().len(), 2);
        assert_eq!(config.checkout_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_format_currency() {
        let mut config = StorefrontConfig::default();
        assert_eq!(config.format_currency(1234), "$12.34");
        assert_eq!(config.format_currency(5), "$0.05");
        assert_eq!(config.format_currency(-1234), "-$12.34");

        config.store.currency_symbol = "€".into();
        assert_eq!(config.format_currency(999), "€9.99");
    }

    #[test]
    fn test_asset_url() {
        let mut config = StorefrontConfig::default();
        assert_eq!(config.asset_url("images/a.jpg"), "/images/a.jpg");

        config.store.base_path = "/redline-store/".into();
        assert_eq!(config.asset_url("/images/a.jpg"), "/redline-store/images/a.jpg");
        assert_eq!(
            config.asset_url("https://cdn.example.com/a.jpg"),
            "https://cdn.example.com/a.jpg"
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [store]
            name = "Redline Outlet"

            [pricing]
            tax_rate_bps = 825

            [[coupons]]
            code = "OUTLET5"
            percentOffBps = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.store.name, "Redline Outlet");
        assert_eq!(config.store.currency_symbol, "$");
        assert_eq!(config.pricing.tax_rate_bps, 825);
        assert_eq!(config.pricing.flat_shipping_cents, 999);
        assert_eq!(config.coupons, vec![Coupon::new("OUTLET5", 500)]);
        assert_eq!(config.simulation, SimulationSettings::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = StorefrontConfig::default();
        config.apply_env_overrides(env(&[
            ("REDLINE_STORE_NAME", "Night Shift"),
            ("REDLINE_TAX_RATE_BPS", "not-a-number"),
            ("REDLINE_CHECKOUT_DELAY_MS", "0"),
            ("REDLINE_BASE_PATH", "/shop/"),
        ]));

        assert_eq!(config.store.name, "Night Shift");
        assert_eq!(config.pricing.tax_rate_bps, 800);
        assert_eq!(config.checkout_delay(), Duration::ZERO);
        assert_eq!(config.store.base_path, "/shop/");
    }

    #[test]
    fn test_validation_failures() {
        let mut config = StorefrontConfig::default();
        config.coupons.push(Coupon::new("redline10", 500));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(msg)) if msg.contains("duplicate")));

        let mut config = StorefrontConfig::default();
        config.store.base_path = "shop".into();
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.pricing.tax_rate_bps = 20_000;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.coupons.push(Coupon::new("ZERO", 0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("redline-{}.toml", uuid::Uuid::new_v4()));
        let config = StorefrontConfig::load_or_default(Some(path));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_reads_file() {
        let path = std::env::temp_dir().join(format!("redline-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[filters]\nprice_slider_max = 150\n").unwrap();

        let config = StorefrontConfig::load(Some(path.clone())).unwrap();
        assert_eq!(config.filters.price_slider_max, 150);

        std::fs::write(&path, "[filters]\nprice_slider_max = 0\n").unwrap();
        assert!(StorefrontConfig::load(Some(path.clone())).is_err());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_declined_cards() {
        let config = StorefrontConfig::default();
        assert!(config.is_declined_card("4000000000000002"));
        assert!(!config.is_declined_card("4242424242424242"));
    }
}
