//! Checkout configuration.

use serde::{Deserialize, Serialize};
use vitrine_commerce::Currency;

/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "VITRINE_API_URL";
/// Environment variable overriding the gateway public key.
pub const ENV_PAYMENT_KEY: &str = "VITRINE_PAYMENT_KEY";

/// Static configuration for checkout attempts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutConfig {
    /// Base URL of the order API, without a trailing slash.
    pub api_base_url: String,
    /// Public key handed to the payment widget.
    pub payment_public_key: String,
    /// Currency for carts and payments.
    pub currency: Currency,
    /// Country recorded on shipping addresses.
    pub country: String,
    /// Shipping provider recorded on shipments.
    pub shipping_provider: String,
    /// Payment method tag recorded on orders.
    pub payment_method: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5050".to_string(),
            payment_public_key: "pk_test_000000000000000000000000000000000000".to_string(),
            currency: Currency::NGN,
            country: "Nigeria".to_string(),
            shipping_provider: "Standard Shipping".to_string(),
            payment_method: "paystack".to_string(),
        }
    }
}

impl CheckoutConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(ENV_API_URL) {
            config.api_base_url = url;
        }
        if let Ok(key) = std::env::var(ENV_PAYMENT_KEY) {
            config.payment_public_key = key;
        }
        config
    }

    /// Set the API base URL.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the gateway public key.
    pub fn with_payment_public_key(mut self, key: impl Into<String>) -> Self {
        self.payment_public_key = key.into();
        self
    }

    /// Set the currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckoutConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:5050");
        assert_eq!(config.currency, Currency::NGN);
        assert_eq!(config.country, "Nigeria");
        assert_eq!(config.shipping_provider, "Standard Shipping");
        assert_eq!(config.payment_method, "paystack");
    }

    #[test]
    fn test_from_env_overrides() {
        std::env::set_var(ENV_API_URL, "https://api.vitrine.test");
        let config = CheckoutConfig::from_env();
        std::env::remove_var(ENV_API_URL);

        assert_eq!(config.api_base_url, "https://api.vitrine.test");
        assert_eq!(config.country, "Nigeria");
    }

    #[test]
    fn test_builders() {
        let config = CheckoutConfig::default()
            .with_api_base_url("https://api.example.com")
            .with_currency(Currency::USD);
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.currency, Currency::USD);
    }
}
