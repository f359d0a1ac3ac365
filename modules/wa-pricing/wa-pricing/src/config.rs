//! Module configuration (`modules.wa_pricing`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wa_pricing_sdk::models::{Identity, NewCountryRate};

use crate::domain::pricing::{PricingTable, PricingTableError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid pricing table: {0}")]
    Pricing(#[from] PricingTableError),

    #[error("auth.dev_identity.open_id must not be empty when auth is disabled")]
    MissingDevIdentity,

    #[error("auth token entry #{index} has an empty token or open_id")]
    InvalidToken { index: usize },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaPricingConfig {
    pub pricing: PricingTable,
    pub auth: AuthConfig,
    /// Rows upserted into `country_rates` at startup.
    pub country_rates: Vec<CountryRateConfig>,
}

impl WaPricingConfig {
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pricing.validate()?;
        if self.auth.disabled && self.auth.dev_identity.open_id.trim().is_empty() {
            return Err(ConfigError::MissingDevIdentity);
        }
        for (index, (token, identity)) in self.auth.tokens.iter().enumerate() {
            if token.trim().is_empty() || identity.open_id.trim().is_empty() {
                return Err(ConfigError::InvalidToken { index });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn seed_rates(&self) -> Vec<NewCountryRate> {
        self.country_rates.iter().cloned().map(Into::into).collect()
    }
}

/// Bearer token authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Run every request as `dev_identity`. Local development only.
    pub disabled: bool,
    pub dev_identity: IdentityConfig,
    /// Token to identity.
    pub tokens: BTreeMap<String, IdentityConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            dev_identity: IdentityConfig {
                open_id: "dev-user".to_owned(),
                name: Some("Developer".to_owned()),
                email: None,
                login_method: Some("dev".to_owned()),
            },
            tokens: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    pub open_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_method: Option<String>,
}

impl From<IdentityConfig> for Identity {
    fn from(cfg: IdentityConfig) -> Self {
        Self {
            open_id: cfg.open_id,
            name: cfg.name,
            email: cfg.email,
            login_method: cfg.login_method,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountryRateConfig {
    pub country: String,
    pub marketing_rate: String,
    pub utility_rate: String,
    pub authentication_rate: String,
}

impl From<CountryRateConfig> for NewCountryRate {
    fn from(cfg: CountryRateConfig) -> Self {
        Self {
            country: cfg.country,
            marketing_rate: cfg.marketing_rate,
            utility_rate: cfg.utility_rate,
            authentication_rate: cfg.authentication_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        WaPricingConfig::default().validate().unwrap();
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let json = serde_json::json!({ "pricing": {}, "currency": "EUR" });
        assert!(serde_json::from_value::<WaPricingConfig>(json).is_err());
    }

    #[test]
    fn disabled_auth_needs_dev_identity() {
        let mut cfg = WaPricingConfig::default();
        cfg.auth.disabled = true;
        cfg.auth.dev_identity.open_id = String::new();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MissingDevIdentity)
        ));
    }

    #[test]
    fn token_without_open_id_is_rejected() {
        let json = serde_json::json!({
            "auth": { "tokens": { "secret": { "open_id": "" } } }
        });
        let cfg: WaPricingConfig = serde_json::from_value(json).unwrap();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidToken { index: 0 })
        ));
    }

    #[test]
    fn invalid_pricing_table_fails_validation() {
        let json = serde_json::json!({ "pricing": { "brl_exchange_rate": "0" } });
        let cfg: WaPricingConfig = serde_json::from_value(json).unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::Pricing(_))));
    }

    #[test]
    fn country_rates_map_to_seed_rows() {
        let json = serde_json::json!({
            "country_rates": [{
                "country": "Brazil",
                "marketing_rate": "0.0625",
                "utility_rate": "0.0080",
                "authentication_rate": "0.0315"
            }]
        });
        let cfg: WaPricingConfig = serde_json::from_value(json).unwrap();
        let rows = cfg.seed_rates();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].country, "Brazil");
        assert_eq!(rows[0].utility_rate, "0.0080");
    }
}
