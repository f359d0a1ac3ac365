//! Identity resolution from the configured token table.

use std::collections::HashMap;

use wa_pricing_sdk::models::Identity;

use crate::config::AuthConfig;
use crate::domain::identity::IdentityResolver;

pub struct StaticTokenResolver {
    tokens: HashMap<String, Identity>,
}

impl StaticTokenResolver {
    #[must_use]
    pub fn from_config(cfg: &AuthConfig) -> Self {
        let tokens = cfg
            .tokens
            .iter()
            .map(|(token, identity)| (token.clone(), identity.clone().into()))
            .collect();
        Self { tokens }
    }
}

impl IdentityResolver for StaticTokenResolver {
    fn resolve(&self, token: &str) -> Option<Identity> {
        self.tokens.get(token).cloned()
    }
}
