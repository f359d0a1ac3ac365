use async_trait::async_trait;
use chrono::{DateTime, Utc};
use wa_pricing_sdk::models::{
    Calculation, CountryRate, Identity, Lead, NewCalculation, NewCountryRate, NewLead, User,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the user on first sight of `open_id`, otherwise refresh profile
    /// fields and `last_signed_in`.
    async fn upsert_signed_in(
        &self,
        identity: &Identity,
        at: DateTime<Utc>,
    ) -> anyhow::Result<User>;
}

#[async_trait]
pub trait CalculationRepository: Send + Sync {
    async fn insert(
        &self,
        user_id: i32,
        calculation: NewCalculation,
    ) -> anyhow::Result<Calculation>;

    /// Newest first.
    async fn list_by_user(&self, user_id: i32) -> anyhow::Result<Vec<Calculation>>;
}

#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn insert(&self, lead: NewLead) -> anyhow::Result<Lead>;

    /// Newest first.
    async fn list_all(&self) -> anyhow::Result<Vec<Lead>>;
}

#[async_trait]
pub trait CountryRateRepository: Send + Sync {
    async fn find_by_country(&self, country: &str) -> anyhow::Result<Option<CountryRate>>;

    /// Ordered by country name.
    async fn list_all(&self) -> anyhow::Result<Vec<CountryRate>>;

    async fn upsert(&self, rate: NewCountryRate) -> anyhow::Result<CountryRate>;
}
