//! `WaPricingClient` trait definition.
//!
//! Public procedures take no caller context. Identity-scoped procedures take
//! a [`CallerCtx`] and fail with [`PricingError::Unauthenticated`] when it
//! carries no user.

use async_trait::async_trait;

use crate::errors::PricingError;
use crate::models::{
    CallerCtx, Calculation, CountryRate, Identity, Lead, NewCalculation, NewLead, Quote,
    QuoteRequest, User,
};

#[async_trait]
pub trait WaPricingClient: Send + Sync {
    /// Compute a price estimate. Pure, nothing is persisted.
    async fn calculate(&self, request: QuoteRequest) -> Result<Quote, PricingError>;

    /// Append a calculation to the caller's history.
    async fn save_calculation(
        &self,
        ctx: &CallerCtx,
        calculation: NewCalculation,
    ) -> Result<(), PricingError>;

    /// The caller's calculations, newest first.
    async fn my_calculations(&self, ctx: &CallerCtx) -> Result<Vec<Calculation>, PricingError>;

    /// Record a contact submission. No deduplication.
    async fn submit_lead(&self, lead: NewLead) -> Result<(), PricingError>;

    /// All leads, newest first.
    async fn list_leads(&self, ctx: &CallerCtx) -> Result<Vec<Lead>, PricingError>;

    /// Rate row for an exact country name, if one exists.
    async fn get_country_rate(&self, country: &str) -> Result<Option<CountryRate>, PricingError>;

    /// All rate rows ordered by country name.
    async fn list_country_rates(&self) -> Result<Vec<CountryRate>, PricingError>;

    /// Create or refresh the user record for an authenticated identity.
    async fn sign_in(&self, identity: Identity) -> Result<User, PricingError>;
}
