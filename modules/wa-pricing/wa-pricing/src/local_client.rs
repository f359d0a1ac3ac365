use std::sync::Arc;

use async_trait::async_trait;
use wa_pricing_sdk::{
    CallerCtx, Calculation, CountryRate, Identity, Lead, NewCalculation, NewLead, PricingError,
    Quote, QuoteRequest, User, WaPricingClient,
};

use crate::domain::service::Service;

/// In-process [`WaPricingClient`] backed by the domain service.
pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl WaPricingClient for LocalClient {
    async fn calculate(&self, request: QuoteRequest) -> Result<Quote, PricingError> {
        self.service.calculate(&request).map_err(Into::into)
    }

    async fn save_calculation(
        &self,
        ctx: &CallerCtx,
        calculation: NewCalculation,
    ) -> Result<(), PricingError> {
        self.service
            .save_calculation(ctx, calculation)
            .await
            .map(|_| ())
            .map_err(Into::into)
    }

    async fn my_calculations(&self, ctx: &CallerCtx) -> Result<Vec<Calculation>, PricingError> {
        self.service.my_calculations(ctx).await.map_err(Into::into)
    }

    async fn submit_lead(&self, lead: NewLead) -> Result<(), PricingError> {
        self.service
            .submit_lead(lead)
            .await
            .map(|_| ())
            .map_err(Into::into)
    }

    async fn list_leads(&self, ctx: &CallerCtx) -> Result<Vec<Lead>, PricingError> {
        self.service.list_leads(ctx).await.map_err(Into::into)
    }

    async fn get_country_rate(&self, country: &str) -> Result<Option<CountryRate>, PricingError> {
        self.service
            .get_country_rate(country)
            .await
            .map_err(Into::into)
    }

    async fn list_country_rates(&self) -> Result<Vec<CountryRate>, PricingError> {
        self.service.list_country_rates().await.map_err(Into::into)
    }

    async fn sign_in(&self, identity: Identity) -> Result<User, PricingError> {
        self.service.sign_in(identity).await.map_err(Into::into)
    }
}
