use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use wa_pricing_sdk::models::{
    CallerCtx, Calculation, CountryRate, Identity, Lead, NewCalculation, NewCountryRate, NewLead,
    Quote, QuoteRequest, User,
};

use super::error::DomainError;
use super::pricing::{PricingTable, PricingTableError};
use super::repo::{CalculationRepository, CountryRateRepository, LeadRepository, UserRepository};
use super::validation::{
    self, MAX_AMOUNT_LEN, MAX_COUNTRY_LEN, MAX_EMAIL_LEN, MAX_LOGIN_METHOD_LEN, MAX_NAME_LEN,
    MAX_OPEN_ID_LEN, MAX_PHONE_LEN, MAX_RATE_LEN,
};

#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    pub pricing: PricingTable,
}

/// Storage handles used by [`Service`].
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub calculations: Arc<dyn CalculationRepository>,
    pub leads: Arc<dyn LeadRepository>,
    pub country_rates: Arc<dyn CountryRateRepository>,
}

pub struct Service {
    repos: Repositories,
    config: ServiceConfig,
}

impl Service {
    #[must_use]
    pub fn new(repos: Repositories, config: ServiceConfig) -> Self {
        Self { repos, config }
    }

    /// Price estimate for `request`.
    ///
    /// # Errors
    /// Validation error for a non-positive or oversized volume, or an
    /// over-long country.
    pub fn calculate(&self, request: &QuoteRequest) -> Result<Quote, DomainError> {
        validation::bounded("country", &request.country, MAX_COUNTRY_LEN)?;
        validation::volume("volume", request.volume)?;
        let quote = self.config.pricing.quote(request).map_err(|e| match e {
            PricingTableError::Overflow => DomainError::validation("volume", "too large to price"),
            other => DomainError::validation("pricing", other.to_string()),
        })?;
        debug!(
            category = %request.message_category,
            currency = %request.currency,
            volume = request.volume,
            total_cost = %quote.total_cost,
            "quote computed"
        );
        Ok(quote)
    }

    /// Create or refresh the user behind an authenticated identity.
    ///
    /// # Errors
    /// Validation error for a malformed identity, database error otherwise.
    #[tracing::instrument(skip_all, fields(open_id = %identity.open_id))]
    pub async fn sign_in(&self, identity: Identity) -> Result<User, DomainError> {
        let identity = Identity {
            open_id: validation::required("open_id", &identity.open_id, MAX_OPEN_ID_LEN)?,
            name: identity.name.filter(|n| !n.trim().is_empty()),
            email: validation::optional("email", identity.email.as_deref(), MAX_EMAIL_LEN)?,
            login_method: validation::optional(
                "login_method",
                identity.login_method.as_deref(),
                MAX_LOGIN_METHOD_LEN,
            )?,
        };
        let user = self
            .repos
            .users
            .upsert_signed_in(&identity, Utc::now())
            .await?;
        debug!(user_id = user.id, "identity signed in");
        Ok(user)
    }

    /// Append a calculation to the caller's history.
    ///
    /// The submitted amounts are stored as given once they parse as decimals.
    ///
    /// # Errors
    /// `Unauthenticated` without a user in `ctx`; validation or database errors.
    #[tracing::instrument(skip_all)]
    pub async fn save_calculation(
        &self,
        ctx: &CallerCtx,
        calculation: NewCalculation,
    ) -> Result<Calculation, DomainError> {
        let user = ctx.user().ok_or(DomainError::Unauthenticated)?;

        let calculation = NewCalculation {
            country: validation::bounded("country", &calculation.country, MAX_COUNTRY_LEN)?,
            volume: validation::volume("volume", calculation.volume)?,
            message_category: calculation.message_category,
            currency: calculation.currency,
            total_cost: validation::decimal_string(
                "total_cost",
                &calculation.total_cost,
                MAX_AMOUNT_LEN,
            )?,
            cost_per_message: validation::decimal_string(
                "cost_per_message",
                &calculation.cost_per_message,
                MAX_AMOUNT_LEN,
            )?,
            exchange_rate: calculation
                .exchange_rate
                .as_deref()
                .filter(|r| !r.trim().is_empty())
                .map(|r| validation::decimal_string("exchange_rate", r, MAX_RATE_LEN))
                .transpose()?,
        };

        let saved = self
            .repos
            .calculations
            .insert(user.id, calculation)
            .await?;
        info!(user_id = user.id, calculation_id = saved.id, "calculation saved");
        Ok(saved)
    }

    /// # Errors
    /// `Unauthenticated` without a user in `ctx`; database errors.
    pub async fn my_calculations(&self, ctx: &CallerCtx) -> Result<Vec<Calculation>, DomainError> {
        let user = ctx.user().ok_or(DomainError::Unauthenticated)?;
        Ok(self.repos.calculations.list_by_user(user.id).await?)
    }

    /// Record a contact submission.
    ///
    /// # Errors
    /// Validation error on the first offending field; database errors.
    #[tracing::instrument(skip_all)]
    pub async fn submit_lead(&self, lead: NewLead) -> Result<Lead, DomainError> {
        let lead = NewLead {
            name: validation::required("name", &lead.name, MAX_NAME_LEN)?,
            surname: validation::optional("surname", lead.surname.as_deref(), MAX_NAME_LEN)?,
            phone: validation::required("phone", &lead.phone, MAX_PHONE_LEN)?,
            email: validation::email("email", &lead.email)?,
            company: validation::required("company", &lead.company, MAX_NAME_LEN)?,
            country: validation::optional("country", lead.country.as_deref(), MAX_COUNTRY_LEN)?,
            volume: lead
                .volume
                .map(|v| validation::volume("volume", v))
                .transpose()?,
            message_category: lead.message_category,
        };

        let saved = self.repos.leads.insert(lead).await?;
        info!(lead_id = saved.id, "lead submitted");
        Ok(saved)
    }

    /// # Errors
    /// `Unauthenticated` without a user in `ctx`; database errors.
    pub async fn list_leads(&self, ctx: &CallerCtx) -> Result<Vec<Lead>, DomainError> {
        if !ctx.is_authenticated() {
            return Err(DomainError::Unauthenticated);
        }
        Ok(self.repos.leads.list_all().await?)
    }

    /// # Errors
    /// Database errors.
    pub async fn get_country_rate(
        &self,
        country: &str,
    ) -> Result<Option<CountryRate>, DomainError> {
        Ok(self
            .repos
            .country_rates
            .find_by_country(country.trim())
            .await?)
    }

    /// # Errors
    /// Database errors.
    pub async fn list_country_rates(&self) -> Result<Vec<CountryRate>, DomainError> {
        Ok(self.repos.country_rates.list_all().await?)
    }

    /// Upsert configured rate rows by country. Returns how many were written.
    ///
    /// # Errors
    /// Validation error on the first malformed row; database errors.
    pub async fn seed_country_rates(&self, rates: &[NewCountryRate]) -> Result<usize, DomainError> {
        let mut validated = Vec::with_capacity(rates.len());
        for rate in rates {
            validated.push(NewCountryRate {
                country: validation::required("country", &rate.country, MAX_COUNTRY_LEN)?,
                marketing_rate: validation::decimal_string(
                    "marketing_rate",
                    &rate.marketing_rate,
                    MAX_RATE_LEN,
                )?,
                utility_rate: validation::decimal_string(
                    "utility_rate",
                    &rate.utility_rate,
                    MAX_RATE_LEN,
                )?,
                authentication_rate: validation::decimal_string(
                    "authentication_rate",
                    &rate.authentication_rate,
                    MAX_RATE_LEN,
                )?,
            });
        }

        let count = validated.len();
        for rate in validated {
            self.repos.country_rates.upsert(rate).await?;
        }
        if count > 0 {
            info!(count, "country rates seeded");
        }
        Ok(count)
    }
}
