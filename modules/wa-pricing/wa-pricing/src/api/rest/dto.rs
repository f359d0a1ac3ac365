use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use wa_pricing_sdk::models::{
    Calculation, CountryRate, Currency, Lead, MessageCategory, NewCalculation, NewLead, Quote,
    QuoteRequest, User,
};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageCategoryDto {
    Marketing,
    Utility,
    Authentication,
}

impl From<MessageCategoryDto> for MessageCategory {
    fn from(dto: MessageCategoryDto) -> Self {
        match dto {
            MessageCategoryDto::Marketing => Self::Marketing,
            MessageCategoryDto::Utility => Self::Utility,
            MessageCategoryDto::Authentication => Self::Authentication,
        }
    }
}

impl From<MessageCategory> for MessageCategoryDto {
    fn from(category: MessageCategory) -> Self {
        match category {
            MessageCategory::Marketing => Self::Marketing,
            MessageCategory::Utility => Self::Utility,
            MessageCategory::Authentication => Self::Authentication,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyDto {
    Usd,
    Brl,
}

impl From<CurrencyDto> for Currency {
    fn from(dto: CurrencyDto) -> Self {
        match dto {
            CurrencyDto::Usd => Self::Usd,
            CurrencyDto::Brl => Self::Brl,
        }
    }
}

impl From<Currency> for CurrencyDto {
    fn from(currency: Currency) -> Self {
        match currency {
            Currency::Usd => Self::Usd,
            Currency::Brl => Self::Brl,
        }
    }
}

/// Wire volumes are signed so that negatives reach validation instead of
/// failing deserialization.
fn volume_from_wire(volume: i64) -> Result<u64, DomainError> {
    u64::try_from(volume)
        .map_err(|_| DomainError::validation("volume", "must be a positive integer"))
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct CalculateRequest {
    /// Free text; blank or absent is accepted.
    #[serde(default)]
    pub country: String,
    pub volume: i64,
    #[serde(alias = "message_type")]
    pub message_category: MessageCategoryDto,
    pub currency: CurrencyDto,
}

impl TryFrom<CalculateRequest> for QuoteRequest {
    type Error = DomainError;

    fn try_from(req: CalculateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            country: req.country,
            volume: volume_from_wire(req.volume)?,
            message_category: req.message_category.into(),
            currency: req.currency.into(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct QuoteDto {
    /// Two decimal places.
    pub total_cost: String,
    /// Four decimal places.
    pub cost_per_message: String,
    pub volume: u64,
    pub currency: CurrencyDto,
    /// Present for non-USD quotes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<String>,
}

impl From<Quote> for QuoteDto {
    fn from(quote: Quote) -> Self {
        Self {
            total_cost: quote.total_cost,
            cost_per_message: quote.cost_per_message,
            volume: quote.volume,
            currency: quote.currency.into(),
            exchange_rate: quote.exchange_rate,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct SaveCalculationRequest {
    #[serde(default)]
    pub country: String,
    pub volume: i64,
    #[serde(alias = "message_type")]
    pub message_category: MessageCategoryDto,
    pub currency: CurrencyDto,
    pub total_cost: String,
    pub cost_per_message: String,
    #[serde(default)]
    pub exchange_rate: Option<String>,
}

impl TryFrom<SaveCalculationRequest> for NewCalculation {
    type Error = DomainError;

    fn try_from(req: SaveCalculationRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            country: req.country,
            volume: volume_from_wire(req.volume)?,
            message_category: req.message_category.into(),
            currency: req.currency.into(),
            total_cost: req.total_cost,
            cost_per_message: req.cost_per_message,
            exchange_rate: req.exchange_rate,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuccessDto {
    pub success: bool,
}

impl SuccessDto {
    #[must_use]
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct CalculationDto {
    pub id: i32,
    pub user_id: Option<i32>,
    pub country: String,
    pub volume: u64,
    pub message_category: MessageCategoryDto,
    pub currency: CurrencyDto,
    pub total_cost: String,
    pub cost_per_message: String,
    pub exchange_rate: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Calculation> for CalculationDto {
    fn from(c: Calculation) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            country: c.country,
            volume: c.volume,
            message_category: c.message_category.into(),
            currency: c.currency.into(),
            total_cost: c.total_cost,
            cost_per_message: c.cost_per_message,
            exchange_rate: c.exchange_rate,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct SubmitLeadRequest {
    pub name: String,
    #[serde(default)]
    pub surname: Option<String>,
    pub phone: String,
    pub email: String,
    pub company: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub volume: Option<i64>,
    #[serde(default, alias = "message_type")]
    pub message_category: Option<MessageCategoryDto>,
}

impl TryFrom<SubmitLeadRequest> for NewLead {
    type Error = DomainError;

    fn try_from(req: SubmitLeadRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: req.name,
            surname: req.surname,
            phone: req.phone,
            email: req.email,
            company: req.company,
            country: req.country,
            volume: req.volume.map(volume_from_wire).transpose()?,
            message_category: req.message_category.map(Into::into),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct LeadDto {
    pub id: i32,
    pub name: String,
    pub surname: Option<String>,
    pub phone: String,
    pub email: String,
    pub company: String,
    pub country: Option<String>,
    pub volume: Option<u64>,
    pub message_category: Option<MessageCategoryDto>,
    pub created_at: DateTime<Utc>,
}

impl From<Lead> for LeadDto {
    fn from(l: Lead) -> Self {
        Self {
            id: l.id,
            name: l.name,
            surname: l.surname,
            phone: l.phone,
            email: l.email,
            company: l.company,
            country: l.country,
            volume: l.volume,
            message_category: l.message_category.map(Into::into),
            created_at: l.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct CountryRateDto {
    pub id: i32,
    pub country: String,
    pub marketing_rate: String,
    pub utility_rate: String,
    pub authentication_rate: String,
    pub updated_at: DateTime<Utc>,
}

impl From<CountryRate> for CountryRateDto {
    fn from(r: CountryRate) -> Self {
        Self {
            id: r.id,
            country: r.country,
            marketing_rate: r.marketing_rate,
            utility_rate: r.utility_rate,
            authentication_rate: r.authentication_rate,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct UserDto {
    pub id: i32,
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
    /// `user` or `admin`.
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_signed_in: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            open_id: u.open_id,
            name: u.name,
            email: u.email,
            login_method: u.login_method,
            role: u.role.as_str().to_owned(),
            created_at: u.created_at,
            updated_at: u.updated_at,
            last_signed_in: u.last_signed_in,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
}
