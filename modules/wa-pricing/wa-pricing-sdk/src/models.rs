//! Transport-agnostic models. No serde here: wire formats live in the REST layer.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::errors::PricingError;

/// Conversation category a message is billed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageCategory {
    Marketing,
    Utility,
    Authentication,
}

impl MessageCategory {
    pub const ALL: [Self; 3] = [Self::Marketing, Self::Utility, Self::Authentication];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Marketing => "marketing",
            Self::Utility => "utility",
            Self::Authentication => "authentication",
        }
    }
}

impl fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageCategory {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                PricingError::validation(format!(
                    "unknown message category '{s}', expected one of: marketing, utility, authentication"
                ))
            })
    }
}

/// Currency a quote is reported in. Rates are defined in USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Usd,
    Brl,
}

impl Currency {
    pub const ALL: [Self; 2] = [Self::Usd, Self::Brl];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Brl => "BRL",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                PricingError::validation(format!(
                    "unknown currency '{s}', expected one of: USD, BRL"
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for UserRole {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(PricingError::validation(format!("unknown role '{other}'"))),
        }
    }
}

/// Input of a single price computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    /// Carried through for display and history; does not affect the price.
    pub country: String,
    pub volume: u64,
    pub message_category: MessageCategory,
    pub currency: Currency,
}

/// Result of a price computation. Amounts are fixed-point decimal strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Two decimal places.
    pub total_cost: String,
    /// Four decimal places.
    pub cost_per_message: String,
    pub volume: u64,
    pub currency: Currency,
    /// Present only for non-USD quotes.
    pub exchange_rate: Option<String>,
}

/// A computed quote the caller wants to keep in their history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCalculation {
    pub country: String,
    pub volume: u64,
    pub message_category: MessageCategory,
    pub currency: Currency,
    pub total_cost: String,
    pub cost_per_message: String,
    pub exchange_rate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    pub id: i32,
    pub user_id: Option<i32>,
    pub country: String,
    pub volume: u64,
    pub message_category: MessageCategory,
    pub currency: Currency,
    pub total_cost: String,
    pub cost_per_message: String,
    pub exchange_rate: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub name: String,
    pub surname: Option<String>,
    pub phone: String,
    pub email: String,
    pub company: String,
    pub country: Option<String>,
    pub volume: Option<u64>,
    pub message_category: Option<MessageCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub id: i32,
    pub name: String,
    pub surname: Option<String>,
    pub phone: String,
    pub email: String,
    pub company: String,
    pub country: Option<String>,
    pub volume: Option<u64>,
    pub message_category: Option<MessageCategory>,
    pub created_at: DateTime<Utc>,
}

/// Per-country rate row. Rates are USD decimal strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCountryRate {
    pub country: String,
    pub marketing_rate: String,
    pub utility_rate: String,
    pub authentication_rate: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRate {
    pub id: i32,
    pub country: String,
    pub marketing_rate: String,
    pub utility_rate: String,
    pub authentication_rate: String,
    pub updated_at: DateTime<Utc>,
}

/// Identity asserted by the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn new(open_id: impl Into<String>) -> Self {
        Self {
            open_id: open_id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_signed_in: DateTime<Utc>,
}

/// Per-call caller context. Anonymous callers may use public procedures only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerCtx {
    user: Option<User>,
}

impl CallerCtx {
    #[must_use]
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    #[must_use]
    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
