//! Cost calculator module for the `WhatsApp` Business API.
//!
//! The public API is defined in `wa-pricing-sdk` and re-exported here.

pub use wa_pricing_sdk::{
    CallerCtx, Calculation, CountryRate, Currency, Identity, Lead, MessageCategory,
    NewCalculation, NewLead, PricingError, Quote, QuoteRequest, User, WaPricingClient,
};

pub mod module;
pub use module::WaPricingModule;

pub mod local_client;

pub use config::WaPricingConfig;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
