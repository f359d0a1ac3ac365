//! Public contract of the `wa-pricing` module.
//!
//! Consumers depend on this crate only: it carries the transport-agnostic
//! models, the [`WaPricingClient`] trait and the [`PricingError`] type. The
//! module crate provides the in-process implementation.

pub mod api;
pub mod errors;
pub mod models;

pub use api::WaPricingClient;
pub use errors::PricingError;
pub use models::{
    CallerCtx, Calculation, CountryRate, Currency, Identity, Lead, MessageCategory,
    NewCalculation, NewCountryRate, NewLead, Quote, QuoteRequest, User, UserRole,
};
