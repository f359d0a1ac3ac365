pub mod error;
pub mod identity;
pub mod pricing;
pub mod repo;
pub mod service;
pub mod validation;
