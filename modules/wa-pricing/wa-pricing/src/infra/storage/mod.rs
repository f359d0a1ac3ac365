pub mod calculations_repo;
pub mod country_rates_repo;
pub mod entity;
pub mod leads_repo;
pub mod mapper;
pub mod migrations;
pub mod users_repo;


pub use calculations_repo::SeaOrmCalculationRepository;
pub use country_rates_repo::SeaOrmCountryRateRepository;
pub use leads_repo::SeaOrmLeadRepository;
pub use users_repo::SeaOrmUserRepository;
