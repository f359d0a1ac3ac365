use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::dto::{
    CalculateRequest, CalculationDto, CountryRateDto, CurrencyDto, HealthDto, LeadDto,
    MessageCategoryDto, QuoteDto, SaveCalculationRequest, SubmitLeadRequest, SuccessDto, UserDto,
};
use super::handlers;
use super::problem::{Problem, ValidationViolation};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "wa-pricing",
        version = "v1",
        description = "WhatsApp Business API cost calculator"
    ),
    paths(
        handlers::calculate,
        handlers::save_calculation,
        handlers::my_calculations,
        handlers::submit_lead,
        handlers::list_leads,
        handlers::get_country_rate,
        handlers::list_country_rates,
        handlers::me,
        handlers::health
    ),
    components(schemas(
        CalculateRequest,
        QuoteDto,
        SaveCalculationRequest,
        CalculationDto,
        SubmitLeadRequest,
        LeadDto,
        CountryRateDto,
        UserDto,
        SuccessDto,
        HealthDto,
        MessageCategoryDto,
        CurrencyDto,
        Problem,
        ValidationViolation
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "calculator", description = "Price estimates and saved calculations"),
        (name = "leads", description = "Contact submissions"),
        (name = "rates", description = "Per-country rate rows"),
        (name = "auth", description = "Caller identity"),
        (name = "system", description = "Liveness")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}
