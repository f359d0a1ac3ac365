use std::sync::Arc;

use axum::extract::{Extension, FromRequest, Path};
use axum::Json;
use utoipa::OpenApi;
use wa_pricing_sdk::models::{NewCalculation, NewLead, QuoteRequest};

use crate::domain::service::Service;

use super::auth::{Authenticated, Caller};
use super::dto::{
    CalculateRequest, CalculationDto, CountryRateDto, HealthDto, LeadDto, QuoteDto,
    SaveCalculationRequest, SubmitLeadRequest, SuccessDto, UserDto,
};
use super::error::ApiResult;
use super::openapi::ApiDoc;
use super::problem::Problem;

/// `axum::Json` with rejections rendered as problem documents.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(Problem))]
pub struct ApiJson<T>(pub T);

#[utoipa::path(
    post,
    path = "/wa-pricing/v1/calculator/calculate",
    operation_id = "calculator.calculate",
    tag = "calculator",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Price estimate", body = QuoteDto),
        (status = 400, description = "Malformed JSON", body = Problem, content_type = "application/problem+json"),
        (status = 422, description = "Invalid input", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn calculate(
    Extension(svc): Extension<Arc<Service>>,
    ApiJson(req): ApiJson<CalculateRequest>,
) -> ApiResult<Json<QuoteDto>> {
    let request = QuoteRequest::try_from(req)?;
    let quote = svc.calculate(&request)?;
    Ok(Json(quote.into()))
}

#[utoipa::path(
    post,
    path = "/wa-pricing/v1/calculator/calculations",
    operation_id = "calculator.saveCalculation",
    tag = "calculator",
    request_body = SaveCalculationRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Calculation saved", body = SuccessDto),
        (status = 401, description = "No authenticated caller", body = Problem, content_type = "application/problem+json"),
        (status = 422, description = "Invalid input", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn save_calculation(
    Authenticated(ctx): Authenticated,
    Extension(svc): Extension<Arc<Service>>,
    ApiJson(req): ApiJson<SaveCalculationRequest>,
) -> ApiResult<Json<SuccessDto>> {
    let calculation = NewCalculation::try_from(req)?;
    svc.save_calculation(&ctx, calculation).await?;
    Ok(Json(SuccessDto::ok()))
}

#[utoipa::path(
    get,
    path = "/wa-pricing/v1/calculator/calculations",
    operation_id = "calculator.myCalculations",
    tag = "calculator",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's calculations, newest first", body = Vec<CalculationDto>),
        (status = 401, description = "No authenticated caller", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn my_calculations(
    Authenticated(ctx): Authenticated,
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<Vec<CalculationDto>>> {
    let rows = svc.my_calculations(&ctx).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/wa-pricing/v1/leads",
    operation_id = "leads.submit",
    tag = "leads",
    request_body = SubmitLeadRequest,
    responses(
        (status = 200, description = "Lead recorded", body = SuccessDto),
        (status = 422, description = "Invalid input", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn submit_lead(
    Extension(svc): Extension<Arc<Service>>,
    ApiJson(req): ApiJson<SubmitLeadRequest>,
) -> ApiResult<Json<SuccessDto>> {
    let lead = NewLead::try_from(req)?;
    svc.submit_lead(lead).await?;
    Ok(Json(SuccessDto::ok()))
}

#[utoipa::path(
    get,
    path = "/wa-pricing/v1/leads",
    operation_id = "leads.list",
    tag = "leads",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All leads, newest first", body = Vec<LeadDto>),
        (status = 401, description = "No authenticated caller", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn list_leads(
    Authenticated(ctx): Authenticated,
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<Vec<LeadDto>>> {
    let rows = svc.list_leads(&ctx).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/wa-pricing/v1/rates/{country}",
    operation_id = "rates.getCountry",
    tag = "rates",
    params(("country" = String, Path, description = "Exact country name")),
    responses(
        (status = 200, description = "Rate row, or null when the country is unknown", body = CountryRateDto)
    )
)]
pub async fn get_country_rate(
    Extension(svc): Extension<Arc<Service>>,
    Path(country): Path<String>,
) -> ApiResult<Json<Option<CountryRateDto>>> {
    let rate = svc.get_country_rate(&country).await?;
    Ok(Json(rate.map(Into::into)))
}

#[utoipa::path(
    get,
    path = "/wa-pricing/v1/rates",
    operation_id = "rates.listAll",
    tag = "rates",
    responses(
        (status = 200, description = "All rate rows ordered by country", body = Vec<CountryRateDto>)
    )
)]
pub async fn list_country_rates(
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<Vec<CountryRateDto>>> {
    let rows = svc.list_country_rates().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/wa-pricing/v1/auth/me",
    operation_id = "auth.me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user, or null for anonymous callers", body = UserDto)
    )
)]
pub async fn me(Caller(ctx): Caller) -> Json<Option<UserDto>> {
    Json(ctx.user().cloned().map(Into::into))
}

#[utoipa::path(
    get,
    path = "/health",
    operation_id = "system.health",
    tag = "system",
    responses((status = 200, description = "Service is up", body = HealthDto))
)]
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_owned(),
    })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
