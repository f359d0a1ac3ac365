#![allow(clippy::unwrap_used, clippy::expect_used)]

//! `WaPricingClient` served in-process by the module

mod common;

use wa_pricing::{
    CallerCtx, Currency, Identity, MessageCategory, NewCalculation, NewLead, PricingError,
    QuoteRequest,
};

#[tokio::test]
async fn calculate_matches_reference_quote() {
    let client = common::init_module(common::test_config()).await.client();

    let quote = client
        .calculate(QuoteRequest {
            country: "Brazil".to_owned(),
            volume: 10_000,
            message_category: MessageCategory::Utility,
            currency: Currency::Brl,
        })
        .await
        .unwrap();

    assert_eq!(quote.total_cost, "428.00");
    assert_eq!(quote.cost_per_message, "0.0428");
    assert_eq!(quote.exchange_rate.as_deref(), Some("5.35"));
}

#[tokio::test]
async fn zero_volume_is_a_validation_error() {
    let client = common::init_module(common::test_config()).await.client();

    let err = client
        .calculate(QuoteRequest {
            country: "Brazil".to_owned(),
            volume: 0,
            message_category: MessageCategory::Marketing,
            currency: Currency::Usd,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, PricingError::Validation { .. }));
}

#[tokio::test]
async fn history_round_trip_for_signed_in_caller() {
    let client = common::init_module(common::test_config()).await.client();
    let calculation = NewCalculation {
        country: "Brazil".to_owned(),
        volume: 100,
        message_category: MessageCategory::Marketing,
        currency: Currency::Usd,
        total_cost: "6.25".to_owned(),
        cost_per_message: "0.0625".to_owned(),
        exchange_rate: None,
    };

    let err = client
        .save_calculation(&CallerCtx::anonymous(), calculation.clone())
        .await
        .unwrap_err();
    assert_eq!(err, PricingError::Unauthenticated);

    let user = client.sign_in(Identity::new("carla")).await.unwrap();
    let ctx = CallerCtx::authenticated(user.clone());
    client.save_calculation(&ctx, calculation).await.unwrap();

    let rows = client.my_calculations(&ctx).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, Some(user.id));
    assert_eq!(rows[0].total_cost, "6.25");
}

#[tokio::test]
async fn lead_with_bad_email_is_rejected() {
    let client = common::init_module(common::test_config()).await.client();

    let err = client
        .submit_lead(NewLead {
            name: "Ana".to_owned(),
            surname: None,
            phone: "123".to_owned(),
            email: "ana-at-example.com".to_owned(),
            company: "Acme".to_owned(),
            country: None,
            volume: None,
            message_category: None,
        })
        .await
        .unwrap_err();

    assert!(
        matches!(err, PricingError::Validation { ref message } if message.starts_with("email"))
    );
}

#[tokio::test]
async fn country_rates_seeded_from_config() {
    let client = common::init_module(common::test_config()).await.client();

    let rates = client.list_country_rates().await.unwrap();
    assert_eq!(rates.len(), 2);
    assert_eq!(rates[0].country, "Brazil");
    assert!(client.get_country_rate("Peru").await.unwrap().is_none());
}
