use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    sea_query::OnConflict,
};
use wa_pricing_sdk::models::{CountryRate, NewCountryRate};

use crate::domain::repo::CountryRateRepository;

use super::entity::country_rate::{self, Entity as CountryRateEntity};

pub struct SeaOrmCountryRateRepository {
    db: DatabaseConnection,
}

impl SeaOrmCountryRateRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CountryRateRepository for SeaOrmCountryRateRepository {
    async fn find_by_country(&self, country: &str) -> anyhow::Result<Option<CountryRate>> {
        let model = CountryRateEntity::find()
            .filter(country_rate::Column::Country.eq(country))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<CountryRate>> {
        let models = CountryRateEntity::find()
            .order_by_asc(country_rate::Column::Country)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn upsert(&self, rate: NewCountryRate) -> anyhow::Result<CountryRate> {
        let country = rate.country.clone();
        let active_model = country_rate::ActiveModel {
            id: ActiveValue::NotSet,
            country: ActiveValue::Set(rate.country),
            marketing_rate: ActiveValue::Set(rate.marketing_rate),
            utility_rate: ActiveValue::Set(rate.utility_rate),
            authentication_rate: ActiveValue::Set(rate.authentication_rate),
            updated_at: ActiveValue::Set(Utc::now()),
        };

        CountryRateEntity::insert(active_model)
            .on_conflict(
                OnConflict::column(country_rate::Column::Country)
                    .update_columns([
                        country_rate::Column::MarketingRate,
                        country_rate::Column::UtilityRate,
                        country_rate::Column::AuthenticationRate,
                        country_rate::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        self.find_by_country(&country)
            .await?
            .ok_or_else(|| anyhow::anyhow!("country rate '{country}' missing after upsert"))
    }
}
