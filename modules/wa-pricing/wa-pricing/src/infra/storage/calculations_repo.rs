use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use wa_pricing_sdk::models::{Calculation, NewCalculation};

use crate::domain::repo::CalculationRepository;

use super::entity::calculation::{self, Entity as CalculationEntity};
use super::mapper::volume_to_db;

pub struct SeaOrmCalculationRepository {
    db: DatabaseConnection,
}

impl SeaOrmCalculationRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CalculationRepository for SeaOrmCalculationRepository {
    async fn insert(
        &self,
        user_id: i32,
        calculation: NewCalculation,
    ) -> anyhow::Result<Calculation> {
        let active_model = calculation::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(Some(user_id)),
            country: ActiveValue::Set(calculation.country),
            volume: ActiveValue::Set(volume_to_db(calculation.volume)?),
            message_category: ActiveValue::Set(calculation.message_category.as_str().to_owned()),
            currency: ActiveValue::Set(calculation.currency.as_str().to_owned()),
            total_cost: ActiveValue::Set(calculation.total_cost),
            cost_per_message: ActiveValue::Set(calculation.cost_per_message),
            exchange_rate: ActiveValue::Set(calculation.exchange_rate),
            created_at: ActiveValue::Set(Utc::now()),
        };

        active_model.insert(&self.db).await?.try_into()
    }

    async fn list_by_user(&self, user_id: i32) -> anyhow::Result<Vec<Calculation>> {
        CalculationEntity::find()
            .filter(calculation::Column::UserId.eq(user_id))
            .order_by_desc(calculation::Column::CreatedAt)
            .order_by_desc(calculation::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }
}
