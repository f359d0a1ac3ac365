use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, QueryOrder};
use wa_pricing_sdk::models::{Lead, NewLead};

use crate::domain::repo::LeadRepository;

use super::entity::lead::{self, Entity as LeadEntity};
use super::mapper::volume_to_db;

pub struct SeaOrmLeadRepository {
    db: DatabaseConnection,
}

impl SeaOrmLeadRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LeadRepository for SeaOrmLeadRepository {
    async fn insert(&self, lead: NewLead) -> anyhow::Result<Lead> {
        let active_model = lead::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(lead.name),
            surname: ActiveValue::Set(lead.surname),
            phone: ActiveValue::Set(lead.phone),
            email: ActiveValue::Set(lead.email),
            company: ActiveValue::Set(lead.company),
            country: ActiveValue::Set(lead.country),
            volume: ActiveValue::Set(lead.volume.map(volume_to_db).transpose()?),
            message_category: ActiveValue::Set(
                lead.message_category.map(|c| c.as_str().to_owned()),
            ),
            created_at: ActiveValue::Set(Utc::now()),
        };

        active_model.insert(&self.db).await?.try_into()
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Lead>> {
        LeadEntity::find()
            .order_by_desc(lead::Column::CreatedAt)
            .order_by_desc(lead::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }
}
