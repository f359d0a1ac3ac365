use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    sea_query::OnConflict,
};
use wa_pricing_sdk::models::{Identity, User, UserRole};

use crate::domain::repo::UserRepository;

use super::entity::user::{self, Entity as UserEntity};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn upsert_signed_in(
        &self,
        identity: &Identity,
        at: DateTime<Utc>,
    ) -> anyhow::Result<User> {
        let active_model = user::ActiveModel {
            id: ActiveValue::NotSet,
            open_id: ActiveValue::Set(identity.open_id.clone()),
            name: ActiveValue::Set(identity.name.clone()),
            email: ActiveValue::Set(identity.email.clone()),
            login_method: ActiveValue::Set(identity.login_method.clone()),
            role: ActiveValue::Set(UserRole::User.as_str().to_owned()),
            created_at: ActiveValue::Set(at),
            updated_at: ActiveValue::Set(at),
            last_signed_in: ActiveValue::Set(at),
        };

        // Profile fields the identity does not carry keep their stored value.
        let mut columns_to_update = vec![user::Column::UpdatedAt, user::Column::LastSignedIn];
        if identity.name.is_some() {
            columns_to_update.push(user::Column::Name);
        }
        if identity.email.is_some() {
            columns_to_update.push(user::Column::Email);
        }
        if identity.login_method.is_some() {
            columns_to_update.push(user::Column::LoginMethod);
        }

        UserEntity::insert(active_model)
            .on_conflict(
                OnConflict::column(user::Column::OpenId)
                    .update_columns(columns_to_update)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        let model = UserEntity::find()
            .filter(user::Column::OpenId.eq(identity.open_id.as_str()))
            .one(&self.db)
            .await?
            .ok_or_else(|| anyhow::anyhow!("user '{}' missing after upsert", identity.open_id))?;

        model.try_into()
    }
}
