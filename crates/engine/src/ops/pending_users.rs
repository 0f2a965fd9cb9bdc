use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveValue, QueryOrder, prelude::*, sea_query::OnConflict};

use crate::{EngineError, PendingUser, ResultEngine, pending_users, store::PendingUserStore};

use super::DatabaseStore;

#[async_trait]
impl PendingUserStore for DatabaseStore {
    async fn list(&self) -> ResultEngine<Vec<PendingUser>> {
        Ok(pending_users::Entity::find()
            .order_by_desc(pending_users::Column::RequestedAt)
            .all(&self.database)
            .await?
            .into_iter()
            .map(PendingUser::from)
            .collect())
    }

    async fn get(&self, telegram_id: &str) -> ResultEngine<Option<PendingUser>> {
        Ok(pending_users::Entity::find_by_id(telegram_id.to_string())
            .one(&self.database)
            .await?
            .map(PendingUser::from))
    }

    async fn create(
        &self,
        telegram_id: &str,
        name: &str,
        username: &str,
    ) -> ResultEngine<PendingUser> {
        let model = pending_users::ActiveModel {
            telegram_id: ActiveValue::Set(telegram_id.to_string()),
            name: ActiveValue::Set(name.to_string()),
            username: ActiveValue::Set(username.to_string()),
            requested_at: ActiveValue::Set(Utc::now()),
        };

        pending_users::Entity::insert(model)
            .on_conflict(
                OnConflict::column(pending_users::Column::TelegramId)
                    .update_columns([pending_users::Column::Name, pending_users::Column::Username])
                    .to_owned(),
            )
            .exec_without_returning(&self.database)
            .await?;

        pending_users::Entity::find_by_id(telegram_id.to_string())
            .one(&self.database)
            .await?
            .map(PendingUser::from)
            .ok_or_else(|| EngineError::KeyNotFound("pending user".to_string()))
    }

    async fn delete(&self, telegram_id: &str) -> ResultEngine<()> {
        let result = pending_users::Entity::delete_by_id(telegram_id.to_string())
            .exec(&self.database)
            .await?;

        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("pending user".to_string()));
        }
        Ok(())
    }
}
