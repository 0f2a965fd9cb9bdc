use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue, QueryFilter, QueryOrder,
    prelude::*,
    sea_query::{Expr, OnConflict},
};

use crate::{EngineError, ResultEngine, User, UserFields, store::UserStore, users};

use super::DatabaseStore;

impl DatabaseStore {
    async fn find_user(&self, telegram_id: &str) -> ResultEngine<Option<User>> {
        users::Entity::find_by_id(telegram_id.to_string())
            .one(&self.database)
            .await?
            .map(User::try_from)
            .transpose()
    }
}

#[async_trait]
impl UserStore for DatabaseStore {
    async fn list(&self) -> ResultEngine<Vec<User>> {
        users::Entity::find()
            .filter(users::Column::Active.eq(true))
            .order_by_asc(users::Column::Name)
            .all(&self.database)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn get(&self, telegram_id: &str) -> ResultEngine<Option<User>> {
        users::Entity::find_by_id(telegram_id.to_string())
            .filter(users::Column::Active.eq(true))
            .one(&self.database)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn create(&self, telegram_id: &str, fields: UserFields) -> ResultEngine<User> {
        let now = Utc::now();
        let model = users::ActiveModel {
            telegram_id: ActiveValue::Set(telegram_id.to_string()),
            name: ActiveValue::Set(fields.name),
            role: ActiveValue::Set(fields.role.as_str().to_string()),
            active: ActiveValue::Set(fields.active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        // Upsert: insert if missing, otherwise replace everything but created_at.
        users::Entity::insert(model)
            .on_conflict(
                OnConflict::column(users::Column::TelegramId)
                    .update_columns([
                        users::Column::Name,
                        users::Column::Role,
                        users::Column::Active,
                        users::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.database)
            .await?;

        self.find_user(telegram_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user".to_string()))
    }

    async fn update(&self, telegram_id: &str, fields: UserFields) -> ResultEngine<Option<User>> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::Name, Expr::value(fields.name))
            .col_expr(users::Column::Role, Expr::value(fields.role.as_str()))
            .col_expr(users::Column::Active, Expr::value(fields.active))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::TelegramId.eq(telegram_id))
            .exec(&self.database)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find_user(telegram_id).await
    }

    async fn delete(&self, telegram_id: &str) -> ResultEngine<()> {
        let result = users::Entity::delete_by_id(telegram_id.to_string())
            .exec(&self.database)
            .await?;

        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("user".to_string()));
        }
        Ok(())
    }
}
