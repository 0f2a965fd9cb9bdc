use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveValue, prelude::*, sea_query::OnConflict};

use crate::{Month, MonthData, ResultEngine, months, store::MonthStore};

use super::DatabaseStore;

#[async_trait]
impl MonthStore for DatabaseStore {
    async fn get(&self, year_month: &str) -> ResultEngine<Month> {
        let Some(model) = months::Entity::find_by_id(year_month.to_string())
            .one(&self.database)
            .await?
        else {
            return Ok(Month::empty(year_month));
        };

        match Month::try_from(model) {
            Ok(month) => Ok(month),
            Err(err) => {
                tracing::warn!("month {year_month} has unreadable data, serving it empty: {err}");
                Ok(Month::empty(year_month))
            }
        }
    }

    async fn update(&self, year_month: &str, data: MonthData) -> ResultEngine<()> {
        let now = Utc::now();
        let model = months::ActiveModel {
            id: ActiveValue::Set(year_month.to_string()),
            duties: ActiveValue::Set(serde_json::to_value(&data.duties)?),
            tech_duties: ActiveValue::Set(serde_json::to_value(&data.tech_duties)?),
            general_schedule: ActiveValue::Set(serde_json::to_value(&data.general_schedule)?),
            colors: ActiveValue::Set(serde_json::to_value(&data.colors)?),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        months::Entity::insert(model)
            .on_conflict(
                OnConflict::column(months::Column::Id)
                    .update_columns([
                        months::Column::Duties,
                        months::Column::TechDuties,
                        months::Column::GeneralSchedule,
                        months::Column::Colors,
                        months::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.database)
            .await?;

        Ok(())
    }
}
