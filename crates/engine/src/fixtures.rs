//! Fixture backed store used when no database is attached.
//!
//! Reads serve a fixed data set, writes echo their input and persist
//! nothing.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::{
    Assignment, Month, MonthData, PendingUser, ResultEngine, Role, User, UserFields,
    store::{DatabaseStatus, MonthStore, PendingUserStore, Store, UserStore},
};

/// Telegram id of the only fixture user.
pub const FIXTURE_USER_ID: &str = "670669284";
/// Telegram id of the only fixture access request.
pub const FIXTURE_PENDING_USER_ID: &str = "123456789";

const DUTY_PERSON: &str = "Morozov V.A.";
const TECH_PERSON: &str = "Rebrakov T.V.";
const GENERAL_PERSON: &str = "Kostyrin S.S.";

#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStore;

fn fixture_user() -> User {
    User::new(
        FIXTURE_USER_ID,
        UserFields {
            name: "Administrator".to_string(),
            role: Role::Admin,
            active: true,
        },
    )
}

fn fixture_pending_user() -> PendingUser {
    PendingUser::new(FIXTURE_PENDING_USER_ID, "Test user", "testuser")
}

fn fixture_month(year_month: &str) -> Month {
    let mut data = MonthData::default();
    for day in 1..=31 {
        let day = day.to_string();
        data.duties.insert(day.clone(), DUTY_PERSON.to_string());
        data.tech_duties
            .insert(day.clone(), vec![Assignment::new(TECH_PERSON, "8")]);
        data.general_schedule
            .insert(day, vec![Assignment::new(GENERAL_PERSON, "DS")]);
    }
    data.colors = BTreeMap::from([
        (DUTY_PERSON.to_string(), "#FF6B6B".to_string()),
        (TECH_PERSON.to_string(), "#4ECDC4".to_string()),
        (GENERAL_PERSON.to_string(), "#45B7D1".to_string()),
    ]);

    Month::with_data(year_month, data)
}

#[async_trait]
impl UserStore for FixtureStore {
    async fn list(&self) -> ResultEngine<Vec<User>> {
        Ok(vec![fixture_user()])
    }

    async fn get(&self, telegram_id: &str) -> ResultEngine<Option<User>> {
        Ok((telegram_id == FIXTURE_USER_ID).then(fixture_user))
    }

    async fn create(&self, telegram_id: &str, fields: UserFields) -> ResultEngine<User> {
        Ok(User::new(telegram_id, fields))
    }

    async fn update(&self, telegram_id: &str, fields: UserFields) -> ResultEngine<Option<User>> {
        Ok(Some(User::new(telegram_id, fields)))
    }

    async fn delete(&self, _telegram_id: &str) -> ResultEngine<()> {
        Ok(())
    }
}

#[async_trait]
impl PendingUserStore for FixtureStore {
    async fn list(&self) -> ResultEngine<Vec<PendingUser>> {
        Ok(vec![fixture_pending_user()])
    }

    async fn get(&self, telegram_id: &str) -> ResultEngine<Option<PendingUser>> {
        Ok((telegram_id == FIXTURE_PENDING_USER_ID).then(fixture_pending_user))
    }

    async fn create(
        &self,
        telegram_id: &str,
        name: &str,
        username: &str,
    ) -> ResultEngine<PendingUser> {
        Ok(PendingUser::new(telegram_id, name, username))
    }

    async fn delete(&self, _telegram_id: &str) -> ResultEngine<()> {
        Ok(())
    }
}

#[async_trait]
impl MonthStore for FixtureStore {
    async fn get(&self, year_month: &str) -> ResultEngine<Month> {
        Ok(fixture_month(year_month))
    }

    async fn update(&self, _year_month: &str, _data: MonthData) -> ResultEngine<()> {
        Ok(())
    }
}

#[async_trait]
impl Store for FixtureStore {
    async fn database_status(&self) -> DatabaseStatus {
        DatabaseStatus::NotInitialized
    }
}
