mod cycle_profile;
mod notification;
mod reminder;
mod scheduled_job;
mod shared;
mod user;

use cycle_profile::{InMemoryCycleProfileRepo, PostgresCycleProfileRepo};
use notification::{InMemoryNotificationRepo, PostgresNotificationRepo};
use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
use scheduled_job::{InMemoryScheduledJobRepo, PostgresScheduledJobRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use user::{InMemoryUserRepo, PostgresUserRepo};

pub use cycle_profile::ICycleProfileRepo;
pub use notification::INotificationRepo;
pub use reminder::IReminderRepo;
pub use scheduled_job::IScheduledJobRepo;
pub use shared::repo::DeleteResult;
pub use user::IUserRepo;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub scheduled_jobs: Arc<dyn IScheduledJobRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
    pub cycle_profiles: Arc<dyn ICycleProfileRepo>,
    pub users: Arc<dyn IUserRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            scheduled_jobs: Arc::new(PostgresScheduledJobRepo::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepo::new(pool.clone())),
            cycle_profiles: Arc::new(PostgresCycleProfileRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            scheduled_jobs: Arc::new(InMemoryScheduledJobRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
            cycle_profiles: Arc::new(InMemoryCycleProfileRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
        }
    }
}
