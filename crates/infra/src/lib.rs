mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::{
    DeleteResult, ICycleProfileRepo, INotificationRepo, IReminderRepo, IScheduledJobRepo,
    IUserRepo, Repos,
};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct HelsaContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub push_gateway: Arc<dyn IPushGateway>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl HelsaContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let push_gateway = Arc::new(HttpPushGateway::new(&config));
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            push_gateway,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> HelsaContext {
    HelsaContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

/// Context backed by inmemory repos and a recording push gateway,
/// used when testing
pub fn setup_context_inmemory() -> HelsaContext {
    HelsaContext {
        repos: Repos::create_inmemory(),
        config: Config::new(),
        sys: Arc::new(RealSys {}),
        push_gateway: Arc::new(InMemoryPushGateway::new()),
    }
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
