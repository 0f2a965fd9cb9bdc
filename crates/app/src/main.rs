use migration::{Migrator, MigratorTrait};
use server::ServerOptions;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "duty_calendar={level},server={level},engine={level},migration={level},tower_http={level}",
            level = settings.log_level
        ))
        .init();

    let engine = match connect(&settings).await {
        Some(db) => {
            tracing::info!("serving data from the database");
            engine::Engine::builder().database(db).build()
        }
        None => engine::Engine::builder().fixtures().build(),
    };

    if settings.api_key.is_empty() {
        tracing::warn!("API_KEY is empty, protected routes will answer 500");
    }

    let addr = format!("{}:{}", settings.bind, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let options = ServerOptions {
        api_key: settings.api_key,
        allowed_origins: settings.allowed_origins,
    };

    server::run_with_listener(engine, options, listener).await?;
    Ok(())
}

/// Opens and migrates the database. Any failure leaves the server in
/// fixture mode instead of aborting startup.
async fn connect(settings: &settings::Settings) -> Option<sea_orm::DatabaseConnection> {
    if !settings.database.db_enabled {
        tracing::info!("database disabled by configuration");
        return None;
    }

    match parse_database(&settings.database.url()).await {
        Ok(db) => Some(db),
        Err(err) => {
            tracing::warn!("failed to initialize database, falling back to fixtures: {err}");
            None
        }
    }
}

async fn parse_database(
    url: &str,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
