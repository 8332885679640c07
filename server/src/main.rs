mod config;
mod db;
mod routes;
mod services;
mod state;

use config::{ConfigError, ServerConfig};
use services::identity::Provider;
use state::{AppState, Providers};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("{0}")]
    Leptos(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    if config.auth.uses_default_secret() {
        tracing::warn!("AUTH_SECRET not set; using the development secret");
    }

    let pool = db::init_pool(&config.auth.sqlite_path, config.db_max_connections).await?;
    tracing::info!(path = %config.auth.sqlite_path.display(), "auth database ready");

    let providers = Providers::from_config(&config.auth);
    if providers.get(Provider::Google).is_none() {
        tracing::warn!("GOOGLE_CLIENT_ID/GOOGLE_CLIENT_SECRET not set; Google sign-in disabled");
    }

    // Spawn background session sweeper.
    let _sweeper = services::session::spawn_session_sweeper(pool.clone(), config.session_sweep_secs);

    let port = config.port;
    let state = AppState::new(pool, config.auth, providers);
    let app = routes::leptos_app(state).map_err(StartupError::Leptos)?;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    tracing::info!(%port, "polylaunch listening");
    axum::serve(listener, app).await?;
    Ok(())
}
