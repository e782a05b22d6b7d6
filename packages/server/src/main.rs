use tracing::{Level, info};

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = server::database::init_db(&config.database.url).await?;
    server::seed::ensure_indexes(&db).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = server::build_router(AppState { db, config });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Verification service listening at http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
