//! Comments server: reads settings from env (and `.env`), prepares the store, serves the router.

use comments_api::{
    app_router, ensure_comments_table, ensure_database_exists, AppState, CommentStore, MemoryCommentStore,
    PgCommentStore, Settings,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("comments_api=info".parse()?))
        .init();

    let settings = Settings::from_env()?;
    let store: Arc<dyn CommentStore> = match settings.database_url.as_deref() {
        Some(database_url) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.db_max_connections)
                .connect(database_url)
                .await?;
            ensure_comments_table(&pool, &settings.schema).await?;
            tracing::info!(schema = %settings.schema, "using postgres comment store");
            Arc::new(PgCommentStore::new(pool, &settings.schema))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; comments are kept in memory");
            Arc::new(MemoryCommentStore::new())
        }
    };

    let state = AppState::new(store, settings.resource());
    let app = app_router(state);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
