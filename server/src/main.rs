//! Trivia API server.
//!
//! Run from repo root: `cargo run -p trivia-server`
//! Settings come from the environment (or `.env`); `TRIVIA_STORE=memory` runs without a database.

use std::sync::Arc;
use tokio::net::TcpListener;
use trivia_api::{
    app, ensure_database_exists, ensure_tables, seed_categories, AppState, MemoryStore, PgStore, Settings, StoreKind,
    TriviaStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trivia_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let store: Arc<dyn TriviaStore> = match settings.store {
        StoreKind::Postgres => {
            ensure_database_exists(&settings.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.db_max_connections)
                .connect(&settings.database_url)
                .await?;
            ensure_tables(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };
    if settings.seed_categories {
        seed_categories(store.as_ref()).await?;
    } else if settings.store == StoreKind::Memory {
        tracing::warn!("memory store started without categories; new questions will be rejected");
    }

    let state = AppState::new(store, &settings);
    let router = app(state, &settings)?;
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("trivia api listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
