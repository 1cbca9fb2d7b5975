use std::net::SocketAddr;
use std::sync::Arc;

use common::storage::FilesystemBlobStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use liveroom_server::ai::OpenAiClient;
use liveroom_server::config::AppConfig;
use liveroom_server::media::DbCourseMediaStore;
use liveroom_server::state::AppState;
use liveroom_server::{build_router, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sea_orm=warn")),
        )
        .init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database.url).await?;
    info!("Database schema synced");
    seed::ensure_indexes(&db).await?;

    let blobs = FilesystemBlobStore::new(
        config.storage.blob_dir.clone(),
        config.storage.max_media_bytes,
    )
    .await?;

    let ai = OpenAiClient::new(&config.ai)?;

    let state = AppState {
        media: Arc::new(DbCourseMediaStore::new(db.clone(), Arc::new(blobs))),
        ai: Arc::new(ai),
        db,
        config: config.clone(),
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("LiveRoom server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
