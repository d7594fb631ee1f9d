use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum::Router;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::character::{repo::seaorm::SeaOrmCharacterStore, CharacterService};
use service::image::{credentials::Credentials, GcsObjectStorage, ImageConfig, ImageService};
use service::runtime;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `config.toml` when present and valid, otherwise environment variables only.
pub fn load_config() -> Result<AppConfig, StartupError> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(error = %e, "config file unusable, falling back to environment");
            AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
        }
    }
}

pub fn image_config(cfg: &configs::StorageConfig) -> ImageConfig {
    ImageConfig {
        bucket: cfg.bucket.clone(),
        public_url_template: cfg.public_url_template.clone(),
        delete_prefix: cfg.delete_prefix.clone(),
        staging_dir: PathBuf::from(&cfg.staging_dir),
        content_type: cfg.content_type.clone(),
    }
}

fn bind_addr(cfg: &configs::ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!(service = "server", event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Public entry: load configuration and run the HTTP server until Ctrl+C
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = load_config()?;
    run_with_config(cfg).await
}

pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_staging_dir(&cfg.storage.staging_dir).await?;
    // 缺少凭证不阻止启动，图片接口会在调用时返回失败
    runtime::check_credentials_file(&cfg.storage.credentials_path).await;

    // DB connection + schema
    let db = models::db::connect_with_config(&models::db::DatabaseConfig::from(&cfg.database))
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    Migrator::up(&db, None).await.map_err(|e| StartupError::Migration(e.to_string()))?;

    let characters = CharacterService::new(Arc::new(SeaOrmCharacterStore { db }));
    let storage = GcsObjectStorage::new(
        Credentials::File(PathBuf::from(&cfg.storage.credentials_path)),
        cfg.storage.bucket.clone(),
        cfg.storage.api_base.clone(),
    );
    let images = ImageService::new(Arc::new(storage), image_config(&cfg.storage));
    let state = ServerState::new(characters, images);

    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(service = "server", event = "listening", %addr, bucket = %cfg.storage.bucket, "character api listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
