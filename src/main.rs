use std::sync::Arc;

use tracing::{error, info};

use smb_explorer::share::{SessionRegistry, SqliteShareStore};
use smb_explorer::tree::SqliteEntryStore;
use smb_explorer::web::middleware::AccessTokens;
use smb_explorer::web::{AppState, WebServer};
use smb_explorer::{seed, Config, ContentStorage, Database, ShareService, VirtualTree};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = smb_explorer::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        smb_explorer::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = run(config).await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> smb_explorer::Result<()> {
    config.validate()?;
    info!("SMB Explorer starting");

    let db = Database::open(&config.database.path, config.database.max_connections).await?;
    info!("Database opened at {}", config.database.path);

    let shares = Arc::new(SqliteShareStore::new(db.pool().clone()));
    let entries = Arc::new(SqliteEntryStore::new(db.pool().clone()));
    let share_service = ShareService::new(
        shares.clone(),
        entries.clone(),
        Arc::new(SessionRegistry::new()),
    );
    let tree = VirtualTree::new(shares, entries.clone());

    let content = ContentStorage::open(&config.files.storage_path).await?;
    info!("Content storage at {}", content.base_path().display());

    if config.seed.enabled {
        seed::run(&share_service, entries.as_ref()).await;
    }

    let connected = share_service.auto_connect_all().await?;
    info!("Auto-connected {} share(s)", connected);

    let tokens = AccessTokens::new(&config.web.admin_token, &config.web.manager_token);
    let state = AppState::new(tree, share_service, content)
        .with_max_upload_size(config.files.max_upload_bytes())
        .with_tokens(tokens);

    let server = WebServer::new(&config.web, state)?;
    info!("Web API on http://{}", server.addr());
    server.run().await
}
