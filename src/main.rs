use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use parking_lot::RwLock;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use signcopy::application::{ImageService, ServicePorts};
use signcopy::infrastructure::{
    AppConfig, CliArgs, ConfigFile, ConfigPermissionOracle, DiskImageVault, FileWorld, StateStore,
    SystemClock,
};
use signcopy::presentation::execute;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let file = ConfigFile::resolve(args.config.as_deref())?;
    let mut config = file.load()?;
    config.merge_with_args(args);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(version = signcopy::VERSION, command = ?args.command, "Starting signcopy");

    let data_dir = config
        .effective_data_dir()
        .ok_or_else(|| eyre!("could not determine data directory"))?;
    let world_path = config
        .effective_world_path()
        .ok_or_else(|| eyre!("could not determine world manifest path"))?;

    let state = StateStore::new(&data_dir);
    let store = state.load().await.wrap_err("Failed to load saved images")?;

    let world = Arc::new(FileWorld::load(&world_path).await?);
    let vault = Arc::new(DiskImageVault::new(data_dir.join("SignCopy")).await?);

    let service = ImageService::new(
        Arc::new(RwLock::new(store)),
        ServicePorts {
            locator: world.clone(),
            textures: world,
            vault,
            permissions: Arc::new(ConfigPermissionOracle::new(&config.permissions)),
            clock: Arc::new(SystemClock),
        },
        config.canvas_table(),
        config.image_settings(),
    );

    let output = execute(&service, &args.command, Utc::now()).await;

    if output.persist {
        state.save(&service.snapshot()).await.map_err(|e| {
            error!(error = %e, "Failed to persist saved images");
            e
        })?;
    }

    if !output.message.is_empty() {
        println!("{}", output.message);
    }
    if output.failed {
        std::process::exit(1);
    }
    Ok(())
}
