use tracing::info;
use tracing_subscriber::EnvFilter;

use super::config::GameConfig;
use super::gameplay::HuntSession;
use super::loop_runner::AppError;

pub(crate) struct AppWiring {
    pub(crate) session: HuntSession,
}

pub(crate) fn build_app() -> Result<AppWiring, AppError> {
    init_tracing();
    info!("=== Actor Hunt Startup ===");

    let config = GameConfig::from_env()?;
    info!(
        width = config.world_width,
        height = config.world_height,
        damaging = config.damaging_count,
        healing = config.healing_count,
        "config_loaded"
    );
    let session = HuntSession::new(&config)?;

    Ok(AppWiring { session })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
