use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use teachteam::config::AppConfig;
use teachteam::error::AppError;
use teachteam::storage::DirectoryStore;
use teachteam::telemetry;
use teachteam::workflows::intake::seed_demo_user;
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load configuration, install tracing, and open the data directory.
///
/// One-shot CLI commands log at `warn` unless `RUST_LOG` says otherwise so their stdout stays
/// readable.
pub(crate) fn bootstrap(quiet: bool) -> Result<(AppConfig, Arc<DirectoryStore>), AppError> {
    let mut config = AppConfig::load()?;
    if quiet {
        config.telemetry.log_level = "warn".to_string();
    }
    telemetry::init(&config.telemetry)?;

    let storage = Arc::new(DirectoryStore::new(config.storage.data_dir.clone()));
    if seed_demo_user(storage.as_ref())? {
        debug!(data_dir = %storage.root().display(), "initialised data directory");
    }
    Ok((config, storage))
}
