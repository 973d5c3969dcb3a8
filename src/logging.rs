use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::DiscoverConfig;

/// Install the global subscriber, writing to a daily log file when a log
/// directory is available and to stderr otherwise.
///
/// The returned guard flushes buffered lines on drop; keep it alive until exit.
pub fn init(config: &DiscoverConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)?,
    };

    let Some(dir) = config.log_dir() else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;
        return Ok(None);
    };

    std::fs::create_dir_all(&dir)?;
    let appender = tracing_appender::rolling::daily(&dir, "discover.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    Ok(Some(guard))
}
