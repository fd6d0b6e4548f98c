use crate::app::error::Result;
use std::path::{Path, PathBuf};
use tracing_appender::rolling;
use tracing_subscriber::{self, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable overriding the log directory
pub const LOG_DIR_ENV: &str = "CONVLIST_LOG_DIR";

pub fn init() -> Result<()> {
    let log_dir = get_log_directory();

    #[cfg(debug_assertions)]
    {
        init_debug_tracing(&log_dir)
    }
    #[cfg(not(debug_assertions))]
    {
        init_release_tracing(&log_dir)
    }
}

fn get_log_directory() -> PathBuf {
    if let Ok(dir) = std::env::var(LOG_DIR_ENV) {
        PathBuf::from(dir)
    } else if let Some(home) = dirs::home_dir() {
        home.join(".convlist").join("logs")
    } else {
        std::env::temp_dir().join("convlist")
    }
}

#[cfg(debug_assertions)]
fn init_debug_tracing(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let log_file = rolling::daily(log_dir, "convlist-debug.log");
    let (non_blocking_log_file, guard) = tracing_appender::non_blocking(log_file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_log_file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("convlist=debug")),
        );

    tracing_subscriber::registry().with(file_layer).try_init()?;

    // Keep the writer alive for the life of the process
    std::mem::forget(guard);

    tracing::info!("Debug tracing initialized, logging to: {}", log_dir.display());
    Ok(())
}

#[cfg(not(debug_assertions))]
fn init_release_tracing(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let log_file = rolling::daily(log_dir, "convlist.log");
    let (non_blocking_log_file, guard) = tracing_appender::non_blocking(log_file);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_log_file)
        .with_ansi(false)
        .with_target(false)
        .compact()
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("convlist=info")),
        );

    tracing_subscriber::registry().with(file_layer).try_init()?;

    std::mem::forget(guard);

    tracing::info!("Release tracing initialized, logging to: {}", log_dir.display());
    Ok(())
}
