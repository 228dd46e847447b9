use std::path::PathBuf;

use color_eyre::eyre::Result;
use lazy_static::lazy_static;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{self, layer::SubscriberExt, util::SubscriberInitExt};

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

fn project_directory() -> Option<PathBuf> {
    dirs_next::data_dir().map(|data_dir| data_dir.join(env!("CARGO_CRATE_NAME")))
}

pub fn get_log_dir() -> PathBuf {
    match project_directory() {
        Some(p) => p,
        None => PathBuf::from(".").join(".data"),
    }
}

/// File-based tracing subscriber for binaries embedding the prompt; the
/// library itself only emits events.  Level defaults to `info` and can be
/// overridden through `RUST_LOG` or `BEAK_LOGLEVEL`.
pub fn initialize_logging(log_to: &Option<PathBuf>) -> Result<()> {
    let log_path = match log_to {
        Some(p) => p.clone(),
        None => {
            let directory = get_log_dir();
            std::fs::create_dir_all(directory.clone())?;
            directory.join(LOG_FILE.clone())
        }
    };

    let log_file = std::fs::File::create(log_path)?;
    let directive = std::env::var("RUST_LOG")
        .or_else(|_| std::env::var(LOG_ENV.clone()))
        .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")));
    let env_filter = tracing_subscriber::filter::EnvFilter::try_new(directive)?;

    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false);
    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .with(env_filter)
        .init();

    info!("logging initialised");
    Ok(())
}
