pub mod args;
pub mod config;

pub use args::AppArgs;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::compose::ComposeBox;
use crate::logging::{LogBuffer, TuiLogCollector};
use crate::ui::run_tui;

const LOG_CAPACITY: usize = 10_000;

pub async fn launch() -> Result<()> {
    launch_with_args(AppArgs::from_cli()).await
}

pub async fn launch_with_args(args: AppArgs) -> Result<()> {
    let settings = config::load_settings(&args)?;
    let directory = config::load_directory(args.candidates.as_deref())?;

    let log_buffer = Arc::new(LogBuffer::new(LOG_CAPACITY));
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!("warn,chat_typeahead={}", args.log_level))
            .with_context(|| format!("Invalid log level {:?}", args.log_level))?,
    };
    if let Err(e) = TuiLogCollector::init_subscriber(log_buffer.clone(), filter) {
        debug!("Failed to initialize log collector: {}", e);
    }

    info!(
        "Loaded {} users, {} streams, {} emoji",
        directory.users.len(),
        directory.streams.len(),
        directory.emoji.len()
    );

    let compose = ComposeBox::new(Arc::new(directory), settings, args.stream_delay());
    run_tui(compose, log_buffer).await
}
