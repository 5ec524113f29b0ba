//! Logger setup. The UI owns the terminal, so records go to a file.

use std::error::Error;
use std::fs::OpenOptions;

use crate::config::Config;

/// Install `env_logger` writing to `config.log_file`, truncated on start.
/// `RUST_LOG` overrides `config.log_filter`.
pub fn init(config: &Config) -> Result<(), Box<dyn Error>> {
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.log_file)
        .map_err(|e| format!("cannot open log file {}: {e}", config.log_file.display()))?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .format_timestamp_micros()
    .target(env_logger::Target::Pipe(Box::new(log_file)))
    .try_init()?;
    Ok(())
}
