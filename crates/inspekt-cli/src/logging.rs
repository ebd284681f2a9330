//! Log subscriber setup
//!
//! Every run appends to the configured log file. `--verbose` mirrors
//! the same events to stderr.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use inspekt_app::config::Config;
use inspekt_types::{Error, Result};

pub fn init(config: &Config, verbose: bool) -> Result<()> {
    let filter = mk_filter(&config.log_level)?;

    let file_layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = verbose.then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

/// `RUST_LOG` wins over the configured level
fn mk_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|_| Error::Logging(format!("invalid log level: {}", level)))
}
