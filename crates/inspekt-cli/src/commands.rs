//! Command handlers

use std::path::{Path, PathBuf};

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use inspekt_app::app::{requested_columns, ReportOptions, ReportService};
use inspekt_app::config::Config;
use inspekt_app::repository::open_fleet_client;
use inspekt_domain::service::{ColorCache, LabelStore};
use inspekt_types::{OutputFormat, Result};

use crate::cli::{Cli, Commands, ConfigArgs};
use crate::logging;
use crate::output::{output_merge, output_report};

pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Config(args) => cmd_config(args),
        Commands::Report {
            keys,
            colored,
            no_colored,
            input,
            output_dir,
            no_cache,
        } => {
            let config = start(cli.verbose)?;
            let output_format = cli.format.unwrap_or(config.output_format);
            let colorize = colorize(colored, no_colored);
            info!(
                "report keys={:?} colored={} input={:?} output_dir={:?} no_cache={}",
                keys,
                colorize,
                input,
                output_dir,
                no_cache
            );
            cmd_report(
                &config,
                &keys,
                colorize,
                input,
                output_dir,
                no_cache,
                output_format,
            )
            .map_err(log_failure)
        }
        Commands::Merge {
            input,
            output,
            no_cache,
        } => {
            let config = start(cli.verbose)?;
            info!("merge input={:?} output={:?} no_cache={}", input, output, no_cache);
            cmd_merge(&config, input, output.as_deref(), no_cache).map_err(log_failure)
        }
    }
}

/// Reports are colored unless `--no-colored` was the last color flag
fn colorize(colored: bool, no_colored: bool) -> bool {
    colored || !no_colored
}

/// Load configuration and install the log subscriber
fn start(verbose: bool) -> Result<Config> {
    let config = Config::load()?;
    logging::init(&config, verbose)?;
    info!("config file {}", Config::config_path()?.display());
    Ok(config)
}

fn log_failure(e: inspekt_types::Error) -> inspekt_types::Error {
    error!("run failed: {}", e);
    e
}

fn label_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message("label colors");
    pb
}

fn cmd_report(
    config: &Config,
    keys: &[String],
    colorize: bool,
    input: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    no_cache: bool,
    output_format: OutputFormat,
) -> Result<()> {
    let input = input.unwrap_or_else(|| config.input_file.clone());
    let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
    std::fs::create_dir_all(&output_dir)?;

    let client = open_fleet_client(config)?;
    let colors = ColorCache::new(&client, LabelStore::new(config.cache_labels && !no_cache));

    let pb = label_progress_bar();
    let progress = |done: usize, total: usize| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    };

    let options = ReportOptions::new(input, Local::now().date_naive())
        .with_output_dir(output_dir)
        .with_extra_columns(keys)
        .with_colorize(colorize);

    let mut service = ReportService::new(&client, colors).with_progress(&progress);
    let report = service.generate(&options);
    pb.finish_and_clear();
    let report = report?;

    info!(
        "{} label colors cached",
        service.colors().cached_labels()
    );
    output_report(output_format, &report)
}

fn cmd_merge(
    config: &Config,
    input: Option<PathBuf>,
    output: Option<&Path>,
    no_cache: bool,
) -> Result<()> {
    let input = input.unwrap_or_else(|| config.input_file.clone());

    let client = open_fleet_client(config)?;
    let colors = ColorCache::new(&client, LabelStore::new(config.cache_labels && !no_cache));

    let pb = label_progress_bar();
    let progress = |done: usize, total: usize| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    };

    let mut service = ReportService::new(&client, colors).with_progress(&progress);
    let dataset = service.prepare(&input, &requested_columns(&[]));
    pb.finish_and_clear();
    let dataset = dataset?;

    output_merge(&dataset, output)
}

fn cmd_config(args: ConfigArgs) -> Result<()> {
    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(url) = args.set_api_url {
        config.api_base_url = url;
        modified = true;
    }

    if let Some(client_id) = args.set_client_id {
        config.client_id = client_id;
        modified = true;
    }

    if let Some(secret) = args.set_client_secret {
        config.client_secret = secret;
        modified = true;
    }

    if let Some(username) = args.set_username {
        config.username = username;
        modified = true;
    }

    if let Some(password) = args.set_password {
        config.password = password;
        modified = true;
    }

    if let Some(input) = args.set_input {
        config.input_file = input;
        modified = true;
    }

    if let Some(dir) = args.set_output_dir {
        config.output_dir = dir;
        modified = true;
    }

    if let Some(enabled) = args.set_cache {
        config.cache_labels = enabled;
        modified = true;
    }

    if let Some(tries) = args.set_max_tries {
        config.max_tries = tries;
        modified = true;
    }

    if let Some(secs) = args.set_max_elapsed {
        config.max_elapsed_secs = secs;
        modified = true;
    }

    if let Some(path) = args.set_log_file {
        config.log_file = Some(path);
        modified = true;
    }

    if let Some(level) = args.set_log_level {
        config.log_level = level;
        modified = true;
    }

    if let Some(output_format) = args.set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if args.show || !modified {
        println!("Config file: {}", Config::config_path()?.display());
        println!("\n{}", config);
    }

    Ok(())
}
