//! CLI definition using clap

use clap::{Args, Parser, Subcommand};
use inspekt_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inspekt")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Vehicle inspection report from the local vehicle list and the fleet API")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Summary format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Also log to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build today's spreadsheet report
    Report {
        /// Columns to include besides rnr, space separated
        #[arg(long, short = 'k', num_args = 0..)]
        keys: Vec<String>,

        /// Fill rows by inspection urgency (default)
        #[arg(long, short = 'c', overrides_with = "no_colored")]
        colored: bool,

        /// Plain spreadsheet without fills
        #[arg(long, overrides_with = "colored")]
        no_colored: bool,

        /// Local vehicle list. Uses config value if not specified.
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,

        /// Directory for the spreadsheet. Uses config value if not specified.
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,

        /// Look up every label color again instead of remembering them
        #[arg(long)]
        no_cache: bool,
    },

    /// Write the merged and annotated vehicle data as JSON
    Merge {
        /// Local vehicle list. Uses config value if not specified.
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Look up every label color again instead of remembering them
        #[arg(long)]
        no_cache: bool,
    },

    /// Manage configuration
    Config(ConfigArgs),
}

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Show current configuration
    #[arg(long)]
    pub show: bool,

    /// Set fleet API base URL
    #[arg(long)]
    pub set_api_url: Option<String>,

    /// Set client id of the login call
    #[arg(long)]
    pub set_client_id: Option<String>,

    /// Set client secret of the login call
    #[arg(long)]
    pub set_client_secret: Option<String>,

    /// Set API username
    #[arg(long)]
    pub set_username: Option<String>,

    /// Set API password
    #[arg(long)]
    pub set_password: Option<String>,

    /// Set default local vehicle list
    #[arg(long)]
    pub set_input: Option<PathBuf>,

    /// Set default output directory
    #[arg(long)]
    pub set_output_dir: Option<PathBuf>,

    /// Enable/disable label color cache
    #[arg(long)]
    pub set_cache: Option<bool>,

    /// Set attempts per remote call
    #[arg(long)]
    pub set_max_tries: Option<u32>,

    /// Set time budget per remote call in seconds
    #[arg(long)]
    pub set_max_elapsed: Option<u64>,

    /// Set log file
    #[arg(long)]
    pub set_log_file: Option<PathBuf>,

    /// Set log level (e.g. info, debug)
    #[arg(long)]
    pub set_log_level: Option<String>,

    /// Set default summary format
    #[arg(long)]
    pub set_output: Option<OutputFormat>,

    /// Reset to defaults
    #[arg(long)]
    pub reset: bool,
}
