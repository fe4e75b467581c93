//! CLI command definitions
//!
//! Defines the clap commands for the load-test CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// List loaded scenarios
    #[command(alias = "ls")]
    List,

    /// Print a scenario's options as JSON
    Options {
        /// Scenario name
        name: String,
    },

    /// Run scenarios against a REST API
    Run {
        /// Scenario to run (repeatable, default: all)
        #[arg(long = "scenario", short = 's')]
        scenarios: Vec<String>,

        /// Base URL of the REST API (overrides BASE_URL and the config file)
        #[arg(long)]
        base_url: Option<String>,

        /// Path prefix placed before each endpoint (default: /api/v1)
        #[arg(long)]
        url_prefix: Option<String>,

        /// Number of concurrent virtual users
        #[arg(long)]
        vus: Option<usize>,

        /// Iterations per virtual user
        #[arg(long, short = 'i')]
        iterations: Option<usize>,
    },
}

/// Global options shared by every command
#[derive(clap::Args)]
pub struct GlobalArgs {
    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output: debug logging and resolved parameters
    #[arg(long, short, global = true)]
    pub verbose: bool,
}
