//! REST load-test CLI
//!
//! Runs mirror node REST API scenarios and reports their checks.

use clap::Parser;
use rest_loadtest::commands::{Commands, GlobalArgs};
use rest_loadtest::{cli, common::logging};

#[derive(Parser)]
#[command(name = "loadtest", about = "Load-test scenarios for the mirror node REST API")]
#[command(version, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_cli(cli.global.verbose);

    match cli::dispatch(cli.command, &cli.global).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
