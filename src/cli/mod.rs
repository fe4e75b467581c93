//! CLI command handling
//!
//! Resolves configuration, loads scenarios and formats output.

use std::sync::Arc;

use colored::Colorize;

use crate::commands::{Commands, GlobalArgs};
use crate::common::{Config, Error, Result};
use crate::rest;
use crate::scenario::{
    run_scenario, setup_test_parameters, setup_test_parameters_with_base_url, HttpClient,
    ReqwestClient, RunSettings, RunSummary,
};

/// Dispatch a CLI command
///
/// Returns `Ok(false)` when a run finished with failed checks.
pub async fn dispatch(command: Commands, global: &GlobalArgs) -> Result<bool> {
    let mut config = match global.config.as_deref() {
        Some(path) => Config::from_path(path)?,
        None => Config::load()?,
    };

    match command {
        Commands::List => {
            for scenario in rest::all(&config)? {
                let tags = scenario
                    .options
                    .tags
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("{}  {}", scenario.name().white().bold(), tags.dimmed());
            }
            Ok(true)
        }

        Commands::Options { name } => {
            println!("{}", options_json(&config, &name)?);
            Ok(true)
        }

        Commands::Run {
            scenarios,
            base_url,
            url_prefix,
            vus,
            iterations,
        } => {
            if let Some(url_prefix) = url_prefix {
                config.url_prefix = url_prefix;
            }
            if let Some(vus) = vus {
                config.run.vus = vus;
            }
            if let Some(iterations) = iterations {
                config.run.iterations = iterations;
            }
            config.validate()?;

            let selected = rest::select(rest::all(&config)?, &scenarios)?;

            let params = match base_url {
                Some(url) => setup_test_parameters_with_base_url(&config, url)?,
                None => setup_test_parameters(&config)?,
            };
            if global.verbose {
                for (key, value) in params.iter() {
                    println!("  {} = {}", key.dimmed(), value);
                }
            }
            let params = Arc::new(params);

            let client: Arc<dyn HttpClient> = Arc::new(ReqwestClient::new(&config.http)?);
            let settings = RunSettings::from(&config.run);

            let mut all_passed = true;
            for scenario in &selected {
                println!(
                    "\n{} {}",
                    "Running Scenario:".blue().bold(),
                    scenario.name().white().bold()
                );
                let summary =
                    run_scenario(scenario, Arc::clone(&client), Arc::clone(&params), settings)
                        .await;
                print_summary(&summary);
                all_passed &= summary.passed();
            }

            Ok(all_passed)
        }
    }
}

/// Pretty-printed JSON options of the named scenario
pub fn options_json(config: &Config, name: &str) -> Result<String> {
    let scenarios = rest::select(rest::all(config)?, &[name.to_string()])?;
    let options = scenarios
        .first()
        .map(|scenario| &scenario.options)
        .ok_or_else(|| Error::scenario_not_found(name, &[] as &[&str]))?;
    Ok(serde_json::to_string_pretty(options)?)
}

fn print_summary(summary: &RunSummary) {
    for (name, tally) in &summary.per_check {
        let total = tally.passed + tally.failed;
        if tally.failed == 0 {
            println!("  {} {} ({}/{})", "✓".green(), name, tally.passed, total);
        } else {
            println!(
                "  {} {} ({}/{} passed)",
                "✗".red(),
                name,
                tally.passed,
                total
            );
        }
    }

    if summary.transport_failures > 0 {
        println!(
            "  {} {} request(s) failed before a response arrived",
            "!".yellow(),
            summary.transport_failures
        );
    }

    if summary.aborted_vus > 0 {
        println!(
            "  {} {} virtual user(s) aborted",
            "✗".red(),
            summary.aborted_vus
        );
    }

    if summary.passed() {
        println!(
            "\n{} {} iteration(s), all checks passed\n",
            "✓".green().bold(),
            summary.iterations
        );
    } else if summary.iterations == 0 {
        println!("\n{} no iterations ran\n", "✗".red().bold());
    } else {
        println!(
            "\n{} {} iteration(s), {} check(s) failed\n",
            "✗".red().bold(),
            summary.iterations,
            summary.checks_failed
        );
    }
}
