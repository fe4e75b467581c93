//! Scenario runner
//!
//! Invokes a scenario's `run` for a fixed number of virtual users, each
//! doing a fixed number of iterations, and counts check outcomes. Virtual
//! users share nothing mutable: each owns a clone of the run handle and
//! reports its results over a channel.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::future::join_all;
use serde::Serialize;
use tokio::sync::mpsc;

use super::builder::Scenario;
use super::check::IterationResult;
use super::http::HttpClient;
use super::params::TestParameters;
use crate::common::config::RunConfig;

/// How many virtual users run and how often each invokes `run`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    pub vus: usize,
    pub iterations: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            vus: 1,
            iterations: 1,
        }
    }
}

impl From<&RunConfig> for RunSettings {
    fn from(config: &RunConfig) -> Self {
        Self {
            vus: config.vus,
            iterations: config.iterations,
        }
    }
}

/// Pass/fail counts for one named check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckTally {
    pub passed: usize,
    pub failed: usize,
}

/// Counts collected over a whole run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub scenario: String,
    pub iterations: usize,
    /// Iterations whose request never got a status
    pub transport_failures: usize,
    pub checks_passed: usize,
    pub checks_failed: usize,
    pub per_check: BTreeMap<String, CheckTally>,
    /// Virtual users whose task panicked before finishing
    pub aborted_vus: usize,
}

impl RunSummary {
    fn new(scenario: &str) -> Self {
        Self {
            scenario: scenario.to_string(),
            ..Self::default()
        }
    }

    fn record(&mut self, result: &IterationResult) {
        self.iterations += 1;
        if result.status == 0 {
            self.transport_failures += 1;
        }
        for check in &result.checks {
            let tally = self.per_check.entry(check.name.clone()).or_default();
            if check.passed {
                tally.passed += 1;
                self.checks_passed += 1;
            } else {
                tally.failed += 1;
                self.checks_failed += 1;
            }
        }
    }

    /// True when at least one iteration ran, no check failed and every
    /// virtual user finished
    pub fn passed(&self) -> bool {
        self.iterations > 0 && self.checks_failed == 0 && self.aborted_vus == 0
    }
}

/// Run a scenario to completion and summarize its checks
///
/// `params` is the result of the one-time setup and is shared read-only.
pub async fn run_scenario(
    scenario: &Scenario,
    client: Arc<dyn HttpClient>,
    params: Arc<TestParameters>,
    settings: RunSettings,
) -> RunSummary {
    tracing::info!(
        scenario = %scenario.name(),
        vus = settings.vus,
        iterations = settings.iterations,
        "Starting scenario"
    );

    let (tx, mut rx) = mpsc::unbounded_channel::<IterationResult>();

    let handles: Vec<_> = (0..settings.vus)
        .map(|vu| {
            let run = scenario.run.clone();
            let client = Arc::clone(&client);
            let params = Arc::clone(&params);
            let tx = tx.clone();
            let iterations = settings.iterations;
            tokio::spawn(async move {
                for iteration in 0..iterations {
                    let result = run.run(client.as_ref(), &params).await;
                    tracing::trace!(vu, iteration, passed = result.passed(), "Iteration done");
                    if tx.send(result).is_err() {
                        break;
                    }
                }
            })
        })
        .collect();
    drop(tx);

    let mut summary = RunSummary::new(scenario.name());
    while let Some(result) = rx.recv().await {
        summary.record(&result);
    }

    for joined in join_all(handles).await {
        if let Err(e) = joined {
            tracing::error!(scenario = %scenario.name(), error = %e, "Virtual user aborted");
            summary.aborted_vus += 1;
        }
    }

    tracing::info!(
        scenario = %summary.scenario,
        iterations = summary.iterations,
        checks_passed = summary.checks_passed,
        checks_failed = summary.checks_failed,
        aborted_vus = summary.aborted_vus,
        "Scenario finished"
    );

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{HttpRequest, HttpResponse, TestScenarioBuilder};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails every third request
    struct FlakyClient {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HttpClient for FlakyClient {
        async fn send(&self, _request: &HttpRequest) -> HttpResponse {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n % 3 == 2 {
                HttpResponse::transport_error("timeout")
            } else {
                HttpResponse {
                    status: 200,
                    ..HttpResponse::default()
                }
            }
        }
    }

    fn scenario() -> Scenario {
        TestScenarioBuilder::new()
            .name("flaky")
            .request(|p| HttpRequest::get(p.base_url()))
            .check("ok", |r| r.status == 200)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_counts_every_iteration() {
        let client = Arc::new(FlakyClient {
            calls: AtomicUsize::new(0),
        });
        let params = Arc::new(TestParameters::from_iter([("BASE_URL", "http://h")]));

        let summary = run_scenario(
            &scenario(),
            client.clone(),
            params,
            RunSettings {
                vus: 3,
                iterations: 4,
            },
        )
        .await;

        assert_eq!(summary.iterations, 12);
        assert_eq!(client.calls.load(Ordering::SeqCst), 12);
        assert_eq!(summary.checks_passed, 8);
        assert_eq!(summary.checks_failed, 4);
        assert_eq!(summary.transport_failures, 4);
        assert_eq!(
            summary.per_check["ok"],
            CheckTally {
                passed: 8,
                failed: 4
            }
        );
        assert!(!summary.passed());
    }

    #[tokio::test]
    async fn test_empty_run_does_not_pass() {
        for settings in [
            RunSettings {
                vus: 0,
                iterations: 5,
            },
            RunSettings {
                vus: 4,
                iterations: 0,
            },
        ] {
            let client = Arc::new(FlakyClient {
                calls: AtomicUsize::new(0),
            });
            let summary = run_scenario(
                &scenario(),
                client.clone(),
                Arc::new(TestParameters::default()),
                settings,
            )
            .await;

            assert_eq!(summary.iterations, 0);
            assert_eq!(client.calls.load(Ordering::SeqCst), 0);
            assert!(!summary.passed());
        }
    }

    /// Panics on the second request
    struct PanickingClient {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl HttpClient for PanickingClient {
        async fn send(&self, _request: &HttpRequest) -> HttpResponse {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 1 {
                panic!("client blew up");
            }
            HttpResponse {
                status: 200,
                ..HttpResponse::default()
            }
        }
    }

    #[tokio::test]
    async fn test_aborted_virtual_user_fails_run() {
        let client = Arc::new(PanickingClient {
            calls: AtomicUsize::new(0),
        });

        let summary = run_scenario(
            &scenario(),
            client,
            Arc::new(TestParameters::from_iter([("BASE_URL", "http://h")])),
            RunSettings {
                vus: 1,
                iterations: 3,
            },
        )
        .await;

        assert_eq!(summary.iterations, 1);
        assert_eq!(summary.checks_failed, 0);
        assert_eq!(summary.aborted_vus, 1);
        assert!(!summary.passed());
    }

    #[test]
    fn test_settings_from_config() {
        let settings = RunSettings::from(&RunConfig {
            vus: 2,
            iterations: 7,
        });
        assert_eq!(
            settings,
            RunSettings {
                vus: 2,
                iterations: 7
            }
        );
    }
}
