//! Fluent scenario builder
//!
//! A scenario is a name, a tag map, a request constructor and a list of
//! named checks. [`TestScenarioBuilder::build`] splits it into the static
//! [`ScenarioOptions`] and the per-iteration [`ScenarioRun`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::check::{CheckResult, IterationResult};
use super::http::{HttpClient, HttpRequest, HttpResponse};
use super::params::TestParameters;
use crate::common::{Error, Result};

type RequestFn = Arc<dyn Fn(&TestParameters) -> HttpRequest + Send + Sync>;
type CheckFn = Arc<dyn Fn(&HttpResponse) -> bool + Send + Sync>;

/// Name of the entry point every scenario exposes
const EXEC: &str = "run";

struct NamedCheck {
    name: String,
    predicate: CheckFn,
}

/// Builder for a single scenario
#[derive(Default)]
pub struct TestScenarioBuilder {
    name: Option<String>,
    tags: BTreeMap<String, String>,
    request: Option<RequestFn>,
    checks: Vec<NamedCheck>,
}

impl TestScenarioBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scenario name, unique among all loaded scenarios
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Tags attached to every check result of this scenario
    pub fn tags<I, K, V>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tags
            .extend(tags.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Request constructor, called once per iteration
    pub fn request<F>(mut self, request: F) -> Self
    where
        F: Fn(&TestParameters) -> HttpRequest + Send + Sync + 'static,
    {
        self.request = Some(Arc::new(request));
        self
    }

    /// Add a named check evaluated against every response
    pub fn check<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&HttpResponse) -> bool + Send + Sync + 'static,
    {
        self.checks.push(NamedCheck {
            name: name.into(),
            predicate: Arc::new(predicate),
        });
        self
    }

    pub fn build(self) -> Result<Scenario> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| Error::InvalidScenario("scenario name is required".to_string()))?;
        let request = self.request.ok_or_else(|| {
            Error::InvalidScenario(format!("scenario '{}' has no request function", name))
        })?;

        let options = ScenarioOptions {
            name: name.clone(),
            exec: EXEC.to_string(),
            tags: self.tags.clone(),
        };
        let run = ScenarioRun {
            name,
            tags: self.tags,
            request,
            checks: self.checks.into(),
        };

        Ok(Scenario { options, run })
    }
}

/// Static scenario metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioOptions {
    pub name: String,
    pub exec: String,
    pub tags: BTreeMap<String, String>,
}

/// Per-iteration entry point
///
/// Cheap to clone; every clone shares the same request and check closures.
#[derive(Clone)]
pub struct ScenarioRun {
    name: String,
    tags: BTreeMap<String, String>,
    request: RequestFn,
    checks: Arc<[NamedCheck]>,
}

impl fmt::Debug for ScenarioRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioRun")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field(
                "checks",
                &self.checks.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl ScenarioRun {
    /// Build the request this iteration would send
    pub fn request(&self, params: &TestParameters) -> HttpRequest {
        (self.request)(params)
    }

    /// Send one request and evaluate every check against the response
    ///
    /// Failed checks are recorded in the result and logged; they never
    /// abort the iteration.
    pub async fn run(&self, client: &dyn HttpClient, params: &TestParameters) -> IterationResult {
        let request = self.request(params);
        let response = client.send(&request).await;

        if let Some(error) = &response.error {
            tracing::warn!(scenario = %self.name, url = %request.url, %error, "Request failed");
        }

        let checks = self
            .checks
            .iter()
            .map(|check| {
                let passed = (check.predicate)(&response);
                if passed {
                    tracing::debug!(
                        scenario = %self.name,
                        tags = ?self.tags,
                        check = %check.name,
                        passed,
                        "check"
                    );
                } else {
                    tracing::warn!(
                        scenario = %self.name,
                        tags = ?self.tags,
                        check = %check.name,
                        status = response.status,
                        passed,
                        "check"
                    );
                }
                CheckResult {
                    name: check.name.clone(),
                    passed,
                }
            })
            .collect();

        IterationResult {
            scenario: self.name.clone(),
            url: request.url,
            status: response.status,
            checks,
        }
    }
}

/// A built scenario: options for the runner plus the `run` entry point
#[derive(Debug, Clone)]
pub struct Scenario {
    pub options: ScenarioOptions,
    pub run: ScenarioRun,
}

impl Scenario {
    pub fn name(&self) -> &str {
        &self.options.name
    }
}
