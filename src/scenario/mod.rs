//! Scenario harness
//!
//! The shared pieces every REST scenario is configured against: the fluent
//! builder, parameter bootstrap, HTTP client seam, response validators and
//! a runner that invokes scenarios for a number of virtual users.

mod builder;
mod check;
mod http;
mod params;
mod runner;

pub use builder::{Scenario, ScenarioOptions, ScenarioRun, TestScenarioBuilder};
pub use check::{is_valid_list_response, CheckResult, IterationResult};
pub use http::{HttpClient, HttpRequest, HttpResponse, Method, ReqwestClient};
pub use params::{
    setup_test_parameters, setup_test_parameters_with_base_url, TestParameters, BASE_URL,
};
pub use runner::{run_scenario, CheckTally, RunSettings, RunSummary};
