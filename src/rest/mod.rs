//! Mirror node REST API scenarios
//!
//! Each submodule defines one scenario. [`all`] loads every scenario and
//! rejects duplicate names, since names key the collected check results.

pub mod constants;
pub mod tokens_non_fungible_unique;

use std::collections::HashSet;

use crate::common::{Config, Error, Result};
use crate::scenario::Scenario;

/// Load every REST scenario using the configured URL prefix
pub fn all(config: &Config) -> Result<Vec<Scenario>> {
    let scenarios = vec![tokens_non_fungible_unique::scenario_with_prefix(
        &config.url_prefix,
    )?];
    ensure_unique(&scenarios)?;
    Ok(scenarios)
}

/// Reject scenario sets where two scenarios share a name
pub fn ensure_unique(scenarios: &[Scenario]) -> Result<()> {
    let mut seen = HashSet::new();
    for scenario in scenarios {
        if !seen.insert(scenario.name()) {
            return Err(Error::DuplicateScenario(scenario.name().to_string()));
        }
    }
    Ok(())
}

/// Pick scenarios by name; an empty filter selects all of them
pub fn select(scenarios: Vec<Scenario>, names: &[String]) -> Result<Vec<Scenario>> {
    if names.is_empty() {
        return Ok(scenarios);
    }

    let available: Vec<String> = scenarios.iter().map(|s| s.name().to_string()).collect();
    for name in names {
        if !available.contains(name) {
            return Err(Error::scenario_not_found(name, &available));
        }
    }

    Ok(scenarios
        .into_iter()
        .filter(|s| names.iter().any(|n| n == s.name()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::TestParameters;

    #[test]
    fn test_all_uses_config_prefix() {
        let config = Config {
            url_prefix: "/api/v2".to_string(),
            ..Config::default()
        };
        let scenarios = all(&config).unwrap();
        let params: TestParameters = [("BASE_URL", "http://h")].into_iter().collect();
        assert_eq!(
            scenarios[0].run.request(&params).url,
            "http://h/api/v2/tokens?type=NON_FUNGIBLE_UNIQUE"
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let scenarios = vec![
            tokens_non_fungible_unique::scenario().unwrap(),
            tokens_non_fungible_unique::scenario_with_prefix("/other").unwrap(),
        ];
        let err = ensure_unique(&scenarios).unwrap_err();
        assert!(matches!(err, Error::DuplicateScenario(name) if name == "tokensNonFungibleUnique"));
    }

    #[test]
    fn test_select() {
        let scenarios = all(&Config::default()).unwrap();
        assert_eq!(select(scenarios.clone(), &[]).unwrap().len(), 1);

        let picked =
            select(scenarios.clone(), &["tokensNonFungibleUnique".to_string()]).unwrap();
        assert_eq!(picked[0].name(), "tokensNonFungibleUnique");

        let err = select(scenarios, &["accounts".to_string()]).unwrap_err();
        assert!(matches!(err, Error::ScenarioNotFound { .. }));
    }
}
