//! Test parameter bootstrap
//!
//! Parameters are resolved once before any iteration runs and then shared
//! read-only with every virtual user.

use std::collections::BTreeMap;

use crate::common::{Config, Error, Result};

/// Key holding the REST API base URL
pub const BASE_URL: &str = "BASE_URL";

/// Immutable key/value parameters handed to every request constructor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestParameters(BTreeMap<String, String>);

impl TestParameters {
    /// Look up a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The `BASE_URL` parameter, or an empty string when unset
    pub fn base_url(&self) -> &str {
        self.get(BASE_URL).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for TestParameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl std::ops::Index<&str> for TestParameters {
    type Output = str;

    fn index(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }
}

/// Resolve the test parameters from the environment and configuration
///
/// `BASE_URL` comes from the environment first, then from the config file.
/// The value is kept verbatim so request URLs are plain concatenations.
pub fn setup_test_parameters(config: &Config) -> Result<TestParameters> {
    resolve(config, None, std::env::var(BASE_URL).ok())
}

/// Like [`setup_test_parameters`], with an explicit `BASE_URL` that beats
/// both the environment and the config file
pub fn setup_test_parameters_with_base_url(
    config: &Config,
    base_url: String,
) -> Result<TestParameters> {
    resolve(config, Some(base_url), std::env::var(BASE_URL).ok())
}

/// First non-empty `BASE_URL` of flag, environment, config file
fn resolve(
    config: &Config,
    flag_base_url: Option<String>,
    env_base_url: Option<String>,
) -> Result<TestParameters> {
    let base_url = [flag_base_url, env_base_url, config.base_url.clone()]
        .into_iter()
        .flatten()
        .find(|url| !url.trim().is_empty())
        .ok_or_else(|| Error::MissingParameter(BASE_URL.to_string()))?;

    let mut params: BTreeMap<String, String> = config
        .parameters
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    params.insert(BASE_URL.to_string(), base_url);

    tracing::debug!(count = params.len(), "Resolved test parameters");
    Ok(TestParameters(params))
}
