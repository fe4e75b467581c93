//! Check outcomes and shared response validators

use serde::Serialize;
use serde_json::Value;

use super::http::HttpResponse;

/// Outcome of a single named check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
}

/// Everything one `run` invocation produced
#[derive(Debug, Clone, Serialize)]
pub struct IterationResult {
    pub scenario: String,
    pub url: String,
    /// HTTP status, `0` on transport failure
    pub status: u16,
    pub checks: Vec<CheckResult>,
}

impl IterationResult {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

/// Whether the response is a 2xx JSON object whose `list_name` field is a
/// non-empty array of objects
///
/// Never panics: unparsable bodies, missing fields and error statuses all
/// yield `false`.
pub fn is_valid_list_response(response: &HttpResponse, list_name: &str) -> bool {
    if !response.is_success() {
        return false;
    }

    let body: Value = match serde_json::from_str(&response.body) {
        Ok(body) => body,
        Err(_) => return false,
    };

    match body.get(list_name) {
        Some(Value::Array(items)) => !items.is_empty() && items.iter().all(Value::is_object),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
            ..HttpResponse::default()
        }
    }

    #[test]
    fn test_valid_list() {
        let r = response(
            200,
            r#"{"tokens":[{"token_id":"0.0.1001","type":"NON_FUNGIBLE_UNIQUE"}],"links":{"next":null}}"#,
        );
        assert!(is_valid_list_response(&r, "tokens"));
    }

    #[test]
    fn test_missing_field() {
        let r = response(200, r#"{"accounts":[{"account":"0.0.2"}]}"#);
        assert!(!is_valid_list_response(&r, "tokens"));
    }

    #[test]
    fn test_non_list_value() {
        assert!(!is_valid_list_response(&response(200, r#"{"tokens":{}}"#), "tokens"));
        assert!(!is_valid_list_response(&response(200, r#"{"tokens":"x"}"#), "tokens"));
        assert!(!is_valid_list_response(&response(200, r#"{"tokens":null}"#), "tokens"));
    }

    #[test]
    fn test_empty_list() {
        assert!(!is_valid_list_response(&response(200, r#"{"tokens":[]}"#), "tokens"));
    }

    #[test]
    fn test_non_object_items() {
        assert!(!is_valid_list_response(&response(200, r#"{"tokens":[1,2]}"#), "tokens"));
    }

    #[test]
    fn test_any_2xx_status_accepted() {
        let body = r#"{"tokens":[{"token_id":"0.0.1001"}]}"#;
        assert!(is_valid_list_response(&response(206, body), "tokens"));
        assert!(is_valid_list_response(&response(299, body), "tokens"));
        assert!(!is_valid_list_response(&response(204, ""), "tokens"));
        assert!(!is_valid_list_response(&response(300, body), "tokens"));
    }

    #[test]
    fn test_error_status() {
        let body = r#"{"tokens":[{"token_id":"0.0.1001"}]}"#;
        assert!(!is_valid_list_response(&response(500, body), "tokens"));
        assert!(!is_valid_list_response(&response(404, body), "tokens"));
        assert!(!is_valid_list_response(&response(0, body), "tokens"));
    }

    #[test]
    fn test_malformed_body() {
        assert!(!is_valid_list_response(&response(200, "not json"), "tokens"));
        assert!(!is_valid_list_response(&response(200, r#"[{"tokens":[]}]"#), "tokens"));
        assert!(!is_valid_list_response(&response(200, ""), "tokens"));
    }

    #[test]
    fn test_iteration_passed() {
        let mut result = IterationResult {
            scenario: "s".to_string(),
            url: "u".to_string(),
            status: 200,
            checks: vec![CheckResult {
                name: "a".to_string(),
                passed: true,
            }],
        };
        assert!(result.passed());
        result.checks.push(CheckResult {
            name: "b".to_string(),
            passed: false,
        });
        assert!(!result.passed());
    }
}
