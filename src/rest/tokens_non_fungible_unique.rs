//! `GET /tokens?type=NON_FUNGIBLE_UNIQUE`

use super::constants::{TOKEN_LIST_NAME, URL_PREFIX};
use crate::common::Result;
use crate::scenario::{is_valid_list_response, HttpRequest, Scenario, TestScenarioBuilder};

pub const NAME: &str = "tokensNonFungibleUnique";
pub const URL_TAG: &str = "/tokens?type=NON_FUNGIBLE_UNIQUE";
pub const CHECK: &str = "Tokens NON_FUNGIBLE_UNIQUE OK";

pub fn scenario() -> Result<Scenario> {
    scenario_with_prefix(URL_PREFIX)
}

pub fn scenario_with_prefix(url_prefix: &str) -> Result<Scenario> {
    let url_prefix = url_prefix.to_string();

    TestScenarioBuilder::new()
        .name(NAME)
        .tags([("url", URL_TAG)])
        .request(move |params| {
            HttpRequest::get(format!("{}{}{}", params.base_url(), url_prefix, URL_TAG))
        })
        .check(CHECK, |r| is_valid_list_response(r, TOKEN_LIST_NAME))
        .build()
}
