//! Shared constants for the mirror node REST API scenarios

/// Default path prefix of the REST API
pub const URL_PREFIX: &str = "/api/v1";

/// Field holding the list in `/tokens` responses
pub const TOKEN_LIST_NAME: &str = "tokens";
