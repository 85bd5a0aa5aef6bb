use serde::{Deserialize, Serialize};

/// Route serving the paginated application listing.
pub const APPLICATIONS_ROUTE: &str = "/api/applications";

/// Response header (`X-Total-Count`) carrying the size of the whole collection.
/// Kept lowercase so it can be used directly as a static header name.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Query string of a listing request: `?_page=N&_limit=M`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "_page", default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(rename = "_limit", default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }
}
