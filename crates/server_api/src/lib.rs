use std::sync::Arc;

use anyhow::Context;
use shared::{
    domain::Application,
    error::ApiError,
    protocol::{ListQuery, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT},
};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ApiContext {
    pub applications: Arc<Vec<Application>>,
}

/// One page of the catalogue plus the size of the whole catalogue.
#[derive(Debug, Clone)]
pub struct ApplicationPage {
    pub items: Vec<Application>,
    pub total_count: u64,
}

impl ApiContext {
    pub fn new(applications: Vec<Application>) -> Self {
        Self {
            applications: Arc::new(applications),
        }
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let applications: Vec<Application> =
            serde_json::from_str(raw).context("application catalogue is not a JSON list")?;
        Ok(Self::new(applications))
    }
}

pub fn list_applications(ctx: &ApiContext, query: ListQuery) -> Result<ApplicationPage, ApiError> {
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if page == 0 {
        return Err(ApiError::validation("_page must be at least 1"));
    }
    if limit == 0 || limit > MAX_LIMIT {
        return Err(ApiError::validation(format!(
            "_limit must be between 1 and {MAX_LIMIT}"
        )));
    }

    let total = ctx.applications.len();
    let start = (page as usize - 1).saturating_mul(limit as usize);
    let items = if start >= total {
        Vec::new()
    } else {
        let end = start.saturating_add(limit as usize).min(total);
        ctx.applications[start..end].to_vec()
    };
    debug!(page, limit, returned = items.len(), total, "listing applications");

    Ok(ApplicationPage {
        items,
        total_count: total as u64,
    })
}
