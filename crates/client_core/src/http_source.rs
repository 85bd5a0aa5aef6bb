use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, CONTENT_TYPE},
    Client,
};
use shared::{
    domain::Application,
    protocol::{ListQuery, APPLICATIONS_ROUTE, TOTAL_COUNT_HEADER},
};
use tracing::debug;
use url::Url;

use crate::{
    error::FetchError,
    source::{Page, PageRequest, RecordSource},
};

/// Record source backed by `GET {base_url}/api/applications?_page=&_limit=`.
pub struct HttpRecordSource {
    http: Client,
    endpoint: Url,
}

impl HttpRecordSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let endpoint = listing_endpoint(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn listing_endpoint(base_url: &str) -> Result<Url> {
    let base = base_url.trim().trim_end_matches('/');
    Url::parse(&format!("{base}{APPLICATIONS_ROUTE}"))
        .with_context(|| format!("invalid listing base url '{base_url}'"))
}

fn parse_total_count(headers: &HeaderMap) -> Result<u64, FetchError> {
    let raw = headers
        .get(TOTAL_COUNT_HEADER)
        .ok_or_else(|| FetchError::Malformed("missing X-Total-Count header".into()))?;
    raw.to_str()
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .ok_or_else(|| FetchError::Malformed(format!("invalid X-Total-Count header {raw:?}")))
}

#[async_trait]
impl RecordSource<Application> for HttpRecordSource {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<Application>, FetchError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .query(&ListQuery::new(request.page, request.page_size))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let total_count = parse_total_count(response.headers())?;
        let records: Vec<Application> = response.json().await?;
        debug!(
            page = request.page,
            page_size = request.page_size,
            received = records.len(),
            total_count,
            "listing page received"
        );

        Ok(Page {
            records,
            total_count,
        })
    }
}

#[cfg(test)]
#[path = "tests/http_source_tests.rs"]
mod tests;
