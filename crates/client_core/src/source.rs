use async_trait::async_trait;

use crate::error::FetchError;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

/// Records of one page and the total number of records across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    pub records: Vec<R>,
    pub total_count: u64,
}

/// Paginated fetch capability the listing controller depends on.
///
/// Implementations are trusted not to repeat a record across pages.
#[async_trait]
pub trait RecordSource<R>: Send + Sync {
    async fn fetch_page(&self, request: PageRequest) -> Result<Page<R>, FetchError>;
}
