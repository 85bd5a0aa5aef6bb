//! Data acquisition for the loan application listing.
//!
//! [`PaginatedFetchController`] owns the listing state and drives a [`RecordSource`];
//! [`HttpRecordSource`] is the source backed by the REST listing endpoint.

pub mod controller;
pub mod error;
pub mod http_source;
pub mod source;

pub use controller::{PaginatedFetchController, Snapshot};
pub use error::{FetchError, FetchErrorKind};
pub use http_source::HttpRecordSource;
pub use source::{Page, PageRequest, RecordSource};

/// Controller specialised to the application records served by the listing endpoint.
pub type ApplicationListing = PaginatedFetchController<shared::domain::Application>;
