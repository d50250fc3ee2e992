//! Query, filter and view engine for stats API responses
//!
//! This module holds everything that is independent of any single endpoint:
//! - `path`: dot-delimited field paths
//! - `view`: drill-down views and field selection
//! - `filters`: client-side record filtering
//! - `sort`: multi-key stable sorting
//! - `expression`: Cayenne expression compilation
//! - `http`: resilient GET with retries
//! - `paginate`: `start`/`limit` page collection
//! - `shape`: the post-processing pipeline

pub mod expression;
pub mod filters;
pub mod http;
pub mod paginate;
pub mod path;
pub mod shape;
pub mod sort;
pub mod view;

// Re-export commonly used items for convenience
pub use expression::{compile_fact, compile_primary, FactParams, PrimaryParams};
pub use filters::{filter_records, Criterion, FilterCriteria};
pub use http::{build_client, request, Fetched, RetryPolicy};
pub use paginate::{collect_all, fetch_page, Page, PageRequest};
pub use path::{resolve, FieldPath};
pub use shape::Shaping;
pub use sort::{Direction, OneOrMany, SortKey, SortSpec};
pub use view::{project, select_fields, ViewMode};
