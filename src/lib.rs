//! NHL Stats Query Library
//!
//! A small, general-purpose engine for pulling JSON out of the NHL statistics
//! service and reshaping it, plus a thin CLI on top.
//!
//! ## Features
//!
//! - **Resilient Requests**: GET with timeout, bounded retries and exponential backoff
//! - **Pagination**: `start`/`limit` collection of bulk statistics reports
//! - **Cayenne Expressions**: structured parameters compiled into `cayenneExp` / `factCayenneExp`
//! - **Record Filtering**: equality, absence and membership predicates over dotted paths
//! - **Multi-key Sorting**: stable sorts where the first key dominates
//! - **Views**: drill into a response and return only a sub-tree
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nhl_stats::{
//!     core::{build_client, PrimaryParams, RetryPolicy, SortSpec},
//!     stats::{fetch_report, ReportKey, ReportRequest, STATS_BASE_URL},
//! };
//!
//! # async fn example() -> nhl_stats::Result<()> {
//! let client = build_client()?;
//! let mut request = ReportRequest::new(
//!     ReportKey::Skater,
//!     "summary",
//!     PrimaryParams::for_season("20232024"),
//! );
//! request.sort = Some(SortSpec::normalize("points", "DESC")?);
//!
//! let skaters = fetch_report(&client, STATS_BASE_URL, &request, &RetryPolicy::default()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export NHL_STATS_BASE_URL=https://api.nhle.com/stats/rest/en/
//! export NHL_STATS_TIMEOUT_SECS=10
//! export NHL_STATS_RETRIES=3
//! export NHL_STATS_BACKOFF_MS=300
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod stats;

// Re-export commonly used types
pub use error::{Result, StatsError};
