//! NHL stats REST API: report identifiers and bulk report queries.

pub mod report;
pub mod types;

pub use report::{
    base_url_from_env, fetch_report, CompiledReport, ReportRequest, BASE_URL_ENV_VAR,
    STATS_BASE_URL,
};
pub use types::ReportKey;
