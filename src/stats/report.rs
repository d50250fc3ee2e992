//! Bulk statistics reports: `{base}{key}/{report}?cayenneExp=...`.
//!
//! A [`ReportRequest`] is compiled into query expressions up front, so every
//! validation error surfaces before the first request goes out. Fetching then
//! either walks every page ([`collect_all`]) or reads one page at `start`.

use reqwest::{Client, Url};
use serde_json::{json, Value};

use crate::core::expression::{compile_fact, compile_primary, FactParams, PrimaryParams, SelectionMode};
use crate::core::http::RetryPolicy;
use crate::core::paginate::{collect_all, fetch_page, PageRequest};
use crate::core::shape::Shaping;
use crate::core::sort::SortSpec;
use crate::error::{Result, StatsError};
use crate::stats::types::ReportKey;

/// Base URL of the stats REST API.
pub const STATS_BASE_URL: &str = "https://api.nhle.com/stats/rest/en/";

/// Overrides [`STATS_BASE_URL`] when set.
pub const BASE_URL_ENV_VAR: &str = "NHL_STATS_BASE_URL";

/// Base URL from `NHL_STATS_BASE_URL`, or the public default.
pub fn base_url_from_env() -> String {
    std::env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| STATS_BASE_URL.to_string())
}

/// A statistics report query plus the shaping applied to its records.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub key: ReportKey,
    pub report: String,
    pub aggregate: bool,
    pub primary: PrimaryParams,
    pub fact: FactParams,
    pub sort: Option<SortSpec>,
    pub limit: usize,
    pub start: usize,
    pub return_all: bool,
    pub return_info: bool,
    pub shaping: Shaping,
}

impl ReportRequest {
    /// A `key`/`report` query with defaults: aggregated, every page, the key's
    /// default page size.
    pub fn new(key: ReportKey, report: impl Into<String>, primary: PrimaryParams) -> Self {
        Self {
            key,
            report: report.into(),
            aggregate: true,
            primary,
            fact: FactParams::default(),
            sort: None,
            limit: key.default_limit(),
            start: 0,
            return_all: true,
            return_info: false,
            shaping: Shaping::default(),
        }
    }
}

/// Expressions and static parameters compiled from a [`ReportRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledReport {
    pub endpoint: Url,
    pub is_game: bool,
    pub aggregate: bool,
    pub cayenne_exp: String,
    pub fact_cayenne_exp: String,
    pub sort: Option<String>,
}

impl CompiledReport {
    pub fn compile(base_url: &str, request: &ReportRequest) -> Result<Self> {
        let is_game = matches!(request.primary.selection_mode()?, SelectionMode::DateRange { .. });
        let cayenne_exp = compile_primary(&request.primary)?;
        let fact_cayenne_exp = compile_fact(&request.fact)?;
        let sort = request
            .sort
            .as_ref()
            .map(SortSpec::to_query_param)
            .transpose()?;

        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let endpoint = Url::parse(&base)
            .and_then(|url| url.join(&format!("{}/{}", request.key, request.report)))
            .map_err(|e| StatsError::InvalidUrl(format!("{base}{}/{}: {e}", request.key, request.report)))?;

        Ok(Self {
            endpoint,
            is_game,
            aggregate: request.aggregate,
            cayenne_exp,
            fact_cayenne_exp,
            sort,
        })
    }

    /// URL of the page at `page.start` with `page.limit` records.
    pub fn page_url(&self, page: PageRequest) -> String {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("isAggregate", &self.aggregate.to_string())
                .append_pair("isGame", &self.is_game.to_string())
                .append_pair("start", &page.start.to_string())
                .append_pair("limit", &page.limit.to_string())
                .append_pair("factCayenneExp", &self.fact_cayenne_exp)
                .append_pair("cayenneExp", &self.cayenne_exp);
            if let Some(sort) = &self.sort {
                query.append_pair("sort", sort);
            }
        }
        url.into()
    }
}

/// Run a report query and shape its records.
///
/// `Ok(None)` means the data could not be obtained (a page was absent) or a
/// lenient view did not resolve.
///
/// With `return_info`, `path` is the URL of the first page requested (the
/// `start` page in single-page mode), so it can be replayed as-is. It is not
/// the URL of the last page the collector happened to fetch.
pub async fn fetch_report(
    client: &Client,
    base_url: &str,
    request: &ReportRequest,
    policy: &RetryPolicy,
) -> Result<Option<Value>> {
    let compiled = CompiledReport::compile(base_url, request)?;
    let first_page = PageRequest {
        start: if request.return_all { 0 } else { request.start },
        limit: request.limit,
    };
    let path = compiled.page_url(first_page);
    tracing::info!(key = %request.key, report = %request.report, return_all = request.return_all, "fetching report");

    let response = if request.return_all {
        let Some(records) =
            collect_all(client, policy, request.limit, |page| compiled.page_url(page)).await?
        else {
            return Ok(None);
        };
        request.shaping.apply(records)?
    } else {
        let Some(page) = fetch_page(client, &path, policy).await? else {
            return Ok(None);
        };
        request.shaping.apply_page(page)?
    };

    if !request.return_info {
        return Ok(response);
    }
    Ok(Some(json!({
        "path": path,
        "view": request.shaping.view,
        "fields": request.shaping.fields,
        "sort": request.sort.as_ref().map(SortSpec::to_summary),
        "response": response,
    })))
}
