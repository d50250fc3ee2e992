//! `start`/`limit` pagination for bulk statistics queries.
//!
//! Pages arrive as `{"data": [...], "total": n}`. The collector keeps asking
//! for the next `start` offset until it holds `total` records. Any page that
//! cannot be fetched fails the whole collection; partial aggregates are never
//! returned.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::http::{request, Fetched, RetryPolicy};
use crate::error::{Result, StatsError};

/// One page of a paginated response. Missing fields default to empty / zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub total: u64,
}

/// Offset and size of the page being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub start: usize,
    pub limit: usize,
}

/// Fetch and decode a single page. `Ok(None)` when the request came back absent.
pub async fn fetch_page(client: &Client, url: &str, policy: &RetryPolicy) -> Result<Option<Page>> {
    match request(client, url, policy).await? {
        Fetched::Payload(value) => Ok(Some(serde_json::from_value(value)?)),
        Fetched::Empty => {
            tracing::warn!(url, "page request returned an empty body");
            Ok(None)
        }
        Fetched::Exhausted { attempts, last_error } => {
            tracing::warn!(url, attempts, error = %last_error, "page request exhausted retries");
            Ok(None)
        }
    }
}

/// Collect every record of a paginated query.
///
/// `url_for` builds the URL for each [`PageRequest`]. Returns `Ok(None)` when
/// any page is absent, or when a page adds no records before `total` is
/// reached.
pub async fn collect_all<F>(
    client: &Client,
    policy: &RetryPolicy,
    page_size: usize,
    url_for: F,
) -> Result<Option<Vec<Value>>>
where
    F: Fn(PageRequest) -> String,
{
    if page_size == 0 {
        return Err(StatsError::InvalidPageSize);
    }
    policy.validate()?;

    let mut records: Vec<Value> = Vec::new();
    loop {
        let page_request = PageRequest {
            start: records.len(),
            limit: page_size,
        };
        let url = url_for(page_request);
        let Some(page) = fetch_page(client, &url, policy).await? else {
            tracing::warn!(start = page_request.start, "pagination failed, discarding partial results");
            return Ok(None);
        };

        let received = page.data.len();
        records.extend(page.data);
        tracing::debug!(start = page_request.start, received, accumulated = records.len(), total = page.total, "page collected");

        if records.len() as u64 >= page.total {
            return Ok(Some(records));
        }
        if received == 0 {
            tracing::warn!(
                accumulated = records.len(),
                total = page.total,
                "page returned no records before total was reached"
            );
            return Ok(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_defaults_missing_fields() {
        let page: Page = serde_json::from_value(json!({})).unwrap();
        assert_eq!(page, Page::default());

        let page: Page = serde_json::from_value(json!({"data": [{"id": 1}], "total": 9})).unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.total, 9);
    }

    #[test]
    fn test_page_rejects_wrong_shape() {
        assert!(serde_json::from_value::<Page>(json!({"data": "nope"})).is_err());
    }

    #[tokio::test]
    async fn test_zero_page_size_rejected_before_io() {
        let client = Client::new();
        let result = collect_all(&client, &RetryPolicy::default(), 0, |_| {
            panic!("no request should be built")
        })
        .await;
        assert!(matches!(result, Err(StatsError::InvalidPageSize)));
    }
}
