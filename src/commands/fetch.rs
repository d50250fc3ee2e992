//! Fetch command implementation

use reqwest::Client;
use serde_json::Value;

use crate::{
    cli::{RetryArgs, ShapingArgs},
    core::{request, RetryPolicy, Shaping},
    Result,
};

use super::common::{build_shaping, print_output, resolve_retry_policy};

/// GET `url` and shape whatever comes back. `Ok(None)` when the request
/// produced nothing usable or a lenient view missed.
pub async fn run_fetch(
    client: &Client,
    url: &str,
    shaping: &Shaping,
    policy: &RetryPolicy,
) -> Result<Option<Value>> {
    let fetched = request(client, url, policy).await?;
    let Some(payload) = fetched.into_payload() else {
        return Ok(None);
    };
    shaping.apply_to_response(payload)
}

/// Handle the fetch command
pub async fn handle_fetch(
    client: &Client,
    url: String,
    shaping: ShapingArgs,
    retry: RetryArgs,
) -> Result<()> {
    let policy = resolve_retry_policy(&retry)?;
    let shaping = build_shaping(&shaping, true)?;

    // tarpaulin::skip - HTTP call, tested via integration tests
    let result = run_fetch(client, &url, &shaping, &policy).await?;
    print_output(result)
}
