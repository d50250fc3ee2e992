//! Common utilities and helper functions shared across commands.
//!
//! Turns raw CLI arguments into the engine's types: retry policy, filter
//! criteria, sort specs and the shaping pipeline.

use serde_json::{Map, Value};
use std::time::Duration;

use crate::{
    cli::{RetryArgs, ShapingArgs},
    core::{FilterCriteria, RetryPolicy, Shaping, SortSpec, ViewMode},
    Result, StatsError,
};

/// Env-configured policy with any CLI flags layered on top.
pub fn resolve_retry_policy(args: &RetryArgs) -> Result<RetryPolicy> {
    apply_retry_args(RetryPolicy::from_env()?, args)
}

/// Layer CLI retry flags over `policy`.
pub fn apply_retry_args(mut policy: RetryPolicy, args: &RetryArgs) -> Result<RetryPolicy> {
    if let Some(secs) = args.timeout {
        policy.timeout = Duration::from_secs(secs);
    }
    if let Some(retries) = args.retries {
        policy.max_attempts = retries;
    }
    if let Some(ms) = args.backoff_ms {
        policy.base_backoff = Duration::from_millis(ms);
    }
    policy.validate()?;
    Ok(policy)
}

/// Parse `field=value` pairs into criteria.
///
/// Values are read as JSON when they parse (`10`, `true`, `null`, `["C","D"]`)
/// and as plain strings otherwise. Repeating a field collects its values into
/// a membership test. No pairs means no criteria.
pub fn parse_criteria(pairs: &[String]) -> Result<Option<FilterCriteria>> {
    if pairs.is_empty() {
        return Ok(None);
    }

    let mut spec: Map<String, Value> = Map::new();
    for pair in pairs {
        let Some((field, raw)) = pair.split_once('=') else {
            return Err(StatsError::InvalidCriterion {
                field: pair.clone(),
                reason: "expected field=value".to_string(),
            });
        };
        let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

        match spec.remove(field) {
            None => {
                spec.insert(field.to_string(), value);
            }
            Some(Value::Array(mut values)) => {
                values.push(value);
                spec.insert(field.to_string(), Value::Array(values));
            }
            Some(previous) => {
                spec.insert(field.to_string(), Value::Array(vec![previous, value]));
            }
        }
    }

    FilterCriteria::from_json(&Value::Object(spec)).map(Some)
}

/// `None` when no sort fields were given.
pub fn parse_sort(fields: &[String], directions: &[String]) -> Result<Option<SortSpec>> {
    if fields.is_empty() && directions.is_empty() {
        return Ok(None);
    }
    SortSpec::normalize(fields.to_vec(), directions.to_vec()).map(Some)
}

/// Build the shaping pipeline. `local_sort` decides whether --sort is applied
/// to the records here or left to the server.
pub fn build_shaping(args: &ShapingArgs, local_sort: bool) -> Result<Shaping> {
    Ok(Shaping {
        filter: parse_criteria(&args.filters)?,
        exclude: parse_criteria(&args.excludes)?,
        sort: if local_sort {
            parse_sort(&args.sort, &args.direction)?
        } else {
            None
        },
        fields: (!args.fields.is_empty()).then(|| args.fields.clone()),
        view: args.view.clone(),
        view_mode: ViewMode::from_strict(args.strict_view),
    })
}

/// Print a result as pretty JSON, failing with `NoData` when it is absent.
pub fn print_output(result: Option<Value>) -> Result<()> {
    match result {
        Some(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        None => {
            println!("null");
            Err(StatsError::NoData)
        }
    }
}
