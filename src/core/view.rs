//! Drill-down views and field selection over JSON responses.
//!
//! A view is a dot-delimited path (`"data"`, `"data.seasonTotals"`) naming the
//! sub-tree a caller wants back. How a missing path is reported is controlled
//! by a single [`ViewMode`] flag.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::path::{resolve_owned, FieldPath};
use crate::error::{Result, StatsError};

/// What to do when a view path does not resolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    /// Fail with [`StatsError::InvalidViewPath`].
    Strict,
    /// Return `None` ("no data").
    #[default]
    Lenient,
}

impl ViewMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            ViewMode::Strict
        } else {
            ViewMode::Lenient
        }
    }
}

/// Return the sub-tree of `root` named by `view`.
///
/// `view == None` hands back `root` unchanged. A path that does not resolve is
/// an error in [`ViewMode::Strict`] (naming the first missing segment and the
/// keys available beside it) and `Ok(None)` in [`ViewMode::Lenient`].
///
/// # Examples
///
/// ```rust
/// use nhl_stats::core::view::{project, ViewMode};
/// use serde_json::json;
///
/// let response = json!({"data": [{"id": 1}], "total": 1});
/// let total = project(response, Some("total"), ViewMode::Strict).unwrap();
/// assert_eq!(total, Some(json!(1)));
/// ```
pub fn project(root: Value, view: Option<&str>, mode: ViewMode) -> Result<Option<Value>> {
    let Some(view) = view else {
        return Ok(Some(root));
    };
    let path = FieldPath::parse(view)?;

    match resolve_owned(root, &path) {
        Ok(value) => Ok(Some(value)),
        Err(miss) => match mode {
            ViewMode::Strict => Err(StatsError::InvalidViewPath {
                view: view.to_string(),
                segment: path.segments()[miss.depth].clone(),
                available: miss.available,
            }),
            ViewMode::Lenient => {
                tracing::debug!(view, segment = %path.segments()[miss.depth], "view did not resolve");
                Ok(None)
            }
        },
    }
}

/// Keep only the listed top-level keys of each record.
///
/// Keys a record does not carry are skipped rather than filled with `null`.
/// Non-object records pass through untouched.
pub fn select_fields(records: Vec<Value>, fields: &[String]) -> Vec<Value> {
    records
        .into_iter()
        .map(|record| match record {
            Value::Object(mut map) => {
                let mut kept = Map::new();
                for field in fields {
                    if let Some(value) = map.remove(field) {
                        kept.insert(field.clone(), value);
                    }
                }
                Value::Object(kept)
            }
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "data": {
                "seasonTotals": [{"goals": 10}],
                "featuredStats": {"season": 20232024}
            },
            "total": 1
        })
    }

    #[test]
    fn test_project_none_returns_root() {
        let root = sample();
        assert_eq!(
            project(root.clone(), None, ViewMode::Strict).unwrap(),
            Some(root)
        );
    }

    #[test]
    fn test_project_drills_down() {
        let result = project(sample(), Some("data.featuredStats.season"), ViewMode::Strict).unwrap();
        assert_eq!(result, Some(json!(20232024)));
    }

    #[test]
    fn test_project_strict_names_segment_and_siblings() {
        let err = project(sample(), Some("data.careerTotals"), ViewMode::Strict).unwrap_err();
        match err {
            StatsError::InvalidViewPath {
                view,
                segment,
                available,
            } => {
                assert_eq!(view, "data.careerTotals");
                assert_eq!(segment, "careerTotals");
                assert_eq!(available, vec!["featuredStats", "seasonTotals"]);
            }
            other => panic!("expected InvalidViewPath, got {other:?}"),
        }
    }

    #[test]
    fn test_project_strict_through_scalar_has_no_siblings() {
        let err = project(sample(), Some("total.value"), ViewMode::Strict).unwrap_err();
        match err {
            StatsError::InvalidViewPath {
                segment, available, ..
            } => {
                assert_eq!(segment, "value");
                assert!(available.is_empty());
            }
            other => panic!("expected InvalidViewPath, got {other:?}"),
        }
    }

    #[test]
    fn test_project_lenient_returns_none() {
        let result = project(sample(), Some("data.nope"), ViewMode::Lenient).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_project_rejects_malformed_view() {
        assert!(matches!(
            project(sample(), Some("data..x"), ViewMode::Lenient),
            Err(StatsError::InvalidFieldPath { .. })
        ));
    }

    #[test]
    fn test_view_mode_default_is_lenient() {
        assert_eq!(ViewMode::default(), ViewMode::Lenient);
        assert_eq!(ViewMode::from_strict(true), ViewMode::Strict);
    }

    #[test]
    fn test_select_fields_skips_missing_keys() {
        let records = vec![
            json!({"playerId": 1, "goals": 5, "assists": 3}),
            json!({"playerId": 2, "assists": 1}),
        ];
        let fields = vec!["playerId".to_string(), "goals".to_string()];
        let selected = select_fields(records, &fields);
        assert_eq!(
            selected,
            vec![json!({"playerId": 1, "goals": 5}), json!({"playerId": 2})]
        );
    }
}
