//! Multi-key sort specifications.
//!
//! A [`SortSpec`] is an ordered list of `(field, direction)` keys. The first
//! key dominates: records are stable-sorted by the last key first and by the
//! first key last, so each pass only reorders ties left by the ones before it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::core::path::{resolve, FieldPath};
use crate::error::{Result, StatsError};

/// A parameter that callers may give as one value or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

impl From<&str> for OneOrMany<String> {
    fn from(value: &str) -> Self {
        OneOrMany::One(value.to_string())
    }
}

impl From<String> for OneOrMany<String> {
    fn from(value: String) -> Self {
        OneOrMany::One(value)
    }
}

impl From<Vec<&str>> for OneOrMany<String> {
    fn from(values: Vec<&str>) -> Self {
        OneOrMany::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for OneOrMany<String> {
    fn from(values: Vec<String>) -> Self {
        OneOrMany::Many(values)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "ASC")]
    Ascending,
    #[serde(rename = "DESC")]
    Descending,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Direction {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "ASC" | "ASCENDING" => Ok(Direction::Ascending),
            "DESC" | "DESCENDING" => Ok(Direction::Descending),
            _ => Err(StatsError::InvalidSortDirection {
                direction: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: FieldPath,
    pub direction: Direction,
}

/// Wire shape of one entry in the remote `sort` parameter.
#[derive(Debug, Serialize)]
struct SortParam<'a> {
    property: String,
    direction: &'a Direction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    /// Pair fields with directions positionally.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nhl_stats::core::sort::SortSpec;
    ///
    /// let spec = SortSpec::normalize(vec!["points", "goals"], vec!["DESC", "DESC"]).unwrap();
    /// assert_eq!(spec.len(), 2);
    /// assert!(SortSpec::normalize(vec!["points", "goals"], "DESC").is_err());
    /// ```
    pub fn normalize(
        fields: impl Into<OneOrMany<String>>,
        directions: impl Into<OneOrMany<String>>,
    ) -> Result<Self> {
        let fields = fields.into().into_vec();
        let directions = directions.into().into_vec();
        if fields.len() != directions.len() {
            return Err(StatsError::MismatchedSortArity {
                fields: fields.len(),
                directions: directions.len(),
            });
        }

        let keys = fields
            .iter()
            .zip(&directions)
            .map(|(field, direction)| {
                Ok(SortKey {
                    field: FieldPath::parse(field)?,
                    direction: direction.parse()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Stable multi-key sort, in place. Missing and `null` fields sort first in
    /// either direction.
    pub fn apply(&self, records: &mut [Value]) {
        for key in self.keys.iter().rev() {
            records.sort_by(|a, b| {
                compare_resolved(resolve(a, &key.field), resolve(b, &key.field), key.direction)
            });
        }
    }

    /// The remote `sort` parameter: `[{"property": .., "direction": ..}, ..]`.
    pub fn to_query_param(&self) -> Result<String> {
        let params: Vec<SortParam<'_>> = self
            .keys
            .iter()
            .map(|key| SortParam {
                property: key.field.to_string(),
                direction: &key.direction,
            })
            .collect();
        Ok(serde_json::to_string(&params)?)
    }

    /// `{field: direction}` summary used in report metadata.
    pub fn to_summary(&self) -> Value {
        let map = self
            .keys
            .iter()
            .map(|key| (key.field.to_string(), Value::String(key.direction.to_string())))
            .collect();
        Value::Object(map)
    }
}

fn is_nullish(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

fn compare_resolved(a: Option<&Value>, b: Option<&Value>, direction: Direction) -> Ordering {
    match (is_nullish(a), is_nullish(b)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => {
            let ordering = match (a, b) {
                (Some(a), Some(b)) => compare_values(a, b),
                _ => Ordering::Equal,
            };
            match direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        }
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over JSON values: by type first, then by content.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => {
                let a = a.as_f64().unwrap_or(f64::NAN);
                let b = b.as_f64().unwrap_or(f64::NAN);
                a.total_cmp(&b)
            }
        },
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Array(a), Value::Array(b)) => a
            .iter()
            .zip(b)
            .map(|(x, y)| compare_values(x, y))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len())),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(records: &[Value]) -> Vec<&str> {
        records.iter().filter_map(|r| r["name"].as_str()).collect()
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("asc".parse::<Direction>().unwrap(), Direction::Ascending);
        assert_eq!("DESC".parse::<Direction>().unwrap(), Direction::Descending);
        assert_eq!(
            "Descending".parse::<Direction>().unwrap(),
            Direction::Descending
        );
        assert!(matches!(
            "up".parse::<Direction>(),
            Err(StatsError::InvalidSortDirection { .. })
        ));
    }

    #[test]
    fn test_normalize_wraps_scalars() {
        let spec = SortSpec::normalize("points", "DESC").unwrap();
        assert_eq!(spec.len(), 1);
        assert_eq!(spec.keys()[0].field.to_string(), "points");
        assert_eq!(spec.keys()[0].direction, Direction::Descending);
    }

    #[test]
    fn test_normalize_mismatched_arity() {
        match SortSpec::normalize(vec!["a", "b"], vec!["ASC"]) {
            Err(StatsError::MismatchedSortArity { fields, directions }) => {
                assert_eq!((fields, directions), (2, 1));
            }
            other => panic!("expected MismatchedSortArity, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_primary_key_dominates() {
        let mut records = vec![
            json!({"name": "a", "team": "TOR", "points": 50}),
            json!({"name": "b", "team": "MTL", "points": 70}),
            json!({"name": "c", "team": "TOR", "points": 90}),
            json!({"name": "d", "team": "MTL", "points": 20}),
        ];
        let spec = SortSpec::normalize(vec!["team", "points"], vec!["ASC", "DESC"]).unwrap();
        spec.apply(&mut records);
        assert_eq!(names(&records), vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn test_apply_is_stable_on_ties() {
        let mut records = vec![
            json!({"name": "first", "gp": 10}),
            json!({"name": "second", "gp": 10}),
            json!({"name": "third", "gp": 5}),
        ];
        SortSpec::normalize("gp", "DESC").unwrap().apply(&mut records);
        assert_eq!(names(&records), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_apply_nulls_first_in_both_directions() {
        let base = vec![
            json!({"name": "x", "goals": 3}),
            json!({"name": "missing"}),
            json!({"name": "y", "goals": 7}),
            json!({"name": "null", "goals": null}),
        ];

        let mut asc = base.clone();
        SortSpec::normalize("goals", "ASC").unwrap().apply(&mut asc);
        assert_eq!(names(&asc), vec!["missing", "null", "x", "y"]);

        let mut desc = base;
        SortSpec::normalize("goals", "DESC").unwrap().apply(&mut desc);
        assert_eq!(names(&desc), vec!["missing", "null", "y", "x"]);
    }

    #[test]
    fn test_apply_nested_field() {
        let mut records = vec![
            json!({"name": "b", "stats": {"toi": 1200}}),
            json!({"name": "a", "stats": {"toi": 900}}),
        ];
        SortSpec::normalize("stats.toi", "ASC").unwrap().apply(&mut records);
        assert_eq!(names(&records), vec!["a", "b"]);
    }

    #[test]
    fn test_compare_values_mixed_numbers() {
        assert_eq!(compare_values(&json!(2), &json!(2.5)), Ordering::Less);
        assert_eq!(compare_values(&json!(-1), &json!(3)), Ordering::Less);
        assert_eq!(compare_values(&json!(true), &json!(1)), Ordering::Less);
        assert_eq!(compare_values(&json!("a"), &json!("b")), Ordering::Less);
    }

    #[test]
    fn test_to_query_param() {
        let spec = SortSpec::normalize(vec!["points", "playerId"], vec!["desc", "ASC"]).unwrap();
        assert_eq!(
            spec.to_query_param().unwrap(),
            r#"[{"property":"points","direction":"DESC"},{"property":"playerId","direction":"ASC"}]"#
        );
    }

    #[test]
    fn test_to_summary() {
        let spec = SortSpec::normalize("points", "DESC").unwrap();
        assert_eq!(spec.to_summary(), json!({"points": "DESC"}));
    }

    #[test]
    fn test_one_or_many_deserializes_both_shapes() {
        let one: OneOrMany<String> = serde_json::from_value(json!("C")).unwrap();
        let many: OneOrMany<String> = serde_json::from_value(json!(["C", "D"])).unwrap();
        assert_eq!(one.into_vec(), vec!["C"]);
        assert_eq!(many.into_vec(), vec!["C", "D"]);
    }
}
