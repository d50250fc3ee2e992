//! Client-side record filtering.
//!
//! The stats API only filters server-side through Cayenne expressions, and
//! most endpoints take none at all, so record subsets are usually cut locally
//! after the response arrives.
//!
//! # Criteria
//!
//! Each criterion names a dotted [`FieldPath`] and one predicate:
//!
//! - **Equals**: the field resolves and equals the value
//! - **IsAbsent**: the field is missing or explicitly `null`
//! - **MemberOf**: the field resolves to one of the listed values
//!
//! All criteria must hold for a record to match. [`filter_records`] keeps the
//! matching records, or with `exclude` the non-matching ones.

use serde_json::Value;

use crate::core::path::{resolve, FieldPath};
use crate::core::sort::compare_values;
use crate::error::{Result, StatsError};


/// A single predicate applied to one resolved field.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    Equals(Value),
    IsAbsent,
    MemberOf(Vec<Value>),
}

impl Criterion {
    /// Evaluate against a resolved field, where `None` means the path did not resolve.
    pub fn matches(&self, resolved: Option<&Value>) -> bool {
        match self {
            Criterion::Equals(expected) => resolved.is_some_and(|value| same_value(value, expected)),
            Criterion::IsAbsent => matches!(resolved, None | Some(Value::Null)),
            Criterion::MemberOf(allowed) => {
                resolved.is_some_and(|value| allowed.iter().any(|a| same_value(value, a)))
            }
        }
    }
}

/// Numbers compare by value (`10 == 10.0`); everything else structurally.
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => compare_values(a, b).is_eq(),
        _ => a == b,
    }
}

/// Field → criterion pairs, combined with logical AND.
///
/// # Examples
///
/// ```rust
/// use nhl_stats::core::filters::{filter_records, FilterCriteria};
/// use serde_json::json;
///
/// let records = vec![json!({"gp": 10}), json!({"gp": 0})];
/// let criteria = FilterCriteria::new().member_of("gp", vec![json!(10)]).unwrap();
///
/// assert_eq!(filter_records(records.clone(), &criteria, false), vec![json!({"gp": 10})]);
/// assert_eq!(filter_records(records, &criteria, true), vec![json!({"gp": 0})]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    criteria: Vec<(FieldPath, Criterion)>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, criterion: Criterion) -> Result<Self> {
        self.criteria.push((FieldPath::parse(field)?, criterion));
        Ok(self)
    }

    pub fn equals(self, field: &str, value: impl Into<Value>) -> Result<Self> {
        self.with(field, Criterion::Equals(value.into()))
    }

    pub fn absent(self, field: &str) -> Result<Self> {
        self.with(field, Criterion::IsAbsent)
    }

    pub fn member_of(self, field: &str, values: Vec<Value>) -> Result<Self> {
        self.with(field, Criterion::MemberOf(values))
    }

    /// Build criteria from a JSON object: `null` means absent, an array means
    /// membership, any other scalar means equality.
    pub fn from_json(spec: &Value) -> Result<Self> {
        let Some(map) = spec.as_object() else {
            return Err(StatsError::InvalidCriterion {
                field: String::new(),
                reason: "criteria must be a JSON object".to_string(),
            });
        };

        map.iter().try_fold(Self::new(), |criteria, (field, value)| {
            let criterion = match value {
                Value::Null => Criterion::IsAbsent,
                Value::Array(values) => Criterion::MemberOf(values.clone()),
                Value::Object(_) => {
                    return Err(StatsError::InvalidCriterion {
                        field: field.clone(),
                        reason: "object values are not comparable".to_string(),
                    })
                }
                scalar => Criterion::Equals(scalar.clone()),
            };
            criteria.with(field, criterion)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// True when every criterion holds for `record`.
    pub fn matches(&self, record: &Value) -> bool {
        self.criteria
            .iter()
            .all(|(path, criterion)| criterion.matches(resolve(record, path)))
    }
}

/// Keep records where `exclude XOR criteria.matches(record)`.
///
/// Empty criteria pass every record through and ignore `exclude`.
pub fn filter_records(records: Vec<Value>, criteria: &FilterCriteria, exclude: bool) -> Vec<Value> {
    if criteria.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| exclude ^ criteria.matches(record))
        .collect()
}
