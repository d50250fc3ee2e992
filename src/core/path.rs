//! Dot-delimited field paths into nested JSON.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StatsError};

/// An ordered list of object keys, parsed from a string such as `"data.seasonTotals"`.
///
/// Empty segments (`"a..b"`, `".a"`, `""`) are rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn parse(path: &str) -> Result<Self> {
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(StatsError::InvalidFieldPath {
                path: path.to_string(),
            });
        }
        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for FieldPath {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Walk `path` through `root`. `None` means not found: some step hit a
/// non-object or a missing key.
pub fn resolve<'a>(root: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(root, |current, segment| current.as_object()?.get(segment))
}

/// Owned variant of [`resolve`], used when the caller gives up the tree.
pub fn resolve_owned(root: Value, path: &FieldPath) -> std::result::Result<Value, Miss> {
    let mut current = root;
    for (depth, segment) in path.segments().iter().enumerate() {
        current = match current {
            Value::Object(mut map) => match map.remove(segment) {
                Some(next) => next,
                None => {
                    return Err(Miss {
                        depth,
                        available: map.keys().cloned().collect(),
                    })
                }
            },
            _ => {
                return Err(Miss {
                    depth,
                    available: Vec::new(),
                })
            }
        };
    }
    Ok(current)
}

/// Where an owned resolution stopped, and what keys existed there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Miss {
    pub depth: usize,
    pub available: Vec<String>,
}
