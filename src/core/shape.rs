//! Post-processing applied to a fetched record collection.

use serde_json::{json, Value};

use crate::core::filters::{filter_records, FilterCriteria};
use crate::core::paginate::Page;
use crate::core::sort::SortSpec;
use crate::core::view::{project, select_fields, ViewMode};
use crate::error::Result;

/// Everything a caller can ask of a record collection once it has arrived.
///
/// Steps run in a fixed order: sort, keep-filter, exclude-filter, field
/// selection, wrap as `{"data": [...], "total": n}`, then the view.
#[derive(Debug, Clone, Default)]
pub struct Shaping {
    pub filter: Option<FilterCriteria>,
    pub exclude: Option<FilterCriteria>,
    pub sort: Option<SortSpec>,
    pub fields: Option<Vec<String>>,
    pub view: Option<String>,
    pub view_mode: ViewMode,
}

impl Shaping {
    /// Shape `records`. `Ok(None)` when a lenient view did not resolve.
    pub fn apply(&self, records: Vec<Value>) -> Result<Option<Value>> {
        let records = self.process(records);
        let total = records.len() as u64;
        self.finish(records, total)
    }

    /// Shape a single page. The server's `total` is kept unless a filter
    /// changed the record count.
    pub fn apply_page(&self, page: Page) -> Result<Option<Value>> {
        let filtered = self.filter.is_some() || self.exclude.is_some();
        let records = self.process(page.data);
        let total = if filtered {
            records.len() as u64
        } else {
            page.total
        };
        self.finish(records, total)
    }

    fn process(&self, mut records: Vec<Value>) -> Vec<Value> {
        if let Some(sort) = &self.sort {
            sort.apply(&mut records);
        }
        if let Some(criteria) = &self.filter {
            records = filter_records(records, criteria, false);
        }
        if let Some(criteria) = &self.exclude {
            records = filter_records(records, criteria, true);
        }
        if let Some(fields) = &self.fields {
            records = select_fields(records, fields);
        }
        records
    }

    fn finish(&self, records: Vec<Value>, total: u64) -> Result<Option<Value>> {
        let envelope = json!({ "data": records, "total": total });
        project(envelope, self.view.as_deref(), self.view_mode)
    }

    /// Shape a raw response: records come from its `"data"` array when present,
    /// otherwise a top-level array is used as-is, and anything else is only
    /// projected.
    pub fn apply_to_response(&self, response: Value) -> Result<Option<Value>> {
        match response {
            Value::Object(mut map) if map.get("data").is_some_and(Value::is_array) => {
                let records = match map.remove("data") {
                    Some(Value::Array(records)) => records,
                    _ => Vec::new(),
                };
                self.apply(records)
            }
            Value::Array(records) => self.apply(records),
            other => project(other, self.view.as_deref(), self.view_mode),
        }
    }
}
