//! Report identifiers for the stats REST API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StatsError;

/// Which entity a statistics report is about.
///
/// # Examples
///
/// ```rust
/// use nhl_stats::stats::ReportKey;
///
/// let key: ReportKey = "Goalie".parse().unwrap();
/// assert_eq!(key.to_string(), "goalie");
/// assert_eq!(key.default_limit(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKey {
    Skater,
    Goalie,
    Team,
}

impl ReportKey {
    /// Page size used when the caller does not set one.
    pub fn default_limit(&self) -> usize {
        match self {
            ReportKey::Skater | ReportKey::Goalie => 100,
            ReportKey::Team => 50,
        }
    }
}

impl fmt::Display for ReportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReportKey::Skater => "skater",
            ReportKey::Goalie => "goalie",
            ReportKey::Team => "team",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ReportKey {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skater" | "skaters" => Ok(ReportKey::Skater),
            "goalie" | "goalies" => Ok(ReportKey::Goalie),
            "team" | "teams" => Ok(ReportKey::Team),
            _ => Err(StatsError::InvalidReportKey { key: s.to_string() }),
        }
    }
}
