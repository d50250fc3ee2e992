//! Cayenne expression compilation for the stats REST API.
//!
//! The stats endpoints filter server-side through two textual parameters:
//!
//! - `cayenneExp`: the primary predicate (season/date range plus categorical filters)
//! - `factCayenneExp`: numeric thresholds on aggregated facts (games played, etc.)
//!
//! The grammar does not care about predicate order but is strict about literal
//! formatting: integers bare, strings single-quoted, flags as `'1'`/`'0'`.
//! All quoting goes through [`quote`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::sort::OneOrMany;
use crate::error::{Result, StatsError};

/// Comparators accepted in fact expressions.
pub const FACT_COMPARATORS: &[&str] = &[">=", "<=", "=", ">", "<", "!="];

/// Which slice of time a report covers. Exactly one applies per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    SeasonRange { start: String, end: String },
    DateRange { start: NaiveDate, end: NaiveDate },
    Season(String),
}

/// Structured inputs for the primary expression.
///
/// Selection fields are checked in order: a full season range, then a full
/// date range, then a single season. Every other field is optional and only
/// emitted when set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimaryParams {
    pub season: Option<String>,
    pub start_season: Option<String>,
    pub end_season: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,

    pub franchise_id: Option<u32>,
    pub opponent_franchise_id: Option<u32>,
    pub home_or_road: Option<String>,
    pub game_result: Option<String>,
    pub game_type: Option<u8>,
    pub is_active: Option<bool>,
    pub position: Option<OneOrMany<String>>,
    pub shoots_catches: Option<String>,
    pub player_name: Option<String>,
    pub nationality_code: Option<String>,
    pub birth_state_province_code: Option<String>,
    pub draft_round: Option<u32>,
    pub draft_year: Option<String>,
    pub is_rookie: Option<bool>,
    pub is_in_hall_of_fame: Option<bool>,
}

impl PrimaryParams {
    pub fn for_season(season: impl Into<String>) -> Self {
        Self {
            season: Some(season.into()),
            ..Self::default()
        }
    }

    /// Resolve the selection mode, validating seasons and dates.
    pub fn selection_mode(&self) -> Result<SelectionMode> {
        if let (Some(start), Some(end)) = (&self.start_season, &self.end_season) {
            return Ok(SelectionMode::SeasonRange {
                start: parse_season(start)?,
                end: parse_season(end)?,
            });
        }
        if let (Some(start), Some(end)) = (&self.start_date, &self.end_date) {
            return Ok(SelectionMode::DateRange {
                start: parse_date(start)?,
                end: parse_date(end)?,
            });
        }
        if let Some(season) = &self.season {
            return Ok(SelectionMode::Season(parse_season(season)?));
        }
        Err(StatsError::MissingSelectionMode)
    }
}

/// Structured inputs for the fact expression.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactParams {
    #[serde(default)]
    pub min_gp: u32,
    pub max_gp: Option<u32>,
    pub property: Option<OneOrMany<String>>,
    pub comparator: Option<OneOrMany<String>>,
    pub value: Option<OneOrMany<String>>,
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| StatsError::InvalidDateFormat {
        value: value.to_string(),
    })
}

/// Check a season id such as `20232024`. Seasons are emitted unquoted, so
/// only ASCII digits are accepted.
pub fn parse_season(value: &str) -> Result<String> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StatsError::InvalidSeason {
            value: value.to_string(),
        });
    }
    Ok(value.to_string())
}

fn check_fact_property(property: &str) -> Result<()> {
    let mut chars = property.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(StatsError::InvalidFactProperty {
            property: property.to_string(),
        });
    }
    Ok(())
}

fn check_fact_value(value: &str) -> Result<()> {
    let numeric = value
        .trim_start_matches('-')
        .bytes()
        .all(|b| b.is_ascii_digit() || b == b'.')
        && value.parse::<f64>().is_ok_and(f64::is_finite);
    if !numeric {
        return Err(StatsError::InvalidFactValue {
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Single-quote a string literal, doubling embedded quotes.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn flag(value: bool) -> &'static str {
    if value {
        "'1'"
    } else {
        "'0'"
    }
}

fn position_clause(position: &OneOrMany<String>) -> String {
    match position {
        OneOrMany::One(code) => format!("positionCode={}", quote(code)),
        OneOrMany::Many(codes) => {
            let alternatives: Vec<String> = codes
                .iter()
                .map(|code| format!("positionCode={}", quote(code)))
                .collect();
            format!("({})", alternatives.join(" or "))
        }
    }
}

/// Build `cayenneExp`.
///
/// # Examples
///
/// ```rust
/// use nhl_stats::core::expression::{compile_primary, PrimaryParams};
///
/// let params = PrimaryParams {
///     game_type: Some(2),
///     position: Some(vec!["C", "D"].into()),
///     ..PrimaryParams::for_season("20232024")
/// };
/// assert_eq!(
///     compile_primary(&params).unwrap(),
///     "seasonId=20232024 and gameTypeId=2 and (positionCode='C' or positionCode='D')"
/// );
/// ```
pub fn compile_primary(params: &PrimaryParams) -> Result<String> {
    let mut parts = vec![match params.selection_mode()? {
        SelectionMode::SeasonRange { start, end } => {
            format!("seasonId<={end} and seasonId>={start}")
        }
        SelectionMode::DateRange { start, end } => format!(
            "gameDate<={} and gameDate>={}",
            quote(&end.format("%Y-%m-%d").to_string()),
            quote(&start.format("%Y-%m-%d").to_string())
        ),
        SelectionMode::Season(season) => format!("seasonId={season}"),
    }];

    if let Some(id) = params.franchise_id {
        parts.push(format!("franchiseId={id}"));
    }
    if let Some(id) = params.opponent_franchise_id {
        parts.push(format!("opponentFranchiseId={id}"));
    }
    if let Some(home_road) = &params.home_or_road {
        parts.push(format!("homeRoad={}", quote(home_road)));
    }
    if let Some(result) = &params.game_result {
        parts.push(format!("decision={}", quote(result)));
    }
    if let Some(game_type) = params.game_type {
        parts.push(format!("gameTypeId={game_type}"));
    }
    if let Some(active) = params.is_active {
        parts.push(format!("active={}", flag(active)));
    }
    if let Some(position) = &params.position {
        parts.push(position_clause(position));
    }
    if let Some(hand) = &params.shoots_catches {
        parts.push(format!("shootsCatches={}", quote(hand)));
    }
    if let Some(name) = &params.player_name {
        parts.push(format!("skaterFullName likeIgnoreCase {}", quote(&format!("%{name}%"))));
    }
    if let Some(code) = &params.nationality_code {
        parts.push(format!("nationalityCode={}", quote(code)));
    }
    if let Some(code) = &params.birth_state_province_code {
        parts.push(format!("birthStateProvinceCode={}", quote(code)));
    }
    if let Some(round) = params.draft_round {
        parts.push(format!("draftRound={round}"));
    }
    if let Some(year) = &params.draft_year {
        parts.push(format!("draftYear={}", quote(year)));
    }
    if let Some(rookie) = params.is_rookie {
        parts.push(format!("isRookie={}", flag(rookie)));
    }
    if let Some(hof) = params.is_in_hall_of_fame {
        parts.push(format!("isInHallOfFame={}", flag(hof)));
    }

    Ok(parts.join(" and "))
}

/// Build `factCayenneExp`.
///
/// Property/comparator/value triples are zipped in lock-step and appended as
/// `and {property}{comparator}{value}`. The three lists must be the same
/// length, counting an unset list as empty. Properties must be identifiers and
/// values numeric.
pub fn compile_fact(params: &FactParams) -> Result<String> {
    let mut expression = format!("gamesPlayed>={}", params.min_gp);
    if let Some(max_gp) = params.max_gp {
        expression.push_str(&format!(" and gamesPlayed<={max_gp}"));
    }

    let properties = params
        .property
        .clone()
        .map(OneOrMany::into_vec)
        .unwrap_or_default();
    let comparators = params
        .comparator
        .clone()
        .map(OneOrMany::into_vec)
        .unwrap_or_default();
    let values = params
        .value
        .clone()
        .map(OneOrMany::into_vec)
        .unwrap_or_default();

    if properties.len() != comparators.len() || properties.len() != values.len() {
        return Err(StatsError::MismatchedFactArity {
            properties: properties.len(),
            comparators: comparators.len(),
            values: values.len(),
        });
    }

    for ((property, comparator), value) in properties.iter().zip(&comparators).zip(&values) {
        check_fact_property(property)?;
        if !FACT_COMPARATORS.contains(&comparator.as_str()) {
            return Err(StatsError::InvalidComparator {
                comparator: comparator.clone(),
            });
        }
        check_fact_value(value)?;
        expression.push_str(&format!(" and {property}{comparator}{value}"));
    }

    Ok(expression)
}
