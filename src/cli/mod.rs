//! CLI argument definitions and parsing.

use clap::{Args, Parser, Subcommand};

use crate::stats::ReportKey;

/// Retry settings; unset flags fall back to `NHL_STATS_*` env vars, then defaults.
#[derive(Debug, Default, Args)]
pub struct RetryArgs {
    /// Per-attempt timeout in seconds (default 10).
    #[clap(long)]
    pub timeout: Option<u64>,

    /// Total attempts per request (default 3).
    #[clap(long)]
    pub retries: Option<u32>,

    /// Base backoff in milliseconds, doubled after each failed attempt (default 300).
    #[clap(long)]
    pub backoff_ms: Option<u64>,
}

/// Post-processing applied to the returned records.
#[derive(Debug, Default, Args)]
pub struct ShapingArgs {
    /// Keep records matching `field=value` (repeatable, ANDed). Values are parsed
    /// as JSON when possible: `-f gp=10`, `-f positionCode='["C","D"]'`, `-f deathDate=null`.
    #[clap(long = "filter", short = 'f')]
    pub filters: Vec<String>,

    /// Drop records matching `field=value` (same syntax as --filter).
    #[clap(long = "exclude", short = 'x')]
    pub excludes: Vec<String>,

    /// Sort field(s), most significant first: `--sort points --sort goals`.
    #[clap(long = "sort")]
    pub sort: Vec<String>,

    /// Sort direction(s) (`ASC`/`DESC`), paired positionally with --sort.
    #[clap(long = "direction")]
    pub direction: Vec<String>,

    /// Keep only these top-level fields of each record (repeatable).
    #[clap(long = "field")]
    pub fields: Vec<String>,

    /// Drill into the result, `.` separated: `--view data`.
    #[clap(long)]
    pub view: Option<String>,

    /// Fail on a view path that does not exist instead of printing null.
    #[clap(long)]
    pub strict_view: bool,
}

/// Parameters compiled into `cayenneExp` / `factCayenneExp`.
#[derive(Debug, Default, Args)]
pub struct ExpressionArgs {
    /// Single season, e.g. 20232024.
    #[clap(long)]
    pub season: Option<String>,

    /// First season of a range (requires --end-season).
    #[clap(long)]
    pub start_season: Option<String>,

    /// Last season of a range (requires --start-season).
    #[clap(long)]
    pub end_season: Option<String>,

    /// First game date, YYYY-MM-DD (requires --end-date).
    #[clap(long)]
    pub start_date: Option<String>,

    /// Last game date, YYYY-MM-DD (requires --start-date).
    #[clap(long)]
    pub end_date: Option<String>,

    /// 1 preseason, 2 regular season, 3 playoffs, 4 all-star.
    #[clap(long, default_value_t = 2)]
    pub game_type: u8,

    #[clap(long)]
    pub franchise_id: Option<u32>,

    #[clap(long)]
    pub opponent_franchise_id: Option<u32>,

    /// H for home, R for road.
    #[clap(long)]
    pub home_or_road: Option<String>,

    /// W, L or O.
    #[clap(long)]
    pub game_result: Option<String>,

    /// Position code(s) (repeatable): `-p C -p D`.
    #[clap(long, short = 'p')]
    pub position: Vec<String>,

    /// Case-insensitive substring of the player's full name.
    #[clap(long, short = 'n')]
    pub player_name: Option<String>,

    #[clap(long)]
    pub nationality_code: Option<String>,

    #[clap(long)]
    pub birth_state_province_code: Option<String>,

    /// L or R.
    #[clap(long)]
    pub shoots_catches: Option<String>,

    #[clap(long)]
    pub draft_round: Option<u32>,

    #[clap(long)]
    pub draft_year: Option<String>,

    #[clap(long)]
    pub rookie: Option<bool>,

    #[clap(long)]
    pub active: Option<bool>,

    #[clap(long)]
    pub hall_of_fame: Option<bool>,

    /// Minimum games played.
    #[clap(long, default_value_t = 0)]
    pub min_gp: u32,

    /// Maximum games played.
    #[clap(long)]
    pub max_gp: Option<u32>,

    /// Fact property (repeatable), paired with --comparator and --value.
    #[clap(long)]
    pub property: Vec<String>,

    /// Fact comparator (repeatable): >=, <=, =, >, <, !=.
    #[clap(long)]
    pub comparator: Vec<String>,

    /// Fact value (repeatable).
    #[clap(long)]
    pub value: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// GET any stats API URL and shape the response.
    Fetch {
        /// Full URL to request.
        url: String,

        #[clap(flatten)]
        shaping: ShapingArgs,

        #[clap(flatten)]
        retry: RetryArgs,
    },

    /// Run a bulk statistics report (`{key}/{report}`), paging through all results.
    Report {
        /// skater, goalie or team.
        key: ReportKey,

        /// Report name, e.g. summary, realtime, faceoffwins.
        report: String,

        #[clap(flatten)]
        expression: ExpressionArgs,

        #[clap(flatten)]
        shaping: ShapingArgs,

        #[clap(flatten)]
        retry: RetryArgs,

        /// Page size (default 100 for skaters/goalies, 50 for teams).
        #[clap(long)]
        limit: Option<usize>,

        /// Fetch one page starting here instead of every page.
        #[clap(long)]
        start: Option<usize>,

        /// Per-game rows instead of aggregates over the selection.
        #[clap(long)]
        no_aggregate: bool,

        /// Wrap output with the request path, view, fields and sort.
        #[clap(long)]
        info: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "nhl-stats", about = "NHL stats API query tool")]
pub struct NhlStats {
    #[clap(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fetch_command() {
        let app = NhlStats::try_parse_from([
            "nhl-stats",
            "fetch",
            "https://api.nhle.com/stats/rest/en/franchise",
            "--filter",
            "id=5",
            "--sort",
            "fullName",
            "--direction",
            "ASC",
            "--view",
            "data",
            "--retries",
            "5",
        ])
        .unwrap();

        match app.command {
            Commands::Fetch {
                url,
                shaping,
                retry,
            } => {
                assert!(url.ends_with("/franchise"));
                assert_eq!(shaping.filters, vec!["id=5"]);
                assert_eq!(shaping.sort, vec!["fullName"]);
                assert_eq!(shaping.view.as_deref(), Some("data"));
                assert!(!shaping.strict_view);
                assert_eq!(retry.retries, Some(5));
                assert_eq!(retry.timeout, None);
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn test_parse_report_command() {
        let app = NhlStats::try_parse_from([
            "nhl-stats", "report", "skater", "summary", "--season", "20232024", "-p", "C", "-p",
            "D", "--min-gp", "10", "--property", "goals", "--comparator", ">=", "--value", "20",
            "--start", "100",
        ])
        .unwrap();

        match app.command {
            Commands::Report {
                key,
                report,
                expression,
                start,
                limit,
                ..
            } => {
                assert_eq!(key, ReportKey::Skater);
                assert_eq!(report, "summary");
                assert_eq!(expression.season.as_deref(), Some("20232024"));
                assert_eq!(expression.game_type, 2);
                assert_eq!(expression.position, vec!["C", "D"]);
                assert_eq!(expression.min_gp, 10);
                assert_eq!(expression.comparator, vec![">="]);
                assert_eq!(start, Some(100));
                assert_eq!(limit, None);
            }
            _ => panic!("expected report"),
        }
    }

    #[test]
    fn test_parse_report_rejects_unknown_key() {
        assert!(NhlStats::try_parse_from(["nhl-stats", "report", "referee", "summary"]).is_err());
    }
}
