//! Report command implementation

use reqwest::Client;

use crate::{
    cli::{ExpressionArgs, RetryArgs, ShapingArgs},
    core::{FactParams, OneOrMany, PrimaryParams},
    stats::{base_url_from_env, fetch_report, ReportKey, ReportRequest},
    Result,
};

use super::common::{build_shaping, parse_sort, print_output, resolve_retry_policy};

/// Parameters for the report command
#[derive(Debug)]
pub struct ReportParams {
    pub key: ReportKey,
    pub report: String,
    pub expression: ExpressionArgs,
    pub shaping: ShapingArgs,
    pub retry: RetryArgs,
    pub limit: Option<usize>,
    pub start: Option<usize>,
    pub no_aggregate: bool,
    pub info: bool,
}

fn one_or_many(mut values: Vec<String>) -> Option<OneOrMany<String>> {
    match values.len() {
        0 => None,
        1 => values.pop().map(OneOrMany::One),
        _ => Some(OneOrMany::Many(values)),
    }
}

fn primary_params(args: &ExpressionArgs) -> PrimaryParams {
    PrimaryParams {
        season: args.season.clone(),
        start_season: args.start_season.clone(),
        end_season: args.end_season.clone(),
        start_date: args.start_date.clone(),
        end_date: args.end_date.clone(),
        franchise_id: args.franchise_id,
        opponent_franchise_id: args.opponent_franchise_id,
        home_or_road: args.home_or_road.clone(),
        game_result: args.game_result.clone(),
        game_type: Some(args.game_type),
        is_active: args.active,
        position: one_or_many(args.position.clone()),
        shoots_catches: args.shoots_catches.clone(),
        player_name: args.player_name.clone(),
        nationality_code: args.nationality_code.clone(),
        birth_state_province_code: args.birth_state_province_code.clone(),
        draft_round: args.draft_round,
        draft_year: args.draft_year.clone(),
        is_rookie: args.rookie,
        is_in_hall_of_fame: args.hall_of_fame,
    }
}

fn fact_params(args: &ExpressionArgs) -> FactParams {
    FactParams {
        min_gp: args.min_gp,
        max_gp: args.max_gp,
        property: one_or_many(args.property.clone()),
        comparator: one_or_many(args.comparator.clone()),
        value: one_or_many(args.value.clone()),
    }
}

/// Turn CLI parameters into a [`ReportRequest`]. `--sort` becomes the
/// server-side sort parameter; a `--start` asks for that single page.
pub fn build_request(params: &ReportParams) -> Result<ReportRequest> {
    let mut request = ReportRequest::new(
        params.key,
        params.report.clone(),
        primary_params(&params.expression),
    );
    request.fact = fact_params(&params.expression);
    request.sort = parse_sort(&params.shaping.sort, &params.shaping.direction)?;
    request.aggregate = !params.no_aggregate;
    request.return_info = params.info;
    request.shaping = build_shaping(&params.shaping, false)?;
    if let Some(limit) = params.limit {
        request.limit = limit;
    }
    if let Some(start) = params.start {
        request.start = start;
        request.return_all = false;
    }
    Ok(request)
}

/// Handle the report command
pub async fn handle_report(client: &Client, params: ReportParams) -> Result<()> {
    let policy = resolve_retry_policy(&params.retry)?;
    let request = build_request(&params)?;

    // tarpaulin::skip - HTTP call, tested via integration tests
    let result = fetch_report(client, &base_url_from_env(), &request, &policy).await?;
    print_output(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SortSpec;

    fn params(expression: ExpressionArgs) -> ReportParams {
        ReportParams {
            key: ReportKey::Skater,
            report: "summary".to_string(),
            expression,
            shaping: ShapingArgs::default(),
            retry: RetryArgs::default(),
            limit: None,
            start: None,
            no_aggregate: false,
            info: false,
        }
    }

    #[test]
    fn test_build_request_defaults() {
        let request = build_request(&params(ExpressionArgs {
            season: Some("20232024".to_string()),
            game_type: 2,
            ..ExpressionArgs::default()
        }))
        .unwrap();

        assert_eq!(request.limit, 100);
        assert!(request.return_all);
        assert!(request.aggregate);
        assert!(!request.return_info);
        assert!(request.sort.is_none());
        assert_eq!(request.primary.season.as_deref(), Some("20232024"));
        assert_eq!(request.primary.game_type, Some(2));
        assert!(request.primary.position.is_none());
        assert_eq!(request.fact.min_gp, 0);
        assert!(request.fact.property.is_none());
    }

    #[test]
    fn test_build_request_positions_and_facts() {
        let request = build_request(&params(ExpressionArgs {
            season: Some("20232024".to_string()),
            position: vec!["C".to_string(), "D".to_string()],
            property: vec!["goals".to_string()],
            comparator: vec![">=".to_string()],
            value: vec!["20".to_string()],
            ..ExpressionArgs::default()
        }))
        .unwrap();

        assert_eq!(
            request.primary.position,
            Some(OneOrMany::Many(vec!["C".to_string(), "D".to_string()]))
        );
        assert_eq!(request.fact.property, Some(OneOrMany::One("goals".to_string())));
        assert_eq!(request.fact.value, Some(OneOrMany::One("20".to_string())));
    }

    #[test]
    fn test_build_request_single_page_and_server_sort() {
        let mut p = params(ExpressionArgs {
            season: Some("20232024".to_string()),
            ..ExpressionArgs::default()
        });
        p.start = Some(200);
        p.limit = Some(25);
        p.no_aggregate = true;
        p.info = true;
        p.shaping.sort = vec!["points".to_string()];
        p.shaping.direction = vec!["DESC".to_string()];

        let request = build_request(&p).unwrap();
        assert!(!request.return_all);
        assert_eq!(request.start, 200);
        assert_eq!(request.limit, 25);
        assert!(!request.aggregate);
        assert!(request.return_info);
        assert_eq!(request.sort, Some(SortSpec::normalize("points", "DESC").unwrap()));
        assert!(request.shaping.sort.is_none());
    }

    #[test]
    fn test_build_request_team_limit() {
        let mut p = params(ExpressionArgs::default());
        p.key = ReportKey::Team;
        assert_eq!(build_request(&p).unwrap().limit, 50);
    }
}
