//! Unit tests for error handling

use super::*;

#[cfg(test)]
mod stats_error_tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let stats_error = StatsError::from(json_error);

        match stats_error {
            StatsError::Decode(_) => (),
            _ => panic!("Expected Decode error variant"),
        }
    }

    #[test]
    fn test_invalid_view_path_lists_siblings() {
        let error = StatsError::InvalidViewPath {
            view: "data.totals".to_string(),
            segment: "totals".to_string(),
            available: vec!["data".to_string(), "total".to_string()],
        };

        let error_string = error.to_string();
        assert!(error_string.contains("Invalid view 'data.totals'"));
        assert!(error_string.contains("Field 'totals' not found"));
        assert!(error_string.contains("data, total"));
    }

    #[test]
    fn test_missing_selection_mode_message() {
        let error = StatsError::MissingSelectionMode;
        assert!(error.to_string().contains("No selection mode"));
    }

    #[test]
    fn test_invalid_date_format_message() {
        let error = StatsError::InvalidDateFormat {
            value: "2024/01/01".to_string(),
        };
        let error_string = error.to_string();
        assert!(error_string.contains("2024/01/01"));
        assert!(error_string.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_mismatched_sort_arity_message() {
        let error = StatsError::MismatchedSortArity {
            fields: 2,
            directions: 1,
        };
        let error_string = error.to_string();
        assert!(error_string.contains("(2)"));
        assert!(error_string.contains("(1)"));
    }

    #[test]
    fn test_mismatched_fact_arity_message() {
        let error = StatsError::MismatchedFactArity {
            properties: 2,
            comparators: 2,
            values: 1,
        };
        assert!(error.to_string().contains("same length"));
    }

    #[test]
    fn test_validation_classification() {
        assert!(StatsError::MissingSelectionMode.is_validation());
        assert!(StatsError::InvalidPageSize.is_validation());
        assert!(StatsError::InvalidSortDirection {
            direction: "UP".to_string()
        }
        .is_validation());

        assert!(StatsError::InvalidSeason {
            value: "2023 or 1=1".to_string()
        }
        .is_validation());
        assert!(StatsError::InvalidFactValue {
            value: "x".to_string()
        }
        .is_validation());

        let decode = StatsError::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert!(!decode.is_validation());
    }

    #[test]
    fn test_no_data_error() {
        let error = StatsError::NoData;
        assert_eq!(error.to_string(), "Stats API returned no data");
        assert!(!error.is_validation());
    }

    #[test]
    fn test_error_debug_format() {
        let error = StatsError::InvalidFieldPath {
            path: "a..b".to_string(),
        };
        let debug_string = format!("{:?}", error);
        assert!(debug_string.contains("InvalidFieldPath"));
        assert!(debug_string.contains("a..b"));
    }
}
