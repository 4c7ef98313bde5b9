mod common;

use std::path::Path;

use common::{BALANCE_SHEET, INCOME_BY_YEAR, fixture_path, statement_from_csv};
use encoding_rs::UTF_8;
use finquery::{
    engine::QueryEngine,
    error::LoadError,
    normalize::{detect_orientation, load_statement, normalize},
    raw::{RawTable, ReadOptions},
    statement::{Orientation, PERIOD_COLUMN},
};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn balance_sheet_fixture_is_transposed() {
    let statement = load_statement(&fixture_path(BALANCE_SHEET), ReadOptions::default())
        .expect("load balance sheet");

    assert_eq!(statement.orientation(), Orientation::MetricsInRows);
    assert_eq!(statement.period_label(), PERIOD_COLUMN);
    assert_eq!(
        statement.periods().collect::<Vec<_>>(),
        vec!["2019-09-28", "2020-09-26", "2021-09-25", "2022-09-24"]
    );
    assert_eq!(statement.metrics().len(), 10);
    assert_eq!(statement.metrics()[0], "Total Revenue");
    assert_eq!(statement.metrics()[9], "Goodwill");

    let revenue = statement.metric_index("Total Revenue").unwrap();
    assert_eq!(
        statement.series(revenue).collect::<Vec<_>>(),
        vec![
            Some(260_174.0),
            Some(274_515.0),
            Some(365_817.0),
            Some(394_328.0)
        ]
    );
}

#[test]
fn accounting_negatives_and_placeholders_are_coerced_per_cell() {
    let statement = load_statement(&fixture_path(BALANCE_SHEET), ReadOptions::default())
        .expect("load balance sheet");

    let oci = statement.metric_index("Other Comprehensive Income").unwrap();
    assert_eq!(
        statement.series(oci).collect::<Vec<_>>(),
        vec![Some(-584.0), Some(-406.0), Some(163.0), Some(-11_109.0)]
    );

    let goodwill = statement.metric_index("Goodwill").unwrap();
    assert!(statement.series(goodwill).all(|value| value.is_none()));

    let report = statement.load_report();
    assert_eq!(report.null_cells, 4);
    assert_eq!(report.periods, 4);
}

#[test]
fn trailing_empty_period_column_is_pruned() {
    let statement = load_statement(&fixture_path(BALANCE_SHEET), ReadOptions::default())
        .expect("load balance sheet");
    assert_eq!(statement.load_report().pruned_columns, strings(&["Unnamed: 5"]));
    assert!(statement.periods().all(|period| !period.starts_with("Unnamed")));
}

#[test]
fn transposed_periods_match_header_and_metrics_match_first_column() {
    let statement = statement_from_csv(
        "Metric,2020-12-31,2021-12-31,2022-12-31\n\
         Revenue,1,2,3\n\
         Cash,4,5,6\n",
    );

    assert_eq!(
        statement.periods().collect::<Vec<_>>(),
        vec!["2020-12-31", "2021-12-31", "2022-12-31"]
    );
    assert_eq!(statement.metrics(), &strings(&["Revenue", "Cash"])[..]);
    assert_eq!(statement.records()[1].values, vec![Some(2.0), Some(5.0)]);
}

#[test]
fn transposed_rows_without_labels_are_dropped_and_duplicates_renamed() {
    let statement = statement_from_csv(
        "Item,2020-01-01,2021-01-01\n\
         ,1,2\n\
         Other,3,4\n\
         Other,5,6\n",
    );
    assert_eq!(statement.metrics(), &strings(&["Other", "Other.1"])[..]);
    assert_eq!(statement.records()[0].values, vec![Some(3.0), Some(5.0)]);
}

#[test]
fn periods_in_rows_table_keeps_existing_year_column() {
    let statement = load_statement(&fixture_path(INCOME_BY_YEAR), ReadOptions::default())
        .expect("load income");

    assert_eq!(statement.orientation(), Orientation::PeriodsInRows);
    assert_eq!(statement.period_label(), "Year");
    assert_eq!(
        statement.metrics(),
        &strings(&["Revenue", "Cost of Revenue", "Gross Profit"])[..]
    );
    assert_eq!(
        statement.records()[2].values,
        vec![Some(90.0), Some(-10.0), Some(100.0)]
    );
}

#[test]
fn first_column_becomes_year_when_no_period_column_exists() {
    let statement = statement_from_csv("Fiscal,Total Revenue\nFY2020,10\nFY2021,12\n");
    assert_eq!(statement.period_label(), PERIOD_COLUMN);
    assert_eq!(statement.metrics(), &strings(&["Total Revenue"])[..]);
    assert_eq!(statement.periods().collect::<Vec<_>>(), vec!["FY2020", "FY2021"]);
}

#[test]
fn blank_rows_are_skipped_in_periods_in_rows_tables() {
    let statement = statement_from_csv("Year,Cash\n2020,1\n,\n2021,2\n");
    assert_eq!(statement.len(), 2);
}

#[test]
fn normalizing_a_normalized_table_is_a_no_op() {
    for fixture in [BALANCE_SHEET, INCOME_BY_YEAR] {
        let first = load_statement(&fixture_path(fixture), ReadOptions::default())
            .expect("load fixture");
        let raw = RawTable::new(first.headers(), first.to_string_rows()).expect("raw copy");
        assert_eq!(detect_orientation(&raw.headers), Orientation::PeriodsInRows);

        let second = normalize(&raw).expect("renormalize");
        assert_eq!(second.headers(), first.headers());
        assert_eq!(second.records(), first.records());
    }
}

#[test]
fn repeated_periods_fail_the_load() {
    let raw = RawTable::from_reader("Year,Cash\n2020,1\n2020,2\n".as_bytes(), b',', UTF_8)
        .expect("raw");
    let err = normalize(&raw).unwrap_err();
    assert!(matches!(err, LoadError::DuplicatePeriod(period) if period == "2020"));
}

#[test]
fn empty_input_is_a_load_error() {
    let err = RawTable::from_reader("".as_bytes(), b',', UTF_8).unwrap_err();
    assert!(matches!(err, LoadError::Empty));
}

#[test]
fn rows_wider_than_the_header_are_rejected() {
    let err = RawTable::from_reader("Year,Cash\n2020,1,5\n".as_bytes(), b',', UTF_8).unwrap_err();
    assert!(matches!(err, LoadError::RaggedRow { row: 2, .. }));
}

#[test]
fn missing_file_is_reported_with_its_path() {
    let err = load_statement(Path::new("does/not/exist.csv"), ReadOptions::default())
        .unwrap_err();
    match err {
        LoadError::Io { path, .. } => assert_eq!(path, Path::new("does/not/exist.csv")),
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn semicolon_delimited_statements_load_with_override() {
    let workspace = common::TestWorkspace::new();
    let path = workspace.write("statement.txt", "Item;2020-01-01;2021-01-01\nCash;\"1,5\";2\n");
    let statement = load_statement(
        &path,
        ReadOptions {
            delimiter: Some(b';'),
            encoding: UTF_8,
        },
    )
    .expect("load semicolon statement");
    assert_eq!(statement.records()[0].values, vec![Some(15.0)]);
}

#[test]
fn hyphenated_metric_names_keep_periods_in_rows() {
    let statement = statement_from_csv("Year,Pre-tax Income,Long-term Debt\n2020,10,5\n2021,20,6\n");

    assert_eq!(statement.orientation(), Orientation::PeriodsInRows);
    assert_eq!(
        statement.headers(),
        strings(&["Year", "Pre-tax Income", "Long-term Debt"])
    );

    let engine = QueryEngine::new(statement);
    let result = engine.answer("show me income");
    let projection = result.projection().expect("income series");
    assert_eq!(projection.columns, strings(&["Pre-tax Income"]));
    assert_eq!(projection.column("Pre-tax Income"), Some(vec![Some(10.0), Some(20.0)]));
}

#[test]
fn renormalizing_hyphenated_metrics_does_not_flip_back() {
    let first = statement_from_csv(
        ",2020-12-31,2021-12-31\nPre-tax Income,10,20\nLong-term Debt,5,6\n",
    );
    assert_eq!(
        first.headers(),
        strings(&["Year", "Pre-tax Income", "Long-term Debt"])
    );

    let raw = RawTable::new(first.headers(), first.to_string_rows()).expect("raw copy");
    assert_eq!(detect_orientation(&raw.headers), Orientation::PeriodsInRows);
    let second = normalize(&raw).expect("renormalize");
    assert_eq!(second.headers(), first.headers());
    assert_eq!(second.records(), first.records());
}
