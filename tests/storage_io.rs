mod common;

use kaggle_insights::DataError;
use kaggle_insights::models::{CountryMetric, Region};
use kaggle_insights::storage;
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_fixture_tables() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path());

    let users = storage::load_users(dir.path().join("users_clean.csv")).unwrap();
    assert_eq!(users.len(), 7);
    assert_eq!(users[1].country, "United States of America");

    // leading unnamed index column is ignored
    let metrics = storage::load_medal_efficiency(dir.path().join("medal_efficiency.csv")).unwrap();
    assert_eq!(metrics.len(), 5);
    assert_eq!(metrics[0], CountryMetric::new("Japan", 50.0));
    assert!(metrics.iter().all(|m| m.region == Region::Unknown));

    let trends = storage::load_token_trends(dir.path().join("notebook_token_trends.csv")).unwrap();
    assert_eq!(trends.len(), 4);
    assert_eq!(trends[0].year, 2020);
    assert_eq!(trends[0].notebook_length, 5.5);

    let tools = storage::load_wide(dir.path().join("popular_tools.csv")).unwrap();
    assert_eq!(tools.columns, vec!["pandas", "numpy"]);
    assert_eq!(tools.rows[1].values, vec![4.0, 0.0]);
}

#[test]
fn missing_file_is_reported() {
    let dir = tempdir().unwrap();
    let err = storage::load_users(dir.path().join("users_clean.csv")).unwrap_err();
    assert!(matches!(err, DataError::MissingInput { .. }));
    assert!(err.to_string().contains("users_clean.csv"));
}

#[test]
fn missing_column_is_reported() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("medal_efficiency.csv");
    fs::write(&p, "Country,Score\nJapan,1.0\n").unwrap();
    match storage::load_medal_efficiency(&p).unwrap_err() {
        DataError::MissingColumn { column, .. } => assert_eq!(column, "MedalEfficiency"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_numeric_cell_is_reported_with_line() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("medal_efficiency.csv");
    fs::write(&p, "Country,MedalEfficiency\nJapan,1.0\nFrance,lots\n").unwrap();
    match storage::load_medal_efficiency(&p).unwrap_err() {
        DataError::InvalidNumber {
            column, line, value, ..
        } => {
            assert_eq!(column, "MedalEfficiency");
            assert_eq!(line, 3);
            assert_eq!(value, "lots");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn negative_efficiency_is_rejected() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("medal_efficiency.csv");
    fs::write(&p, "Country,MedalEfficiency\nJapan,0.0\nFrance,-2.5\n").unwrap();
    match storage::load_medal_efficiency(&p).unwrap_err() {
        DataError::InvalidNumber { line, value, .. } => {
            assert_eq!(line, 3);
            assert_eq!(value, "-2.5");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn float_years_are_accepted() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("trends.csv");
    fs::write(&p, "Country,Year,NotebookLength\nIndia,2019.0,4.5\n").unwrap();
    let trends = storage::load_token_trends(&p).unwrap();
    assert_eq!(trends[0].year, 2019);

    fs::write(&p, "Country,Year,NotebookLength\nIndia,2019.5,4.5\n").unwrap();
    assert!(matches!(
        storage::load_token_trends(&p).unwrap_err(),
        DataError::InvalidNumber { .. }
    ));
}

#[test]
fn csv_export_guards_formulas() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("out.csv");
    let rows = vec![
        CountryMetric {
            country: "=HYPERLINK(\"x\")".into(),
            medal_efficiency: 1.0,
            region: Region::Unknown,
        },
        CountryMetric {
            country: "Japan".into(),
            medal_efficiency: 2.5,
            region: Region::Asia,
        },
    ];
    storage::save_csv(&rows, &p).unwrap();

    let mut rdr = csv::Reader::from_path(&p).unwrap();
    let got: Vec<Vec<String>> = rdr
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    assert_eq!(got[0][0], "'=HYPERLINK(\"x\")");
    assert_eq!(got[1], vec!["Japan", "2.5", "Asia"]);
}

#[test]
fn json_export_round_trips_rows() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("out.json");
    let rows = vec![CountryMetric {
        country: "Brazil".into(),
        medal_efficiency: 7.0,
        region: Region::SouthAmerica,
    }];
    storage::save_json(&rows, &p).unwrap();
    let back: Vec<CountryMetric> = serde_json::from_str(&fs::read_to_string(&p).unwrap()).unwrap();
    assert_eq!(back, rows);
}
