mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn kgi() -> Command {
    let mut cmd = Command::cargo_bin("kgi").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() {
    let mut cmd = kgi();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("kgi"));
}

#[test]
fn summary_over_fixture() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path());
    let mut cmd = kgi();
    cmd.arg("--data-dir").arg(dir.path()).arg("summary");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Top 15 Countries by Kaggle Users"))
        .stdout(predicate::str::contains(
            "France (Europe) is the most medal-efficient country with a score of 80.00",
        ))
        .stdout(predicate::str::contains("https://flagcdn.com/w80/fr.png"));
}

#[test]
fn summary_with_region_filter() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path());
    let mut cmd = kgi();
    cmd.arg("--data-dir")
        .arg(dir.path())
        .args(["summary", "--regions", "Asia"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Japan (Asia)"));
}

#[test]
fn summary_reports_empty_selection() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path());
    let mut cmd = kgi();
    cmd.arg("--data-dir")
        .arg(dir.path())
        .args(["summary", "--min-eff", "90"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No countries match the selected filters."));
}

#[test]
fn unknown_region_is_rejected() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path());
    let mut cmd = kgi();
    cmd.arg("--data-dir")
        .arg(dir.path())
        .args(["summary", "--regions", "Atlantis"]);
    cmd.assert().failure();
}

#[test]
fn regions_lists_available_regions() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path());
    let mut cmd = kgi();
    cmd.arg("--data-dir").arg(dir.path()).arg("regions");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("North America"))
        .stdout(predicate::str::contains("Unknown"))
        .stdout(predicate::str::contains("MedalEfficiency range: 3.00 .. 80.00"));
}

#[test]
fn export_writes_every_format() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path());
    let out = tempdir().unwrap();
    let csv = out.path().join("eff.csv");
    let json = out.path().join("eff.json");
    let txt = out.path().join("eff.txt");
    let view = out.path().join("view.json");

    let mut cmd = kgi();
    cmd.arg("--data-dir")
        .arg(dir.path())
        .args(["export", "--regions", "Asia;Europe"])
        .arg("--csv")
        .arg(&csv)
        .arg("--json")
        .arg(&json)
        .arg("--txt")
        .arg(&txt)
        .arg("--view")
        .arg(&view);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Saved 3 rows"));

    let csv_txt = fs::read_to_string(&csv).unwrap();
    assert_eq!(
        csv_txt,
        "Country,MedalEfficiency,Region\nJapan,50.0,Asia\nFrance,80.0,Europe\nIndia,12.5,Asia\n"
    );

    let rows: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 3);
    assert_eq!(rows[1]["Country"], "France");

    let txt = fs::read_to_string(&txt).unwrap();
    assert_eq!(txt.lines().count(), 4);
    assert!(txt.contains("12.50"));

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&view).unwrap()).unwrap();
    assert_eq!(v["most_efficient"]["country"], "France");
    assert!(v["top_users"].as_array().unwrap().len() >= 2);
}

#[test]
fn export_needs_a_target() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path());
    let mut cmd = kgi();
    cmd.arg("--data-dir").arg(dir.path()).arg("export");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("nothing to export"));
}

#[test]
fn missing_data_dir_fails_cleanly() {
    let dir = tempdir().unwrap();
    let mut cmd = kgi();
    cmd.arg("--data-dir")
        .arg(dir.path().join("nope"))
        .arg("summary");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("required input not found"));
}

#[test]
fn plot_writes_svgs() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path());
    let out = tempdir().unwrap();
    let mut cmd = kgi();
    cmd.arg("--data-dir")
        .arg(dir.path())
        .arg("plot")
        .arg("--out-dir")
        .arg(out.path());
    cmd.assert().success();
    for name in ["top_users.svg", "token_trends.svg", "keywords.svg", "tools.svg"] {
        let svg = fs::read_to_string(out.path().join(name)).unwrap();
        assert!(svg.contains("<svg"), "{name}");
    }
}

#[test]
fn flag_prints_url_or_notice() {
    let mut cmd = kgi();
    cmd.args(["flag", "Japan"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("https://flagcdn.com/w80/jp.png"));

    let mut cmd = kgi();
    cmd.args(["flag", "Other"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("no flag for 'Other'"));
}

#[test]
fn config_file_sets_limits() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path());
    let cfg = dir.path().join("kgi.toml");
    fs::write(
        &cfg,
        format!("data_dir = {:?}\ntop_users = 1\n", dir.path().display().to_string()),
    )
    .unwrap();
    let mut cmd = kgi();
    cmd.arg("--config").arg(&cfg).arg("summary");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Top 1 Countries by Kaggle Users"))
        .stdout(predicate::str::contains(" 1. India"));
}
