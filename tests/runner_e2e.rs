// tests/runner_e2e.rs
use std::fs;
use std::path::{Path, PathBuf};

use follow_benford::config::AppOptions;
use follow_benford::dataset::{self, Dataset};
use follow_benford::error::Error;
use follow_benford::model::{Measurement, Reason};
use follow_benford::progress::ConsoleProgress;
use follow_benford::report::CHART_SIZE;
use follow_benford::runner::{self, Phase};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("follow_benford_e2e_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn profile_page(followers: &str) -> String {
    format!(
        r#"<html><head><meta property="og:description" content="{followers} Followers, 10 Following, 3 Posts - See photos"></head><body></body></html>"#
    )
}

/// Captures for target `me`: five measurable profiles, one private, one never captured.
fn write_captures(dir: &Path) {
    let handles = ["ana", "bea", "cal", "dov", "eli", "pri", "zed"];
    let dialog: String = handles.iter().map(|h| format!(r#"<a href="/{h}/">{h}</a>"#)).collect();
    fs::write(dir.join("me_following.html"), format!("<div role=dialog>{dialog}</div>")).unwrap();

    for (h, n) in [("ana", "15"), ("bea", "152"), ("cal", "9"), ("dov", "23"), ("eli", "1")] {
        fs::write(dir.join(format!("{h}.html")), profile_page(n)).unwrap();
    }
    fs::write(dir.join("pri.html"), "<h2>This account is private</h2>").unwrap();
}

fn options(root: &Path) -> AppOptions {
    let mut o = AppOptions::new("me");
    o.captures_dir = root.join("captures");
    o.out_dir = root.join("out");
    fs::create_dir_all(&o.captures_dir).unwrap();
    write_captures(&o.captures_dir);
    o
}

#[test]
fn phases_one_two_three() {
    let root = tmp_dir("phases");
    let opts = options(&root);

    let s1 = runner::run_phase(Phase::Collect, &opts, None, Vec::new()).unwrap();
    assert_eq!(s1.files_written, vec![opts.following_list_path()]);
    assert_eq!(dataset::load_usernames(&opts.following_list_path()).unwrap().len(), 7);

    let mut progress = ConsoleProgress::new(Vec::new());
    let s2 = runner::run_phase(Phase::Enrich, &opts, Some(&mut progress), Vec::new()).unwrap();
    assert_eq!(s2.files_written, vec![opts.profile_data_path()]);
    let lines = String::from_utf8(progress.into_inner()).unwrap();
    assert!(lines.contains("Processing 7/7: @zed"));

    let records = dataset::load_profiles(&opts.profile_data_path()).unwrap();
    let by_name = |n: &str| records.iter().find(|r| r.username == n).unwrap().followers.clone();
    assert_eq!(by_name("bea"), Measurement::Measured("152".into()));
    assert_eq!(by_name("pri"), Measurement::Unmeasurable(Reason::Private));
    assert_eq!(by_name("zed"), Measurement::Unmeasurable(Reason::NotFound));

    let mut out = Vec::new();
    let s3 = runner::run_phase(Phase::Analyze, &opts, None, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("60.00%"));
    assert!(text.contains("Valid counts: 5"));

    let cmp = s3.comparison.unwrap();
    let observed: Vec<f64> = cmp.rows.iter().map(|r| r.observed).collect();
    assert_eq!(observed, vec![60.0, 20.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 20.0]);
    assert_eq!(s3.files_written, vec![opts.chart_path()]);
    let img = image::open(opts.chart_path()).unwrap();
    assert_eq!((img.width(), img.height()), CHART_SIZE);
}

#[test]
fn analysis_requires_profile_data() {
    let root = tmp_dir("prereq");
    let opts = options(&root);
    let err = runner::run_phase(Phase::Analyze, &opts, None, Vec::new()).unwrap_err();
    match err {
        Error::MissingPrerequisite { phase, path } => {
            assert_eq!(phase, 3);
            assert_eq!(path, opts.profile_data_path());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn dataset_without_valid_counts_writes_no_chart() {
    let root = tmp_dir("novalid");
    let input = root.join("data.csv");
    fs::write(&input, "username,seguidores\nana,PRIVADA\nbob,\ncam,0\n").unwrap();
    let chart = root.join("chart.png");

    let mut out = Vec::new();
    let cmp = runner::analyze_file(
        &input,
        &follow_benford::analysis::ReferenceDistribution::benford(),
        &chart,
        &mut out,
    )
    .unwrap();
    assert!(cmp.is_none());
    assert!(!chart.exists());
    assert!(String::from_utf8(out).unwrap().contains("No data to analyze"));
}

#[test]
fn input_override_and_missing_column() {
    let root = tmp_dir("override");
    let mut opts = options(&root);
    let input = root.join("other.csv");
    fs::write(&input, "username,bio\nana,hi\n").unwrap();
    opts.input = Some(input.clone());

    let err = runner::run_phase(Phase::Analyze, &opts, None, Vec::new()).unwrap_err();
    assert!(matches!(err, Error::Dataset(_)));
    assert!(Dataset::load(&input).unwrap().follower_column().is_err());
}

#[test]
fn spreadsheet_input_is_analysed() {
    let root = tmp_dir("xlsx_input");
    let mut opts = options(&root);
    opts.input = Some(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/legacy_profiles.xlsx"));

    let mut out = Vec::new();
    let summary = runner::run_phase(Phase::Analyze, &opts, None, &mut out).unwrap();
    let cmp = summary.comparison.unwrap();
    assert_eq!(cmp.total, 3);
    assert_eq!(cmp.rows[0].observed, 100.0);
    assert!(String::from_utf8(out).unwrap().contains("Valid counts: 3"));
}
