#![allow(clippy::unwrap_used)] // Tests can use unwrap() for simplicity
//! CLI integration tests
//!
//! Runs the `dossier` binary against temporary archives with assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const ARCHIVE: &str = "\
姓名,性别,出生年月,籍贯,现任职务,简历
Li Hua,F,1975.10,山东,处长,1995-1999 大学
Wang Wei,M,1980.01,,科员,
Wang Fang,F,,,,
";

fn dossier() -> Command {
    Command::cargo_bin("dossier").expect("Failed to find dossier binary")
}

fn write_archive(dir: &Path) -> PathBuf {
    let path = dir.join("archive.csv");
    std::fs::write(&path, ARCHIVE).unwrap();
    path
}

// ═══════════════════════════════════════════════════════════════════════════════
// names
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_names_lists_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path());
    dossier()
        .arg("names")
        .arg(&path)
        .assert()
        .success()
        .stdout("  1. Li Hua\n  2. Wang Fang\n  3. Wang Wei\n3 names\n");
}

#[test]
fn test_names_search() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path());
    dossier()
        .args(["names", "--search", "Wang"])
        .arg(&path)
        .assert()
        .success()
        .stdout("  1. Wang Fang\n  2. Wang Wei\n2 of 3 names match 'Wang'\n");
}

#[test]
fn test_names_without_identity_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "性别,民族\nF,汉族\n").unwrap();
    dossier()
        .arg("names")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No name column found"));
}

#[test]
fn test_names_unsupported_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("archive.xlsx");
    std::fs::write(&path, "not a table").unwrap();
    dossier()
        .arg("names")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported format"));
}

// ═══════════════════════════════════════════════════════════════════════════════
// show
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_show_all_views() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path());
    dossier()
        .arg("show")
        .arg(&path)
        .arg("Wang Wei")
        .assert()
        .success()
        .stdout(predicate::str::contains("== 基本信息 =="))
        .stdout(predicate::str::contains("== 工作信息 =="))
        .stdout(predicate::str::contains("== 完整档案 =="))
        .stdout(predicate::str::contains("籍贯    : not filled"))
        .stdout(predicate::str::contains("现任职务: 科员"));
}

#[test]
fn test_show_json_single_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path());
    let output = dossier()
        .arg("show")
        .arg(&path)
        .arg("Li Hua")
        .args(["--view", "work", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["kind"], "work");
    assert_eq!(json["sections"][0]["entries"][0]["label"], "现任职务");
    assert_eq!(json["sections"][0]["entries"][0]["value"], "处长");
    assert_eq!(json["sections"][0]["entries"][0]["filled"], true);
}

#[test]
fn test_show_full_view_skips_blank() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sparse.csv");
    std::fs::write(&path, "姓名,性别\nLi Hua,\n").unwrap();
    dossier()
        .arg("show")
        .arg(&path)
        .arg("Li Hua")
        .args(["--view", "full"])
        .assert()
        .success()
        .stdout(predicate::str::contains("姓名: Li Hua"))
        .stdout(predicate::str::contains("性别").not());
}

#[test]
fn test_show_unknown_name_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path());
    dossier()
        .arg("show")
        .arg(&path)
        .arg("Zhang San")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No record found for 'Zhang San'"));
}

#[test]
fn test_show_with_config_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path());
    let config = dir.path().join("dossier.toml");
    std::fs::write(&config, "placeholder = \"未填写\"\n").unwrap();
    dossier()
        .arg("--config")
        .arg(&config)
        .arg("show")
        .arg(&path)
        .arg("Wang Fang")
        .args(["--view", "basic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("出生年月: 未填写"));
}

#[test]
fn test_show_strict_config_rejects_partial_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path());
    let config = dir.path().join("dossier.toml");
    std::fs::write(&config, "strict_views = true\n").unwrap();
    dossier()
        .arg("--config")
        .arg(&config)
        .arg("show")
        .arg(&path)
        .arg("Li Hua")
        .assert()
        .failure()
        .stderr(predicate::str::contains("references unknown columns"));
}

// ═══════════════════════════════════════════════════════════════════════════════
// columns / sheets
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_columns_reports_identity_and_coverage() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path());
    dossier()
        .arg("columns")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Identity column: 姓名"))
        .stdout(predicate::str::contains("Columns (6):"))
        .stdout(predicate::str::contains("View basic: 5/16 columns present"))
        .stdout(predicate::str::contains("View work: 1/7 columns present"));
}

#[test]
fn test_sheet_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("档案清单.csv"), ARCHIVE).unwrap();
    dossier()
        .arg("names")
        .arg(dir.path())
        .args(["--sheet", "档案清单"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Li Hua"));
}

// ═══════════════════════════════════════════════════════════════════════════════
// browse
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_browse_starts_and_quits() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path());
    dossier()
        .arg("browse")
        .arg(&path)
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 names indexed"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_browse_handles_eof() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path());
    dossier()
        .arg("browse")
        .arg(&path)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_browse_search_select_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path());
    dossier()
        .arg("browse")
        .arg(&path)
        .write_stdin("search Wang\nselect #2\nview work\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 of 3 names match 'Wang'"))
        .stdout(predicate::str::contains("# Wang Wei"))
        .stdout(predicate::str::contains("现任职务: 科员"));
}

#[test]
fn test_browse_unknown_command_continues() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(dir.path());
    dossier()
        .arg("browse")
        .arg(&path)
        .write_stdin("dance\nlist\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command"))
        .stdout(predicate::str::contains("3 names"));
}
