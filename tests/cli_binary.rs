mod common;

use assert_cmd::Command;
use common::Fixture;
use predicates::prelude::*;

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin("competitor-report").unwrap()
}

// --- Help & version ---

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("IDENTIFIER"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("competitor-report"));
}

// --- Missing required args ---

#[test]
fn missing_identifier() {
    cmd()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("IDENTIFIER"));
}

// --- Successful runs ---

#[test]
fn software_name_prints_complete() {
    let fx = Fixture::standard();
    cmd()
        .current_dir(fx.path())
        .arg("Acme CRM")
        .assert()
        .success()
        .stdout(predicate::str::diff("complete\n"));
    let value = fx.read_output();
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn explicit_paths_and_kind() {
    let fx = Fixture::standard();
    let out = fx.path().join("reports").join("crm.json");
    cmd()
        .current_dir(fx.path())
        .args([
            "CRM",
            "--kind",
            "job_title",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete"));
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value[0]["Engineer"], 0.5);
    assert!(!fx.output().exists());
}

#[test]
fn config_file_in_working_directory() {
    let fx = Fixture::standard();
    std::fs::write(
        fx.path().join(".competitor-report.toml"),
        "kind = \"job_title\"\nrequire_business = false\noutput = \"out.json\"\n",
    )
    .unwrap();
    cmd().current_dir(fx.path()).arg("CRM").assert().success();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(fx.path().join("out.json")).unwrap())
            .unwrap();
    assert_eq!(value[0]["Director"], 0.33);
}

// --- Invalid input ---

#[test]
fn unknown_identifier_rejected() {
    let fx = Fixture::standard();
    cmd()
        .current_dir(fx.path())
        .arg("Nope CRM")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("complete").not())
        .stderr(predicate::str::contains("wrong input: Nope CRM"));
    assert!(!fx.output().exists());
}

#[test]
fn unsupported_kind_rejected() {
    let fx = Fixture::standard();
    cmd()
        .current_dir(fx.path())
        .args(["CRM", "--kind", "region"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unsupported kind: region"));
    assert!(!fx.output().exists());
}

#[test]
fn invalid_toml_config() {
    let fx = Fixture::standard();
    std::fs::write(fx.path().join(".competitor-report.toml"), "not valid {{{{ toml").unwrap();
    cmd()
        .current_dir(fx.path())
        .arg("CRM")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("config parse error"));
}

#[test]
fn config_file_not_found() {
    let fx = Fixture::standard();
    cmd()
        .current_dir(fx.path())
        .args(["CRM", "--config", "/nonexistent.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("config file not found"));
}

// --- Dataset errors ---

#[test]
fn missing_datasets() {
    let tmp = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(&tmp)
        .arg("CRM")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("result_base.csv"));
}

#[test]
fn missing_column() {
    let fx = Fixture::new(
        "software.name,Sub.cat1,logo\nAcme CRM,CRM,\n",
        common::REVIEWS_CSV,
    );
    cmd()
        .current_dir(fx.path())
        .arg("CRM")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("missing column: total.reviews"));
}
