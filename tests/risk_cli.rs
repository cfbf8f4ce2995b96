mod support;

use predicates::str::contains;

use support::TestDir;

#[test]
fn risks_warns_when_document_missing() {
    let dir = TestDir::new();
    dir.pm()
        .arg("risks")
        .assert()
        .success()
        .stdout(contains("⚠️  No docs/RISKS.md file found!"))
        .stdout(contains("Create risk assessment first"));
}

#[test]
fn risks_points_to_update_command_when_found() {
    let dir = TestDir::new();
    dir.write_file("docs/RISKS.md", "# Risks\n\n- none yet\n")
        .expect("write risks");

    dir.pm()
        .arg("risks")
        .assert()
        .success()
        .stdout(contains("📋 Risk assessment file found: docs/RISKS.md"))
        .stdout(contains("pm update_risk_status [green|yellow|red]"));
}

#[test]
fn risks_never_modifies_state() {
    let dir = TestDir::new();
    dir.run(&["update_risk_status", "yellow"]);
    let before = dir.read_state_raw();

    dir.run(&["risks"]);
    assert_eq!(dir.read_state_raw(), before);
}

#[test]
fn risks_document_path_is_configurable() {
    let dir = TestDir::new();
    dir.write_file(".pm.toml", "[docs]\nrisks = \"RISK_REGISTER.md\"\n")
        .expect("write config");
    dir.write_file("RISK_REGISTER.md", "# Register\n")
        .expect("write register");

    dir.pm()
        .args(["risks", "--json"])
        .assert()
        .success()
        .stdout(contains("\"found\": true"))
        .stdout(contains("RISK_REGISTER.md"));
}

#[test]
fn risk_status_is_case_sensitive() {
    let dir = TestDir::new();
    dir.pm()
        .args(["update-risk-status", "Green"])
        .assert()
        .success()
        .stdout(contains("❌ Risk status must be"));

    dir.run(&["update-risk-status", "green"]);
    dir.pm()
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Risk Status: green"));
}
