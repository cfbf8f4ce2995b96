use std::fs;
use std::path::PathBuf;

use pm::config::{Config, CONFIG_FILE};

#[test]
fn config_defaults_when_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::load_from_dir(dir.path());

    assert_eq!(config.state_file, PathBuf::from("agent_status.json"));
    assert_eq!(config.docs.features, "docs/features.md");
    assert_eq!(config.docs.risks, PathBuf::from("docs/RISKS.md"));
    assert_eq!(config.store.lock_timeout_ms, 5000);
}

#[test]
fn config_overrides_from_toml() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let toml = r#"
state_file = ".pm/state.json"

[docs]
features = "handbook/features.md"
risks = "handbook/risks.md"

[store]
lock_timeout_ms = 250
"#;
    fs::write(dir.path().join(CONFIG_FILE), toml)?;

    let config = Config::load_from_dir(dir.path());

    assert_eq!(config.state_path(dir.path()), dir.path().join(".pm/state.json"));
    assert_eq!(config.docs.features, "handbook/features.md");
    assert_eq!(config.risks_path(dir.path()), dir.path().join("handbook/risks.md"));
    assert_eq!(config.store.lock_timeout_ms, 250);

    Ok(())
}

#[test]
fn config_load_rejects_invalid_toml() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join(CONFIG_FILE);
    fs::write(&config_path, "this = [not valid").expect("write config");

    assert!(Config::load(&config_path).is_err());
    assert_eq!(
        Config::load_from_dir(dir.path()).state_file,
        PathBuf::from("agent_status.json")
    );
}
