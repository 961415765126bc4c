use herald::config::{load_config, load_emitter_config};
use herald::{EmitterConfig, HeraldError};
use serial_test::serial;
use std::env;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Set only in the child process spawned by `env_overrides_file_values`.
const CHILD_CONFIG_PATH: &str = "EMITTER_CHILD_CONFIG_PATH";

#[test]
fn loads_emitter_config_from_toml() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("herald.toml");
    fs::write(&path, "max_listeners = 8\ninitial_capacity = 32\n")?;

    let cfg = load_emitter_config(Some(&path))?;
    assert_eq!(cfg, EmitterConfig { max_listeners: 8, initial_capacity: 32 });
    Ok(())
}

#[test]
fn missing_fields_fall_back_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("partial.json");
    fs::write(&path, r#"{ "max_listeners": 2 }"#)?;

    let cfg: EmitterConfig = load_config(Some(&path))?;
    assert_eq!(cfg.max_listeners, 2);
    assert_eq!(cfg.initial_capacity, 0);
    Ok(())
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempdir().expect("temp dir");
    let err = load_emitter_config(Some(dir.path().join("absent.toml")))
        .expect_err("missing file should fail");

    assert!(matches!(err, HeraldError::Config { context: Some(_), .. }));
    assert!(err.to_string().contains("Failed to build config"));
}

#[test]
fn malformed_values_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("bad.toml");
    fs::write(&path, "max_listeners = \"many\"\n")?;

    let err = load_emitter_config(Some(&path)).expect_err("non-numeric value should fail");
    assert!(err.to_string().contains("Failed to deserialize config"));
    Ok(())
}

#[test]
#[serial]
fn env_overrides_file_values() -> Result<(), Box<dyn std::error::Error>> {
    if let Ok(path) = env::var(CHILD_CONFIG_PATH) {
        let cfg = load_emitter_config(Some(path))?;
        assert_eq!(cfg, EmitterConfig { max_listeners: 16, initial_capacity: 4 });
        return Ok(());
    }

    let dir = tempdir()?;
    let path = dir.path().join("herald.toml");
    fs::write(&path, "max_listeners = 8\ninitial_capacity = 4\n")?;

    let output = Command::new(env::current_exe()?)
        .args(["--exact", "env_overrides_file_values", "--nocapture"])
        .env(CHILD_CONFIG_PATH, &path)
        .env("HERALD__MAX_LISTENERS", "16")
        .output()?;

    assert!(
        output.status.success(),
        "child run failed:\n{}",
        String::from_utf8_lossy(&output.stdout)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("1 passed"));
    Ok(())
}
