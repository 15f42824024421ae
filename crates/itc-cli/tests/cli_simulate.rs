use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::error::Error;
use std::path::Path;
use tempfile::tempdir;

fn itc() -> Result<Command, Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("itc")?;
    // Keep tests independent of the user's global configuration
    cmd.env("ITC_CONFIG", "does-not-exist.toml");
    Ok(cmd)
}

fn write(path: &Path, text: &str) -> Result<(), Box<dyn Error>> {
    std::fs::write(path, text)?;
    Ok(())
}

const STATIC_EXPERIMENT: &str = r#"
[experiment]
name = "static"

[simulation]
neurons = 2
steps = 10
seed = 1

[neuron.preferences]
A = 0.5

[[stimulus]]
start_step = 2
stop_step = 6
objects = [{ object = "A", x = 0.3, y = -0.2, size = 1.0 }]
"#;

#[test]
fn simulate_writes_rate_report() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let exp = tmp.path().join("experiment.toml");
    let out = tmp.path().join("out").join("rates.json");
    write(&exp, STATIC_EXPERIMENT)?;

    itc()?
        .args(["simulate", exp.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .assert()
        .success();

    let report: Value = serde_json::from_str(&std::fs::read_to_string(&out)?)?;
    assert_eq!(report["experiment"], "static");
    assert_eq!(report["neurons"], 2);
    assert_eq!(report["steps"], 10);

    let rates = report["rates"].as_array().unwrap();
    assert_eq!(rates.len(), 10);
    assert_eq!(rates[1][0].as_f64(), Some(0.0));
    assert_eq!(rates[2][0].as_f64(), Some(50.0));
    assert_eq!(rates[5][1].as_f64(), Some(50.0));
    assert_eq!(rates[6][1].as_f64(), Some(0.0));
    assert!(report.get("spikes").is_none());
    assert_eq!(report["summary"][0]["peak_rate"].as_f64(), Some(50.0));
    Ok(())
}

#[test]
fn simulate_with_spikes_to_stdout() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let exp = tmp.path().join("experiment.toml");
    write(&exp, STATIC_EXPERIMENT)?;

    let assert = itc()?
        .args(["simulate", exp.to_str().unwrap(), "--spikes", "--steps", "400"])
        .assert()
        .success();

    let report: Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert!(report["spikes"].is_array());
    assert_eq!(report["steps"], 400);
    Ok(())
}

#[test]
fn unknown_profile_lists_allowed_names() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let exp = tmp.path().join("experiment.toml");
    write(&exp, "[neuron]\nocclusion = \"paper_bag\"\n")?;

    itc()?
        .args(["simulate", exp.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("paper_bag")
                .and(predicate::str::contains("none, two_input_sigmoid")),
        );
    Ok(())
}

#[test]
fn lognormal_size_without_gaussian_position_fails() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let exp = tmp.path().join("experiment.toml");
    write(&exp, "[neuron]\nsize = \"lognormal\"\n")?;

    itc()?
        .args(["simulate", exp.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a gaussian position profile"));
    Ok(())
}

#[test]
fn missing_experiment_file_fails() -> Result<(), Box<dyn Error>> {
    itc()?
        .args(["simulate", "no-such-experiment.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing resource"));
    Ok(())
}

#[test]
fn configured_log_level_applies_without_rust_log() -> Result<(), Box<dyn Error>> {
    let tmp = tempdir()?;
    let exp = tmp.path().join("experiment.toml");
    let cfg = tmp.path().join("config.toml");
    write(&exp, STATIC_EXPERIMENT)?;
    write(&cfg, "log_level = \"debug\"\n\n[preferences]\nshow_progress = false\n")?;

    let assert = itc()?
        .env_remove("RUST_LOG")
        .args(["--config", cfg.to_str().unwrap(), "simulate", exp.to_str().unwrap()])
        .assert()
        .success();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("DEBUG"), "stderr: {}", stderr);
    assert!(stderr.contains("Loaded experiment 'static'"));

    write(&cfg, "log_level = \"warn\"\n")?;
    let assert = itc()?
        .env_remove("RUST_LOG")
        .args(["--config", cfg.to_str().unwrap(), "simulate", exp.to_str().unwrap()])
        .assert()
        .success();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(!stderr.contains("INFO"), "stderr: {}", stderr);
    Ok(())
}
