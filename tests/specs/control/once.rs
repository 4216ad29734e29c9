//! Single-cycle specs

use crate::prelude::*;

#[test]
fn once_in_test_mode_runs_a_cycle() {
    Home::configured()
        .homer()
        .args(["--once", "-t"])
        .passes()
        .stdout_has("Homer start")
        .stdout_has("Homer end");
}

#[test]
fn verbose_logs_roll_call_and_rules() {
    Home::configured()
        .homer()
        .args(["--once", "-t", "-v"])
        .passes()
        .stderr_has("roll call:")
        .stderr_has("evaluating rules");
}

#[test]
fn diagnostic_logs_named_poll() {
    Home::configured()
        .homer()
        .args(["--once", "-t", "-d"])
        .passes()
        .stderr_has("pinging craig_mobile");
}

#[test]
fn explicit_config_path_is_honoured() {
    let home = Home::configured();
    let elsewhere = Home::empty();

    elsewhere
        .homer()
        .args(["--once", "-t", "--config"])
        .args([home.config_path()])
        .passes()
        .stdout_has("Homer end");
}

#[test]
fn json_rules_are_accepted() {
    let config = CONFIG.replace("rules.toml", "rules.json");
    let home = Home::empty().file("homer.toml", &config).file(
        "rules.json",
        r#"[{"name": "always", "then": ["do_departures"]}]"#,
    );

    home.homer().args(["--once", "-t"]).passes();
}

#[test]
fn log_file_receives_output() {
    let home = Home::configured();
    let log = home.path().join("logs/homer.log");

    home.homer()
        .args(["--once", "-t", "-v", "--log-file"])
        .args([&log])
        .passes();

    let written = std::fs::read_to_string(&log).unwrap();
    assert!(written.contains("roll call:"), "log was: {written}");
}
