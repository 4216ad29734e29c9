//! Fatal error specs

use crate::prelude::*;

#[test]
fn missing_config_is_fatal() {
    Home::empty()
        .homer()
        .args(["--once"])
        .fails()
        .stderr_has("Fatal:")
        .stderr_has("homer.toml");
}

#[test]
fn explicit_missing_config_is_fatal() {
    Home::empty()
        .homer()
        .args(["--once", "--config", "nowhere.toml"])
        .fails()
        .stderr_has("nowhere.toml");
}

#[test]
fn unknown_driver_kind_is_fatal() {
    let home = Home::empty()
        .file("homer.toml", &CONFIG.replace("\"Feibit\"", "\"Zigbee\""))
        .file("rules.toml", RULES);

    home.homer()
        .args(["--once", "-t"])
        .fails()
        .stderr_has("Fatal:")
        .stderr_has("requires a Zigbee driver");
}

#[test]
fn bad_hue_address_is_fatal() {
    let home = Home::empty()
        .file("homer.toml", &CONFIG.replace("hue:3", "192.168.1.50"))
        .file("rules.toml", RULES);

    home.homer()
        .args(["--once", "-t"])
        .fails()
        .stderr_has("lamp is misconfigured");
}

#[test]
fn unknown_config_field_is_fatal() {
    let home = Home::empty()
        .file("homer.toml", &format!("{CONFIG}\n[extra]\nkey = 1\n"))
        .file("rules.toml", RULES);

    home.homer().args(["--once", "-t"]).fails().stderr_has("Fatal:");
}

#[test]
fn missing_rules_file_is_fatal() {
    let home = Home::empty().file("homer.toml", CONFIG);

    home.homer()
        .args(["--once", "-t"])
        .fails()
        .stderr_has("rules.toml");
}

#[test]
fn fatal_run_does_not_print_end() {
    Home::empty()
        .homer()
        .args(["--once"])
        .fails()
        .stdout_has("Homer start")
        .stdout_lacks("Homer end");
}
