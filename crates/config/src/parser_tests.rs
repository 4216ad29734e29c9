// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

const SAMPLE_CONFIG: &str = r#"
[general]
rules = "rules.toml"
poll_period = "15s"
cycle_interval = "5s"

[devices]
monitored = ["craig_mobile", "kylie_mobile"]
managed = ["amplifier", "lounge_lamp"]
rooms = ["lounge", "office"]

[device.amplifier]
address = "192.168.1.240"
room = "lounge"
kind = "Feibit"

[device.lounge_lamp]
address = "hue:03"
room = "lounge"
kind = "Hue"

[device.craig_mobile]
address = "192.168.1.230"
kind = "mobile"

[device.kylie_mobile]
address = "192.168.1.231"
kind = "mobile"

[action.do_arrivals]
turn_on = ["amplifier", "lounge_lamp"]

[action.do_departures]
turn_off = ["amplifier", "lounge_lamp"]
"#;

const SAMPLE_RULES: &str = r#"
[[rule]]
name = "arrival"
any_present = ["craig_mobile", "kylie_mobile"]
off = ["amplifier"]
then = ["do_arrivals"]

[[rule]]
name = "departure"
absent = ["craig_mobile", "kylie_mobile"]
on = ["amplifier"]
then = ["do_departures"]
"#;

#[test]
fn parse_sample_config() {
    let config = parse_config(SAMPLE_CONFIG).unwrap();

    assert_eq!(config.general.poll_period, Duration::from_secs(15));
    assert_eq!(config.general.cycle_interval, Duration::from_secs(5));
    assert_eq!(config.general.probe_timeout, Duration::from_secs(1));
    assert!(!config.general.background_poll);

    assert_eq!(config.devices.monitored, vec!["craig_mobile", "kylie_mobile"]);
    assert_eq!(config.address("amplifier"), Some("192.168.1.240"));
    assert_eq!(config.device("lounge_lamp").unwrap().kind, "Hue");
    assert_eq!(config.device("craig_mobile").unwrap().room, None);

    let arrivals = &config.actions["do_arrivals"];
    assert_eq!(arrivals.turn_on, vec!["amplifier", "lounge_lamp"]);
    assert!(arrivals.turn_off.is_empty());
}

#[test]
fn parse_sample_rules_in_file_order() {
    let rules = parse_rules(SAMPLE_RULES).unwrap();
    let names: Vec<_> = rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["arrival", "departure"]);

    let arrival = &rules.rule[0];
    assert_eq!(arrival.any_present, vec!["craig_mobile", "kylie_mobile"]);
    assert_eq!(arrival.off, vec!["amplifier"]);
    assert!(!arrival.is_unconditional());
}

#[test]
fn parse_rules_json_array() {
    let rules = parse_rules_json(
        r#"[{"name": "always", "then": ["heartbeat"]},
            {"name": "home", "present": ["phone"], "then": ["do_arrivals", "do_lights"]}]"#,
    )
    .unwrap();
    assert_eq!(rules.len(), 2);
    assert!(rules.rule[0].is_unconditional());
    assert_eq!(rules.rule[1].then, vec!["do_arrivals", "do_lights"]);
}

#[test]
fn empty_rules_file_is_valid() {
    assert!(parse_rules("").unwrap().is_empty());
}

#[test]
fn rules_reject_free_form_expressions() {
    let err = parse_rules(
        r#"
[[rule]]
name = "eval"
when = "roll_call['phone'] and not amplifier.state()"
then = ["do_arrivals"]
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn rule_without_actions_is_invalid() {
    let err = parse_rules(
        r#"
[[rule]]
name = "noop"
present = ["phone"]
then = []
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("noop"), "{}", err);
}

#[test]
fn duplicate_rule_names_are_invalid() {
    let err = parse_rules_json(
        r#"[{"name": "a", "then": ["x"]}, {"name": "a", "then": ["y"]}]"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn load_files_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join(CONFIG_FILENAME);
    std::fs::write(&config_path, SAMPLE_CONFIG).unwrap();
    std::fs::write(dir.path().join("rules.toml"), SAMPLE_RULES).unwrap();

    let config = load_config(&config_path).unwrap();
    let rules_path = config.rules_path(&config_path);
    assert_eq!(rules_path, dir.path().join("rules.toml"));

    let rules = load_rules(&rules_path).unwrap();
    assert_eq!(rules.len(), 2);
}

#[test]
fn load_rules_picks_json_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.JSON");
    std::fs::write(&path, r#"[{"name": "a", "then": ["x"]}]"#).unwrap();
    assert_eq!(load_rules(&path).unwrap().len(), 1);
}

#[test]
fn missing_file_reports_path() {
    let err = load_config(Path::new("/nonexistent/homer.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("/nonexistent/homer.toml"));
}

#[test]
fn locate_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, SAMPLE_CONFIG).unwrap();

    assert_eq!(locate_config(Some(&path)).unwrap(), path);

    let missing = dir.path().join("missing.toml");
    let err = locate_config(Some(&missing)).unwrap_err();
    match err {
        ConfigError::NotFound { searched } => assert_eq!(searched, vec![missing]),
        other => panic!("unexpected error: {}", other),
    }
}
