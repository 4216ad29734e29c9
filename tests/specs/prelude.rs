//! Shared helpers for specs

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CONFIG: &str = r#"
[general]
rules = "rules.toml"
poll_period = "15s"
cycle_interval = "5s"
probe_timeout = "1s"

[devices]
monitored = ["craig_mobile"]
managed = ["amplifier", "lamp"]
rooms = ["lounge"]

[device.craig_mobile]
address = "192.168.1.230"
kind = "mobile"

[device.amplifier]
address = "192.168.1.240"
room = "lounge"
kind = "Feibit"

[device.lamp]
address = "hue:3"
room = "lounge"
kind = "Hue"

[action.do_arrivals]
turn_on = ["amplifier", "lamp"]

[action.do_departures]
turn_off = ["amplifier", "lamp"]
"#;

pub const RULES: &str = r#"
[[rule]]
name = "arrival"
present = ["craig_mobile"]
off = ["amplifier"]
then = ["do_arrivals"]

[[rule]]
name = "departure"
absent = ["craig_mobile"]
then = ["do_departures"]
"#;

/// A temporary directory holding homer.toml and its rules
pub struct Home {
    dir: TempDir,
}

impl Home {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn configured() -> Self {
        Self::empty().file("homer.toml", CONFIG).file("rules.toml", RULES)
    }

    pub fn file(self, name: &str, content: &str) -> Self {
        std::fs::write(self.dir.path().join(name), content).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("homer.toml")
    }

    /// `homer` run inside this directory with a predictable environment
    pub fn homer(&self) -> Run {
        let mut cmd = Command::cargo_bin("homer").unwrap();
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .env("XDG_CONFIG_HOME", self.path().join("xdg"))
            .env("HOME", self.path());
        Run { cmd }
    }
}

pub struct Run {
    cmd: Command,
}

impl Run {
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        self.cmd.args(args);
        self
    }

    pub fn passes(mut self) -> Output {
        Output(self.cmd.assert().success())
    }

    pub fn fails(mut self) -> Output {
        Output(self.cmd.assert().failure().code(1))
    }
}

pub struct Output(assert_cmd::assert::Assert);

impl Output {
    pub fn stdout_has(self, expected: &str) -> Self {
        Self(self.0.stdout(predicates::str::contains(expected)))
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self(self.0.stderr(predicates::str::contains(expected)))
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        Self(self.0.stdout(predicates::str::contains(unexpected).not()))
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.0.get_output().stdout).into_owned()
    }
}
