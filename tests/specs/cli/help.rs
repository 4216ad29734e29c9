//! Help and version specs

use crate::prelude::*;

#[test]
fn version_prints_package_version() {
    Home::empty()
        .homer()
        .args(["--version"])
        .passes()
        .stdout_has(env!("CARGO_PKG_VERSION"));
}

#[test]
fn help_lists_flags() {
    let out = Home::empty().homer().args(["--help"]).passes();
    for flag in ["--config", "--verbose", "--diagnostic", "--test", "--once", "--log-file"] {
        assert!(out.stdout().contains(flag), "missing {flag} in help");
    }
}
