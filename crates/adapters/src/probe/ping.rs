// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ICMP presence probe using the system `ping`

use super::{PresenceProbe, ProbeError};
use std::process::{Command, Stdio};
use std::time::Duration;

/// Probe that sends a single echo request and waits a bounded time for a reply
#[derive(Clone, Debug)]
pub struct PingProbe {
    program: String,
    timeout: Duration,
}

impl PingProbe {
    pub fn new(timeout: Duration) -> Self {
        Self {
            program: "ping".to_string(),
            timeout,
        }
    }

    /// Use a different ping binary (e.g. an absolute path)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Arguments passed to ping for `address`
    pub(crate) fn args(&self, address: &str) -> Vec<String> {
        // ping's -W takes whole seconds
        let wait = self.timeout.as_secs().max(1);
        vec![
            "-c".to_string(),
            "1".to_string(),
            "-W".to_string(),
            wait.to_string(),
            address.to_string(),
        ]
    }
}

impl PresenceProbe for PingProbe {
    fn probe(&self, address: &str) -> Result<bool, ProbeError> {
        if address.is_empty() || address.starts_with('-') || address.contains(char::is_whitespace)
        {
            return Err(ProbeError::InvalidAddress(address.to_string()));
        }

        let status = Command::new(&self.program)
            .args(self.args(address))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // 0: reply received, 1: no reply, anything else: ping itself failed
        match status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            code => Err(ProbeError::Unreachable {
                address: address.to_string(),
                reason: match code {
                    Some(code) => format!("{} exited with status {}", self.program, code),
                    None => format!("{} terminated by signal", self.program),
                },
            }),
        }
    }
}
