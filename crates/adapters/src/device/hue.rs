// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hue lights addressed through the bridge as `hue:<light id>`

use super::{Device, DeviceError, DriverError};

const ADDRESS_PREFIX: &str = "hue:";

#[derive(Debug)]
pub struct HueLight {
    name: String,
    light_id: String,
    on: bool,
}

impl HueLight {
    pub const KIND: &'static str = "Hue";

    pub fn new(name: &str, address: &str) -> Result<Self, DriverError> {
        let bad = |reason: &str| DriverError::BadAddress {
            kind: Self::KIND.to_string(),
            address: address.to_string(),
            reason: reason.to_string(),
        };
        let light_id = address
            .strip_prefix(ADDRESS_PREFIX)
            .ok_or_else(|| bad("expected hue:<light id>"))?;
        if light_id.is_empty() || !light_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(bad("light id must be alphanumeric"));
        }
        Ok(Self {
            name: name.to_string(),
            light_id: light_id.to_string(),
            on: false,
        })
    }

    pub fn light_id(&self) -> &str {
        &self.light_id
    }
}

impl Device for HueLight {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        Self::KIND
    }

    fn turn_on(&mut self) -> Result<(), DeviceError> {
        tracing::info!(device = %self.name, light = %self.light_id, "turning {} on", self.name);
        self.on = true;
        Ok(())
    }

    fn turn_off(&mut self) -> Result<(), DeviceError> {
        tracing::info!(device = %self.name, light = %self.light_id, "turning {} off", self.name);
        self.on = false;
        Ok(())
    }

    fn state(&self) -> bool {
        self.on
    }
}
