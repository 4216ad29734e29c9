// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Smart plugs and appliances addressed by IP

use super::{Device, DeviceError, DriverError};
use std::net::IpAddr;

/// Hardware family of a network switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchModel {
    Feibit,
    Wemo,
    SamsungTv,
}

impl SwitchModel {
    pub fn tag(self) -> &'static str {
        match self {
            SwitchModel::Feibit => "Feibit",
            SwitchModel::Wemo => "Wemo",
            SwitchModel::SamsungTv => "SamsungTV",
        }
    }
}

/// An IP-addressed on/off device
#[derive(Debug)]
pub struct NetworkSwitch {
    name: String,
    address: IpAddr,
    model: SwitchModel,
    on: bool,
}

impl NetworkSwitch {
    pub fn new(model: SwitchModel, name: &str, address: &str) -> Result<Self, DriverError> {
        let address = address
            .parse::<IpAddr>()
            .map_err(|e| DriverError::BadAddress {
                kind: model.tag().to_string(),
                address: address.to_string(),
                reason: e.to_string(),
            })?;
        // The switches cannot report their state; assume off until commanded
        Ok(Self {
            name: name.to_string(),
            address,
            model,
            on: false,
        })
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn model(&self) -> SwitchModel {
        self.model
    }
}

impl Device for NetworkSwitch {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &str {
        self.model.tag()
    }

    fn turn_on(&mut self) -> Result<(), DeviceError> {
        tracing::info!(device = %self.name, address = %self.address, "turning {} on", self.name);
        self.on = true;
        Ok(())
    }

    fn turn_off(&mut self) -> Result<(), DeviceError> {
        tracing::info!(device = %self.name, address = %self.address, "turning {} off", self.name);
        self.on = false;
        Ok(())
    }

    fn state(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_off_and_tracks_commands() {
        let mut amp = NetworkSwitch::new(SwitchModel::Feibit, "amplifier", "192.168.1.240").unwrap();
        assert!(!amp.state());
        assert_eq!(amp.kind(), "Feibit");

        amp.turn_on().unwrap();
        assert!(amp.state());
        amp.turn_off().unwrap();
        assert!(!amp.state());
    }

    #[test]
    fn rejects_non_ip_address() {
        let err = NetworkSwitch::new(SwitchModel::SamsungTv, "tv", "hue:03").unwrap_err();
        assert!(matches!(err, DriverError::BadAddress { ref kind, .. } if kind == "SamsungTV"));
    }
}
