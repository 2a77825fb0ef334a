// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Devices, ports and the connection points where traffic enters or leaves the network.

#[allow(unused_imports)] // conditional re-export
#[cfg(any(test, feature = "bolero"))]
pub use contract::*;

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Identifier of a network device, as a URI-like string (e.g. `of:0000000000000001`).
///
/// A [`DeviceId`] is never empty and never contains `/`, which separates the device from the port
/// in the text form of a [`ConnectPoint`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

/// Errors which can occur when building a [`DeviceId`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidDeviceId {
    /// The id is the empty string
    #[error("device id may not be empty")]
    Empty,
    /// The id contains the device/port separator
    #[error("device id '{0}' may not contain '/'")]
    Separator(String),
}

impl DeviceId {
    /// Create a [`DeviceId`] from its string form.
    ///
    /// # Errors
    ///
    /// Fails if `uri` is empty or contains a `/`.
    pub fn new(uri: impl Into<String>) -> Result<Self, InvalidDeviceId> {
        let uri = uri.into();
        if uri.is_empty() {
            return Err(InvalidDeviceId::Empty);
        }
        if uri.contains('/') {
            return Err(InvalidDeviceId::Separator(uri));
        }
        Ok(Self(uri))
    }

    /// Build the conventional id of an OpenFlow datapath.
    #[must_use]
    pub fn openflow(dpid: u64) -> Self {
        Self(format!("of:{dpid:016x}"))
    }

    /// The string form of this id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DeviceId {
    type Error = InvalidDeviceId;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for DeviceId {
    type Error = InvalidDeviceId;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceId> for String {
    fn from(value: DeviceId) -> Self {
        value.0
    }
}

impl Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A port number on a device.
///
/// The top of the `u64` space is reserved for logical ports, which are displayed and parsed by
/// name (e.g. `CONTROLLER`).
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortNumber(u64);

impl PortNumber {
    /// Send back out of the port the packet arrived on.
    pub const IN_PORT: PortNumber = PortNumber(u64::MAX - 7);
    /// Submit to the first flow table.
    pub const TABLE: PortNumber = PortNumber(u64::MAX - 6);
    /// Forward using the device's non-programmable pipeline.
    pub const NORMAL: PortNumber = PortNumber(u64::MAX - 5);
    /// Flood along the minimum spanning tree, excluding the ingress port.
    pub const FLOOD: PortNumber = PortNumber(u64::MAX - 4);
    /// All ports except the ingress port.
    pub const ALL: PortNumber = PortNumber(u64::MAX - 3);
    /// Punt to the controller.
    pub const CONTROLLER: PortNumber = PortNumber(u64::MAX - 2);
    /// The device's local networking stack.
    pub const LOCAL: PortNumber = PortNumber(u64::MAX - 1);
    /// Wildcard.
    pub const ANY: PortNumber = PortNumber(u64::MAX);

    /// The first reserved (logical) port value.
    const FIRST_LOGICAL: u64 = u64::MAX - 7;

    const LOGICAL: [(PortNumber, &'static str); 8] = [
        (Self::IN_PORT, "IN_PORT"),
        (Self::TABLE, "TABLE"),
        (Self::NORMAL, "NORMAL"),
        (Self::FLOOD, "FLOOD"),
        (Self::ALL, "ALL"),
        (Self::CONTROLLER, "CONTROLLER"),
        (Self::LOCAL, "LOCAL"),
        (Self::ANY, "ANY"),
    ];

    /// Create a [`PortNumber`] from its raw value.
    #[must_use]
    pub const fn new(port: u64) -> Self {
        Self(port)
    }

    /// The raw value of this port
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Tells if this is one of the reserved logical ports.
    #[must_use]
    pub const fn is_logical(self) -> bool {
        self.0 >= Self::FIRST_LOGICAL
    }

    fn logical_name(self) -> Option<&'static str> {
        Self::LOGICAL
            .iter()
            .find(|(port, _)| *port == self)
            .map(|(_, name)| *name)
    }
}

impl From<u64> for PortNumber {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<PortNumber> for u64 {
    fn from(value: PortNumber) -> Self {
        value.0
    }
}

impl Display for PortNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.logical_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Errors which can occur when parsing a [`PortNumber`] or a [`ConnectPoint`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectPointParseError {
    /// No `/` between device and port
    #[error("'{0}' is not of the form <device>/<port>")]
    MissingSeparator(String),
    /// The port is neither a number nor a logical port name
    #[error("invalid port number '{0}'")]
    InvalidPort(String),
    /// The device part is not a valid [`DeviceId`]
    #[error(transparent)]
    InvalidDevice(#[from] InvalidDeviceId),
}

impl FromStr for PortNumber {
    type Err = ConnectPointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((port, _)) = Self::LOGICAL.iter().find(|(_, name)| *name == s) {
            return Ok(*port);
        }
        s.parse::<u64>()
            .map(PortNumber)
            .map_err(|_| ConnectPointParseError::InvalidPort(s.to_owned()))
    }
}

/// A device and port pair: the location where traffic enters or leaves the network.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectPoint {
    device_id: DeviceId,
    port: PortNumber,
}

impl ConnectPoint {
    /// Create a [`ConnectPoint`] for `port` on `device_id`.
    #[must_use]
    pub const fn new(device_id: DeviceId, port: PortNumber) -> Self {
        Self { device_id, port }
    }

    /// The device this point belongs to
    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    /// The port on the device
    #[must_use]
    pub const fn port(&self) -> PortNumber {
        self.port
    }
}

impl FromStr for ConnectPoint {
    type Err = ConnectPointParseError;

    /// Parse `<device>/<port>`. The device part may itself contain `:` (e.g. `of:0001/3`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (device, port) = s
            .rsplit_once('/')
            .ok_or_else(|| ConnectPointParseError::MissingSeparator(s.to_owned()))?;
        Ok(Self::new(DeviceId::new(device)?, port.parse()?))
    }
}

impl TryFrom<&str> for ConnectPoint {
    type Error = ConnectPointParseError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Display for ConnectPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.device_id, self.port)
    }
}

#[cfg(any(test, feature = "bolero"))]
mod contract {
    use super::{ConnectPoint, DeviceId, PortNumber};
    use bolero::{Driver, TypeGenerator, ValueGenerator};

    impl TypeGenerator for DeviceId {
        fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
            Some(DeviceId::openflow(u64::from(driver.produce::<u16>()?)))
        }
    }

    impl TypeGenerator for PortNumber {
        fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
            Some(PortNumber(u64::from(driver.produce::<u32>()?)))
        }
    }

    impl TypeGenerator for ConnectPoint {
        fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
            Some(ConnectPoint::new(driver.produce()?, driver.produce()?))
        }
    }

    /// Generate a pair of [`ConnectPoint`]s which are guaranteed to differ.
    pub struct DistinctConnectPoints;

    impl ValueGenerator for DistinctConnectPoints {
        type Output = (ConnectPoint, ConnectPoint);

        fn generate<D: Driver>(&self, driver: &mut D) -> Option<Self::Output> {
            let first: ConnectPoint = driver.produce()?;
            let mut second: ConnectPoint = driver.produce()?;
            if first == second {
                second = ConnectPoint::new(
                    second.device_id.clone(),
                    PortNumber(second.port.0.wrapping_add(1) & u64::from(u32::MAX)),
                );
            }
            Some((first, second))
        }
    }
}
