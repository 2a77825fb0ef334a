// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Layer 2 values used in selectors and treatments: MAC addresses and VLAN ids.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A [MAC Address] type.
///
/// [MAC Address]: https://en.wikipedia.org/wiki/MAC_address
#[repr(transparent)]
#[cfg_attr(any(test, feature = "bolero"), derive(bolero::TypeGenerator))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Mac(pub [u8; 6]);

impl Mac {
    /// The broadcast `Mac`
    pub const BROADCAST: Mac = Mac([u8::MAX; 6]);
    /// The zero `Mac`.
    pub const ZERO: Mac = Mac([0; 6]);

    /// Returns true iff the least significant bit of the first octet is one.
    #[must_use]
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 == 0x01
    }
}

impl From<[u8; 6]> for Mac {
    fn from(value: [u8; 6]) -> Self {
        Mac(value)
    }
}

/// Errors which can occur while converting a string to a [`Mac`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MacFromStringError {
    /// The string is not six `:`-separated pairs of hex digits
    #[error("invalid string representation of mac address: {0}")]
    Invalid(String),
}

impl FromStr for Mac {
    type Err = MacFromStringError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || MacFromStringError::Invalid(value.to_owned());
        let mut octets = [0u8; 6];
        let mut parts = value.split(':');
        for octet in &mut octets {
            let part = parts.next().ok_or_else(invalid)?;
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Mac(octets))
    }
}

impl Display for Mac {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// A VLAN Identifier, in the range 1..=4094.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Vid(u16);

/// Errors which can occur when converting a `u16` to a validated [`Vid`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidVid {
    /// 0 means "no VLAN" and cannot identify one
    #[error("Zero is a reserved Vid")]
    Zero,
    /// 4095 is reserved for implementation use
    #[error("4095 is a reserved Vid")]
    Reserved,
    /// Above the 12-bit range
    #[error("{0} is too large to be a legal Vid (4094 is max legal value)")]
    TooLarge(u16),
}

impl Vid {
    /// The smallest legal [`Vid`]
    pub const MIN: Vid = Vid(1);
    /// The largest legal [`Vid`]
    pub const MAX: Vid = Vid(4094);
    const RESERVED: u16 = 4095;

    /// Create a new [`Vid`] from a `u16`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is 0, 4095 (reserved), or greater than [`Vid::MAX`].
    pub const fn new(vid: u16) -> Result<Self, InvalidVid> {
        match vid {
            0 => Err(InvalidVid::Zero),
            Self::RESERVED => Err(InvalidVid::Reserved),
            v if v > Self::RESERVED => Err(InvalidVid::TooLarge(v)),
            v => Ok(Vid(v)),
        }
    }

    /// The raw value of this [`Vid`]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for Vid {
    type Error = InvalidVid;
    fn try_from(vid: u16) -> Result<Vid, Self::Error> {
        Vid::new(vid)
    }
}

impl From<Vid> for u16 {
    fn from(vid: Vid) -> u16 {
        vid.0
    }
}

impl Display for Vid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(any(test, feature = "bolero"))]
mod contract {
    use super::Vid;
    use bolero::{Driver, TypeGenerator};

    impl TypeGenerator for Vid {
        fn generate<D: Driver>(driver: &mut D) -> Option<Self> {
            let raw = driver.produce::<u16>()? % Vid::MAX.0 + 1;
            Vid::new(raw).ok()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // valid in tests
mod test {
    use super::*;

    #[test]
    fn mac_display_parses_back() {
        bolero::check!().with_type().for_each(|mac: &Mac| {
            let parsed: Mac = mac.to_string().parse().unwrap();
            assert_eq!(&parsed, mac);
        });
    }

    #[test]
    fn mac_parse_rejects_garbage() {
        for bad in [
            "",
            "00:11:22:33:44",
            "00:11:22:33:44:55:66",
            "0:11:22:33:44:55",
            "zz:11:22:33:44:55",
            "+1:+2:03:04:05:06",
            "-1:02:03:04:05:06",
        ] {
            assert!(bad.parse::<Mac>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn vid_bounds() {
        assert_eq!(Vid::new(0), Err(InvalidVid::Zero));
        assert_eq!(Vid::new(4095), Err(InvalidVid::Reserved));
        assert_eq!(Vid::new(5000), Err(InvalidVid::TooLarge(5000)));
        assert_eq!(Vid::new(1), Ok(Vid::MIN));
        assert_eq!(Vid::new(4094), Ok(Vid::MAX));
    }
}
