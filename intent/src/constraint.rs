// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Constraints that path computation has to honour when realizing an intent.

use crate::display::ListDisplay;
use net::DeviceId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;

/// Encapsulation to use on the path between ingress and egress
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum EncapsulationType {
    None,
    Vlan,
    Mpls,
}

/// An additional requirement on the path of an intent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constraint {
    /// Minimum available bandwidth on every link, in bits per second.
    Bandwidth { bps: u64 },
    /// Maximum end-to-end latency.
    Latency(Duration),
    /// Devices the path must traverse, in order.
    Waypoint(Vec<DeviceId>),
    /// Devices the path must avoid.
    Obstacle(Vec<DeviceId>),
    /// Links whose annotation `key` exceeds `threshold` are excluded.
    Annotation { key: String, threshold: u64 },
    Encapsulation(EncapsulationType),
    /// The intent may be installed even if some of its endpoints are unreachable.
    PartialFailure,
}

impl Constraint {
    /// Bandwidth constraint of `mbps` megabits per second, saturating at `u64::MAX` bps.
    #[must_use]
    pub const fn bandwidth_mbps(mbps: u64) -> Self {
        Constraint::Bandwidth {
            bps: mbps.saturating_mul(1_000_000),
        }
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Bandwidth { bps } => write!(f, "BandwidthConstraint{{bandwidth={bps}bps}}"),
            Constraint::Latency(latency) => write!(f, "LatencyConstraint{{latency={latency:?}}}"),
            Constraint::Waypoint(devices) => {
                write!(f, "WaypointConstraint{{waypoints={}}}", ListDisplay(devices))
            }
            Constraint::Obstacle(devices) => {
                write!(f, "ObstacleConstraint{{obstacles={}}}", ListDisplay(devices))
            }
            Constraint::Annotation { key, threshold } => write!(
                f,
                "AnnotationConstraint{{key={key}, threshold={threshold}}}"
            ),
            Constraint::Encapsulation(encap) => {
                write!(f, "EncapsulationConstraint{{encapType={encap}}}")
            }
            Constraint::PartialFailure => write!(f, "PartialFailureConstraint"),
        }
    }
}
