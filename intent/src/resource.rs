// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Network resources an intent may be bound to

use net::{ConnectPoint, DeviceId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkResource {
    Device(DeviceId),
    Link { src: ConnectPoint, dst: ConnectPoint },
}

impl Display for NetworkResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkResource::Device(device) => write!(f, "{device}"),
            NetworkResource::Link { src, dst } => write!(f, "Link{{src={src}, dst={dst}}}"),
        }
    }
}
