// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::all, clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

//! Network vocabulary shared by intents: where traffic enters and leaves the network, which
//! traffic is concerned and what happens to it.

pub mod device;
pub mod eth;
pub mod selector;
pub mod treatment;

// re-exports
pub use device::{ConnectPoint, ConnectPointParseError, DeviceId, InvalidDeviceId, PortNumber};
pub use eth::{InvalidVid, Mac, MacFromStringError, Vid};
pub use selector::{Criterion, CriterionType, TrafficSelector, TrafficSelectorBuilder};
pub use treatment::{Instruction, TrafficTreatment, TrafficTreatmentBuilder};
