// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Serializable form of a [`SolIntent`](crate::SolIntent).
//!
//! A record is a plain bag of fields. It is produced from a built intent and turned back into one
//! without validation, so it must only ever be read back from a trusted source.

use net::{ConnectPoint, TrafficSelector, TrafficTreatment};
use serde::{Deserialize, Serialize};

use crate::IntentId;
use crate::app::ApplicationId;
use crate::constraint::Constraint;
use crate::key::Key;
use crate::resource::NetworkResource;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolIntentRecord {
    pub id: IntentId,
    pub key: Key,
    pub app_id: ApplicationId,
    pub priority: u32,
    pub resources: Vec<NetworkResource>,
    pub selector: TrafficSelector,
    pub treatment: TrafficTreatment,
    pub ingress_point: ConnectPoint,
    pub egress_point: ConnectPoint,
    pub constraints: Vec<Constraint>,
}
