// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Point-to-point connectivity intents.
//!
//! A [`SolIntent`] asks that traffic matching a [`TrafficSelector`](net::TrafficSelector), entering
//! the network at an ingress [`ConnectPoint`](net::ConnectPoint), be delivered to an egress
//! connection point with a [`TrafficTreatment`](net::TrafficTreatment) applied and a list of
//! [`Constraint`]s honoured. Intents are built with [`SolIntent::builder`], validated once and
//! immutable afterwards. Compiling them into flow rules is left to the consumers of this crate.

#![deny(
    unsafe_code,
    clippy::all,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod connectivity;
pub mod constraint;
pub mod display;
pub mod errors;
pub mod key;
pub mod record;
pub mod resource;
pub mod sol;

pub use app::ApplicationId; // re-export
pub use connectivity::{
    ConnectivityIntent, ConnectivityParams, DEFAULT_INTENT_PRIORITY, Intent, MAX_PRIORITY,
    MIN_PRIORITY,
}; // re-export
pub use constraint::{Constraint, EncapsulationType}; // re-export
pub use errors::{ErrorKind, IntentError, IntentResult}; // re-export
pub use key::Key; // re-export
pub use record::SolIntentRecord; // re-export
pub use resource::NetworkResource; // re-export
pub use sol::{SolIntent, SolIntentBuilder}; // re-export

/// Identifier of an intent, whatever its concrete type
pub type IntentId = id::Id<dyn Intent>;

#[cfg(test)]
mod tests;
