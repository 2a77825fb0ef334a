// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! The contract shared by all intents, and the parameters common to every connectivity intent.
//!
//! Concrete intents embed a [`ConnectivityParams`] and implement [`Intent`] and
//! [`ConnectivityIntent`] on top of it.

use derive_builder::Builder;
use net::{TrafficSelector, TrafficTreatment};
use std::fmt::{Debug, Display};

use crate::app::ApplicationId;
use crate::constraint::Constraint;
use crate::errors::IntentError;
use crate::key::Key;
use crate::resource::NetworkResource;
use crate::IntentId;

/// Priority given to intents that do not specify one
pub const DEFAULT_INTENT_PRIORITY: u32 = 100;
/// Lowest priority an intent may have
pub const MIN_PRIORITY: u32 = 1;
/// Highest priority an intent may have
pub const MAX_PRIORITY: u32 = (1 << 16) - 1;

/// What every intent exposes, whatever its shape.
pub trait Intent: Debug + Display + Send + Sync {
    /// Unique identifier, assigned when the intent is built
    fn id(&self) -> IntentId;
    fn key(&self) -> &Key;
    fn app_id(&self) -> &ApplicationId;
    /// Rank among overlapping intents: higher wins
    fn priority(&self) -> u32;
    /// Network resources the intent is bound to
    fn resources(&self) -> &[NetworkResource];
    /// Tells if the intent can be installed as-is, without compilation
    fn is_installable(&self) -> bool {
        false
    }
}

/// An intent that connects traffic between points of the network.
pub trait ConnectivityIntent: Intent {
    fn params(&self) -> &ConnectivityParams;

    fn selector(&self) -> &TrafficSelector {
        self.params().selector()
    }
    fn treatment(&self) -> &TrafficTreatment {
        self.params().treatment()
    }
    fn constraints(&self) -> &[Constraint] {
        self.params().constraints()
    }
}

/// Parameters shared by every connectivity intent
#[derive(Builder, Clone, Debug, PartialEq, Eq)]
#[builder(
    pattern = "owned",
    derive(Clone, Debug),
    build_fn(
        private,
        name = "build_params",
        error = "IntentError",
        validate = "Self::validate"
    )
)]
pub struct ConnectivityParams {
    app_id: ApplicationId,
    key: Key,
    #[builder(default)]
    selector: TrafficSelector,
    #[builder(default)]
    treatment: TrafficTreatment,
    #[builder(default)]
    constraints: Vec<Constraint>,
    #[builder(default = "DEFAULT_INTENT_PRIORITY")]
    priority: u32,
}

impl ConnectivityParams {
    /// Assemble parameters without validation, for records that were validated when first built.
    pub(crate) fn from_parts(
        app_id: ApplicationId,
        key: Key,
        selector: TrafficSelector,
        treatment: TrafficTreatment,
        constraints: Vec<Constraint>,
        priority: u32,
    ) -> Self {
        Self {
            app_id,
            key,
            selector,
            treatment,
            constraints,
            priority,
        }
    }
    #[must_use]
    pub fn app_id(&self) -> &ApplicationId {
        &self.app_id
    }
    #[must_use]
    pub fn key(&self) -> &Key {
        &self.key
    }
    #[must_use]
    pub fn selector(&self) -> &TrafficSelector {
        &self.selector
    }
    #[must_use]
    pub fn treatment(&self) -> &TrafficTreatment {
        &self.treatment
    }
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
    #[must_use]
    pub const fn priority(&self) -> u32 {
        self.priority
    }
}

impl ConnectivityParamsBuilder {
    /// Application id first, then priority range. Missing fields other than the application id
    /// are reported by the generated build function.
    pub(crate) fn validate(&self) -> Result<(), IntentError> {
        if self.app_id.is_none() {
            return Err(IntentError::MissingField("app_id"));
        }
        if let Some(priority) = self.priority {
            if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
                return Err(IntentError::PriorityOutOfRange(priority));
            }
        }
        Ok(())
    }

    /// Build the parameters of the intent identified by `id`.
    pub(crate) fn build_for(self, id: IntentId) -> Result<ConnectivityParams, IntentError> {
        self.default_key(id).build_params()
    }

    /// Derive the key from `id` and the application id unless a key was set explicitly.
    fn default_key(mut self, id: IntentId) -> Self {
        if self.key.is_none() {
            if let Some(app_id) = &self.app_id {
                self.key = Some(Key::of_long(id.fingerprint(), app_id.clone()));
            }
        }
        self
    }
}
