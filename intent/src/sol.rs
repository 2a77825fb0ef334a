// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Point-to-point connectivity intent: traffic matching a selector and entering the network at an
//! ingress point is delivered to an egress point.

use id::{IdGenerator, RandomIds};
use net::{ConnectPoint, TrafficSelector, TrafficTreatment};
use std::hash::{Hash, Hasher};
use tracing::{debug, trace};

use crate::app::ApplicationId;
use crate::connectivity::{
    ConnectivityIntent, ConnectivityParams, ConnectivityParamsBuilder, Intent,
};
use crate::constraint::Constraint;
use crate::errors::{IntentError, IntentResult};
use crate::key::Key;
use crate::record::SolIntentRecord;
use crate::resource::NetworkResource;
use crate::IntentId;

/// An immutable point-to-point intent.
///
/// Intents are identified by their [`IntentId`]: equality and hashing only look at the id. Use
/// [`SolIntent::same_content`] to compare everything else.
#[derive(Clone, Debug)]
pub struct SolIntent {
    id: IntentId,
    params: ConnectivityParams,
    resources: Vec<NetworkResource>,
    ingress_point: ConnectPoint,
    egress_point: ConnectPoint,
}

impl SolIntent {
    #[must_use]
    pub fn builder() -> SolIntentBuilder {
        SolIntentBuilder::default()
    }

    /// The port on which the ingress traffic should be connected to the egress
    #[must_use]
    pub fn ingress_point(&self) -> &ConnectPoint {
        &self.ingress_point
    }

    /// The port on which the traffic should egress
    #[must_use]
    pub fn egress_point(&self) -> &ConnectPoint {
        &self.egress_point
    }

    /// Tells if `other` carries the same key, application, priority, resources, selector,
    /// treatment, endpoints and constraints as this intent, whatever their ids.
    #[must_use]
    pub fn same_content(&self, other: &SolIntent) -> bool {
        self.params == other.params
            && self.resources == other.resources
            && self.ingress_point == other.ingress_point
            && self.egress_point == other.egress_point
    }

    /// Produce the serializable form of this intent.
    #[must_use]
    pub fn to_record(&self) -> SolIntentRecord {
        SolIntentRecord {
            id: self.id,
            key: self.params.key().clone(),
            app_id: self.params.app_id().clone(),
            priority: self.params.priority(),
            resources: self.resources.clone(),
            selector: self.params.selector().clone(),
            treatment: self.params.treatment().clone(),
            ingress_point: self.ingress_point.clone(),
            egress_point: self.egress_point.clone(),
            constraints: self.params.constraints().to_vec(),
        }
    }

    /// Rebuild an intent from a record produced by [`SolIntent::to_record`].
    ///
    /// Records are trusted: no validation happens here. Untrusted input must go through
    /// [`SolIntent::builder`] instead.
    #[must_use]
    pub fn from_record(record: SolIntentRecord) -> Self {
        trace!("Restoring intent {} from record", record.id);
        let params = ConnectivityParams::from_parts(
            record.app_id,
            record.key,
            record.selector,
            record.treatment,
            record.constraints,
            record.priority,
        );
        Self {
            id: record.id,
            params,
            resources: record.resources,
            ingress_point: record.ingress_point,
            egress_point: record.egress_point,
        }
    }
}

impl PartialEq for SolIntent {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SolIntent {}

impl Hash for SolIntent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Intent for SolIntent {
    fn id(&self) -> IntentId {
        self.id
    }
    fn key(&self) -> &Key {
        self.params.key()
    }
    fn app_id(&self) -> &ApplicationId {
        self.params.app_id()
    }
    fn priority(&self) -> u32 {
        self.params.priority()
    }
    fn resources(&self) -> &[NetworkResource] {
        &self.resources
    }
}

impl ConnectivityIntent for SolIntent {
    fn params(&self) -> &ConnectivityParams {
        &self.params
    }
}

/// Accumulates the parameters of a [`SolIntent`]. Setters may be called in any order and any
/// number of times; the last value set wins.
#[derive(Clone, Debug, Default)]
pub struct SolIntentBuilder {
    params: ConnectivityParamsBuilder,
    ingress_point: Option<ConnectPoint>,
    egress_point: Option<ConnectPoint>,
}

impl SolIntentBuilder {
    #[must_use]
    pub fn app_id(mut self, app_id: ApplicationId) -> Self {
        self.params = self.params.app_id(app_id);
        self
    }

    #[must_use]
    pub fn key(mut self, key: Key) -> Self {
        self.params = self.params.key(key);
        self
    }

    #[must_use]
    pub fn selector(mut self, selector: TrafficSelector) -> Self {
        self.params = self.params.selector(selector);
        self
    }

    #[must_use]
    pub fn treatment(mut self, treatment: TrafficTreatment) -> Self {
        self.params = self.params.treatment(treatment);
        self
    }

    #[must_use]
    pub fn constraints(mut self, constraints: Vec<Constraint>) -> Self {
        self.params = self.params.constraints(constraints);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: u32) -> Self {
        self.params = self.params.priority(priority);
        self
    }

    /// Set the ingress point of the intent
    #[must_use]
    pub fn ingress_point(mut self, ingress_point: ConnectPoint) -> Self {
        self.ingress_point = Some(ingress_point);
        self
    }

    /// Set the egress point of the intent
    #[must_use]
    pub fn egress_point(mut self, egress_point: ConnectPoint) -> Self {
        self.egress_point = Some(egress_point);
        self
    }

    /// Build an intent with a random id.
    ///
    /// # Errors
    ///
    /// See [`SolIntentBuilder::build_with`].
    pub fn build(&self) -> IntentResult<SolIntent> {
        self.build_with(&RandomIds)
    }

    /// Build an intent whose id is drawn from `idgen`.
    ///
    /// The builder is left untouched, so it may be used again; every call yields a new id. An id is
    /// only drawn from `idgen` once every check has passed.
    ///
    /// # Errors
    ///
    /// - [`IntentError::MissingField`] if the application id, ingress or egress point is unset.
    /// - [`IntentError::PriorityOutOfRange`] if the priority is not within
    ///   [`MIN_PRIORITY`](crate::MIN_PRIORITY)..=[`MAX_PRIORITY`](crate::MAX_PRIORITY).
    /// - [`IntentError::SameEndpoints`] if ingress and egress are equal.
    pub fn build_with<G>(&self, idgen: &G) -> IntentResult<SolIntent>
    where
        G: IdGenerator<dyn Intent> + ?Sized,
    {
        self.try_build(idgen).inspect_err(|e| debug!("Rejected intent: {e}"))
    }

    fn try_build<G>(&self, idgen: &G) -> IntentResult<SolIntent>
    where
        G: IdGenerator<dyn Intent> + ?Sized,
    {
        self.params.validate()?;
        let ingress_point = self
            .ingress_point
            .clone()
            .ok_or(IntentError::MissingField("ingress_point"))?;
        let egress_point = self
            .egress_point
            .clone()
            .ok_or(IntentError::MissingField("egress_point"))?;
        if ingress_point == egress_point {
            return Err(IntentError::SameEndpoints {
                ingress: ingress_point,
                egress: egress_point,
            });
        }

        // ids are only drawn for intents that will be built
        let id = idgen.next_id();
        let params = self.params.clone().build_for(id)?;
        let intent = SolIntent {
            id,
            params,
            resources: vec![],
            ingress_point,
            egress_point,
        };
        debug!(
            "Built intent {id} (key {}, app {}): {} -> {}",
            intent.params.key(),
            intent.params.app_id().name(),
            intent.ingress_point,
            intent.egress_point
        );
        Ok(intent)
    }
}
