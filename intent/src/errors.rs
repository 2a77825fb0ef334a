// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Reasons why an intent may fail to be built.
//! Every builder in this crate returns an [`IntentError`] when it rejects its input.

use derive_builder::UninitializedFieldError;
use net::ConnectPoint;
use thiserror::Error;

/// Broad category of an [`IntentError`].
///
/// Both categories denote programming errors at intent-construction time: nothing is retried.
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
pub enum ErrorKind {
    /// A value was supplied but is not acceptable.
    InvalidArgument,
    /// A required value was never supplied.
    NullReference,
}

/// The reasons why we may reject an intent
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntentError {
    #[error("ingress and egress should be different (ingress: {ingress}, egress: {egress})")]
    SameEndpoints {
        ingress: ConnectPoint,
        egress: ConnectPoint,
    },
    #[error(
        "priority {0} out of range [{min}, {max}]",
        min = crate::MIN_PRIORITY,
        max = crate::MAX_PRIORITY
    )]
    PriorityOutOfRange(u32),
    #[error("Missing mandatory parameter: {0}")]
    MissingField(&'static str),
}

impl IntentError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            IntentError::SameEndpoints { .. } | IntentError::PriorityOutOfRange(_) => {
                ErrorKind::InvalidArgument
            }
            IntentError::MissingField(_) => ErrorKind::NullReference,
        }
    }
}

impl From<UninitializedFieldError> for IntentError {
    fn from(value: UninitializedFieldError) -> Self {
        IntentError::MissingField(value.field_name())
    }
}

/// Result-like type for intent construction
pub type IntentResult<T> = Result<T, IntentError>;
