// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Identity of the applications that submit intents

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifies the application that owns an intent: a short numeric id and a unique name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId {
    id: u16,
    name: String,
}

impl ApplicationId {
    #[must_use]
    pub fn new(id: u16, name: &str) -> Self {
        Self {
            id,
            name: name.to_owned(),
        }
    }
    #[must_use]
    pub const fn id(&self) -> u16 {
        self.id
    }
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApplicationId{{id={}, name={}}}", self.id, self.name)
    }
}
