// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Display of intents

use crate::connectivity::{ConnectivityIntent, Intent};
use crate::sol::SolIntent;
use std::fmt::Display;

/// Renders a slice as `[a, b, c]`
pub(crate) struct ListDisplay<'a, T>(pub(crate) &'a [T]);

impl<T: Display> Display for ListDisplay<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (n, item) in self.0.iter().enumerate() {
            if n > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}

// Field order is fixed.
impl Display for SolIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self.params();
        write!(f, "SolIntent{{")?;
        write!(f, "id={}", self.id())?;
        write!(f, ", key={}", params.key())?;
        write!(f, ", appId={}", params.app_id())?;
        write!(f, ", priority={}", params.priority())?;
        write!(f, ", resources={}", ListDisplay(self.resources()))?;
        write!(f, ", selector={}", params.selector())?;
        write!(f, ", treatment={}", params.treatment())?;
        write!(f, ", ingress={}", self.ingress_point())?;
        write!(f, ", egress={}", self.egress_point())?;
        write!(f, ", constraints={}", ListDisplay(params.constraints()))?;
        write!(f, "}}")
    }
}
