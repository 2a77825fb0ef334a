// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Intent keys.
//!
//! A key distinguishes intents of one application which would otherwise be identical. Two keys
//! are only equal if they belong to the same application.

use crate::app::ApplicationId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    /// Numeric key, rendered in hex. Default keys are of this kind.
    Long { value: u64, app_id: ApplicationId },
    /// Free-form key, rendered verbatim.
    Str { value: String, app_id: ApplicationId },
}

impl Key {
    #[must_use]
    pub const fn of_long(value: u64, app_id: ApplicationId) -> Self {
        Key::Long { value, app_id }
    }

    #[must_use]
    pub fn of_str(value: &str, app_id: ApplicationId) -> Self {
        Key::Str {
            value: value.to_owned(),
            app_id,
        }
    }

    /// The application this key belongs to
    #[must_use]
    pub fn app_id(&self) -> &ApplicationId {
        match self {
            Key::Long { app_id, .. } | Key::Str { app_id, .. } => app_id,
        }
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Long { value, .. } => write!(f, "{value:#x}"),
            Key::Str { value, .. } => f.write_str(value),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // valid in tests
mod test {
    use super::*;

    #[test]
    fn key_equality_includes_application() {
        let app1 = ApplicationId::new(1, "app1");
        let app2 = ApplicationId::new(2, "app2");
        assert_eq!(Key::of_long(7, app1.clone()), Key::of_long(7, app1.clone()));
        assert_ne!(Key::of_long(7, app1.clone()), Key::of_long(7, app2.clone()));
        assert_ne!(Key::of_str("k", app1), Key::of_str("k", app2));
    }

    #[test]
    fn key_display() {
        let app = ApplicationId::new(1, "app1");
        assert_eq!(Key::of_long(0x1f, app.clone()).to_string(), "0x1f");
        assert_eq!(Key::of_str("h1-to-h2", app.clone()).to_string(), "h1-to-h2");
        assert_eq!(Key::of_long(0, app.clone()).app_id(), &app);
    }
}
