//! Selection policy carried between layers.

use crate::period::DateRole;
use crate::selector::Fallback;
use serde::{Deserialize, Serialize};

/// Which date to classify and what to do when nothing matches.
///
/// Defaults to period of report with fallback disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Date role handed to the selector
    pub role: DateRole,
    /// Behavior when no candidate matches
    pub fallback: Fallback,
}

impl SelectorConfig {
    /// Create a config.
    pub const fn new(role: DateRole, fallback: Fallback) -> Self {
        Self { role, fallback }
    }

    /// Set the date role.
    pub const fn with_role(mut self, role: DateRole) -> Self {
        self.role = role;
        self
    }

    /// Set the fallback policy.
    pub const fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }
}
