//! Budget allocation policies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// How a composite value splits its budget among its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Each item takes as much of the remaining budget as it can use.
    /// Early items get the most detail; later ones degrade first.
    #[default]
    Greedy,
    /// The budget is split evenly across all items up front, so every item
    /// gets comparable detail regardless of position. Unused share is not
    /// handed on to later items.
    Even,
}

impl Policy {
    /// Stable lower-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Greedy => "greedy",
            Policy::Even => "even",
        }
    }

    /// Whether the policy caps items at a fixed up-front share.
    pub fn is_even(&self) -> bool {
        matches!(self, Policy::Even)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(Policy::Greedy),
            "even" => Ok(Policy::Even),
            _ => Err(RenderError::InvalidPolicy(s.to_string())),
        }
    }
}
