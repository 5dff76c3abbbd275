//! Render configuration.
//!
//! [`RenderConfig`] bundles the budget, the allocation policy and the
//! degradation thresholds. It can be built in code, read from the
//! environment, or loaded from a TOML file:
//!
//! ```toml
//! budget = 120
//! policy = "even"
//! min_child_budget = 12
//! ```

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::budget::{Policy, DEFAULT_BUDGET, KEY_BUDGET_CAP, MIN_BUDGET, MIN_CHILD_BUDGET};
use crate::context::Session;
use crate::error::RenderResult;
use crate::inspect::Inspect;
use crate::render::render_value;
use crate::text::clamp;

/// Environment variable overriding the default budget.
pub const BUDGET_ENV_VAR: &str = "REPROBATE_BUDGET";

/// Environment variable overriding the default policy.
pub const POLICY_ENV_VAR: &str = "REPROBATE_POLICY";

/// Settings for a top-level render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum characters in the output.
    pub budget: usize,

    /// How composites split their budget.
    pub policy: Policy,

    /// Below this budget values render in full or as `...`.
    pub min_budget: usize,

    /// Smallest slot an item gets for a full render.
    pub min_child_budget: usize,

    /// Upper bound on the budget spent on a mapping key.
    pub key_budget_cap: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            policy: Policy::default(),
            min_budget: MIN_BUDGET,
            min_child_budget: MIN_CHILD_BUDGET,
            key_budget_cap: KEY_BUDGET_CAP,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_budget(mut self, budget: usize) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_min_budget(mut self, min_budget: usize) -> Self {
        self.min_budget = min_budget;
        self
    }

    pub fn with_min_child_budget(mut self, min_child_budget: usize) -> Self {
        self.min_child_budget = min_child_budget;
        self
    }

    pub fn with_key_budget_cap(mut self, key_budget_cap: usize) -> Self {
        self.key_budget_cap = key_budget_cap;
        self
    }

    /// Defaults overridden by `REPROBATE_BUDGET` and `REPROBATE_POLICY`.
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::default().merge_vars(|key| env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps variable names to values.
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(BUDGET_ENV_VAR) {
            match raw.trim().parse() {
                Ok(budget) => self.budget = budget,
                Err(err) => tracing::warn!(
                    var = BUDGET_ENV_VAR,
                    value = %raw,
                    error = %err,
                    "ignoring invalid budget"
                ),
            }
        }
        if let Some(raw) = lookup(POLICY_ENV_VAR) {
            match raw.parse::<Policy>() {
                Ok(policy) => self.policy = policy,
                Err(err) => {
                    tracing::warn!(var = POLICY_ENV_VAR, error = %err, "ignoring invalid policy")
                }
            }
        }
        self
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> RenderResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load a TOML file.
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded render config");
        Ok(config)
    }

    /// Render `value` with these settings.
    pub fn render(&self, value: &dyn Inspect) -> String {
        let session = Session::begin(self);
        tracing::trace!(budget = self.budget, policy = %self.policy, "render");
        let out = render_value(value, self.budget, session.cx());
        clamp(out, self.budget)
    }
}
