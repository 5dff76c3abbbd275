//! Character budgets and how composite values split them.
//!
//! A budget is a plain `usize` count of characters threaded through every
//! render call. Composite renderers hand slices of their budget to their items
//! according to a [`Policy`]:
//!
//! - **Greedy** (default): items are rendered in order and each may use
//!   everything that remains, so early items get the most detail.
//! - **Even**: the budget is divided evenly up front so every item gets
//!   comparable detail.
//!
//! Both policies reserve room for brackets, separators and the trailing
//! `...N more` marker before any item is rendered.

mod allocator;
mod policy;

pub(crate) use allocator::Allocator;
pub use policy::Policy;

/// Default top-level budget used by [`RenderConfig`](crate::RenderConfig).
pub const DEFAULT_BUDGET: usize = 200;

/// Below this budget a value renders as its natural form if that fits, and
/// otherwise as the `...` placeholder.
pub const MIN_BUDGET: usize = 5;

/// Smallest slot an item is given for a full render inside a composite.
pub const MIN_CHILD_BUDGET: usize = 15;

/// Upper bound on the budget spent on a single mapping key.
pub const KEY_BUDGET_CAP: usize = 40;
