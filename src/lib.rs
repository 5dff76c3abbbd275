//! # reprobate
//!
//! Budget-controlled debug rendering. [`render`] turns any value into a
//! human-readable string that is guaranteed to be at most `budget`
//! characters long, keeping as much structure as the budget allows:
//!
//! ```
//! use std::collections::BTreeMap;
//! use reprobate::{render, Inspect};
//!
//! let mut user: BTreeMap<&str, Box<dyn Inspect>> = BTreeMap::new();
//! user.insert("name", Box::new("alice"));
//! user.insert("scores", Box::new(vec![98, 87, 95, 72, 88]));
//!
//! assert_eq!(render(&user, 60), "{'name': 'alice', 'scores': [98, 87, 95, 72, 88]}");
//! assert_eq!(render(&user, 30), "{'name': 'alice', ...1 more}");
//!
//! let big: Vec<u32> = (0..1000).collect();
//! assert_eq!(render(&big, 40), "[0, 1, 2, 3, ...996 more]");
//! ```
//!
//! ## How budgets degrade
//!
//! A composite that does not fit in full degrades per item: leading items
//! render in full, later ones shrink to type stubs such as `<Vec(12)>`,
//! and whatever remains collapses into an exact `...N more` count. How the
//! budget is split among items is chosen by a [`Policy`].
//!
//! ## Extending
//!
//! - Implement [`Inspect`] to describe a type's structure.
//! - Implement [`BudgetRepr`] for full control; it wins over everything else.
//! - Call [`register`] or [`register_capability`] to install renderers for
//!   types you do not own.
//!
//! Custom renderers recurse through [`render_child`] and
//! [`render_attrs`], which share the cycle detection and policy of the
//! render in progress.

pub mod budget;
pub mod config;
mod context;
pub mod error;
mod ext;
pub mod inspect;
pub mod registry;
mod render;
pub mod text;

pub use budget::Policy;
pub use config::RenderConfig;
pub use error::{RenderError, RenderResult};
pub use inspect::{
    BudgetRepr, Bytes, Counter, DefaultMap, Entries, Field, Fields, Inspect, Items, MapKind,
    Object, SeqKind, Shape, ShapeKind,
};
pub use registry::{
    is_registered, register, register_capability, registered_types, unregister, Capability,
};

/// Render `value` in at most `budget` characters with the greedy policy.
pub fn render(value: &dyn Inspect, budget: usize) -> String {
    render_with(value, budget, Policy::Greedy)
}

/// Render `value` in at most `budget` characters with the given policy.
pub fn render_with(value: &dyn Inspect, budget: usize, policy: Policy) -> String {
    RenderConfig::default()
        .with_budget(budget)
        .with_policy(policy)
        .render(value)
}

/// Render a child value from inside a custom renderer.
///
/// The child shares the active render's cycle detection, policy and
/// thresholds. Fails with [`RenderError::NoActiveRender`] when no render is
/// in progress on this thread.
pub fn render_child(value: &dyn Inspect, budget: usize) -> RenderResult<String> {
    let cx = context::current()?;
    Ok(text::clamp(render::render_value(value, budget, &cx), budget))
}

/// Render `TypeName(name=value, ...)` from named attributes, degrading the
/// same way built-in records do. Must be called from inside a render.
///
/// ```
/// use reprobate::{render, render_attrs, BudgetRepr, Inspect, RenderResult, Shape};
///
/// struct Conn {
///     host: String,
///     port: u16,
/// }
///
/// impl BudgetRepr for Conn {
///     fn budget_repr(&self, budget: usize) -> RenderResult<String> {
///         render_attrs(&[("host", &self.host as &dyn Inspect), ("port", &self.port)], "Conn", budget)
///     }
/// }
///
/// impl Inspect for Conn {
///     fn shape(&self) -> Shape<'_> {
///         Shape::Opaque(None)
///     }
///
///     fn as_budget_repr(&self) -> Option<&dyn BudgetRepr> {
///         Some(self)
///     }
/// }
///
/// let conn = Conn { host: "db.local".into(), port: 5432 };
/// assert_eq!(render(&conn, 100), "Conn(host='db.local', port=5432)");
/// ```
pub fn render_attrs(
    attrs: &[(&str, &dyn Inspect)],
    type_name: &str,
    budget: usize,
) -> RenderResult<String> {
    let cx = context::current()?;
    Ok(text::clamp(
        render::render_attrs(type_name, attrs, budget, &cx),
        budget,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_child_outside_render_fails() {
        assert!(matches!(
            render_child(&1, 10),
            Err(RenderError::NoActiveRender)
        ));
        assert!(matches!(
            render_attrs(&[], "X", 10),
            Err(RenderError::NoActiveRender)
        ));
    }

    #[test]
    fn test_zero_and_one_budget() {
        let v = vec!["a"; 10];
        assert_eq!(render(&v, 0), "");
        assert!(render(&v, 1).chars().count() <= 1);
    }
}
