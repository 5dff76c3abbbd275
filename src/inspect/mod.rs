//! Introspection layer: how a value describes itself to the renderer.
//!
//! Every renderable value implements [`Inspect`], which reports a [`Shape`]:
//! a scalar, a text, a sequence of children, a mapping, a record and so on.
//! The renderer only ever walks shapes; it never needs to know the concrete
//! type, which is what lets a single entry point handle arbitrarily nested
//! heterogeneous data.
//!
//! Types that know how to summarise themselves under a budget also implement
//! [`BudgetRepr`] and return it from [`Inspect::as_budget_repr`]. That hook
//! wins over every registered renderer.

mod impls;
mod shape;
mod wrappers;

use std::any::Any;
use std::borrow::Cow;

use crate::error::RenderResult;
use crate::text::short_type_name;

pub use shape::{Entries, Field, Fields, Items, MapKind, SeqKind, Shape, ShapeKind};
pub use wrappers::{Bytes, Counter, DefaultMap, Object};

/// A value the renderer can look inside.
pub trait Inspect: Any + 'static {
    /// Structural view of the value.
    fn shape(&self) -> Shape<'_>;

    /// Short name used in type stubs and fallbacks, e.g. `Vec` or `Point`.
    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(short_type_name(std::any::type_name::<Self>()))
    }

    /// The value's own budget-aware rendering, if it has one.
    fn as_budget_repr(&self) -> Option<&dyn BudgetRepr> {
        None
    }
}

/// Self-rendering under a character budget.
///
/// Implementations may call [`render_child`](crate::render_child) and
/// [`render_attrs`](crate::render_attrs) to delegate parts of the work back to
/// the engine. Output longer than `budget` is cut and logged; errors and
/// panics fall back to `<TypeName>`.
pub trait BudgetRepr {
    fn budget_repr(&self, budget: usize) -> RenderResult<String>;
}
