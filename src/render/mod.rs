//! The rendering engine.
//!
//! [`render_value`] is the single recursive entry point. It follows
//! transparent pointers, applies the minimum-budget rule, guards composite
//! values against cycles and dispatches to the value's budget hook, a
//! registered renderer or the built-in renderer for its shape. Every string
//! it returns is at most `budget` characters long.

mod attrs;
mod container;
mod natural;
mod scalar;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::context::{Cx, Visit};
use crate::error::RenderResult;
use crate::inspect::{Inspect, Shape, ShapeKind};
use crate::registry::Resolved;
use crate::text::{char_len, clamp, placeholder, truncate_scalar, CYCLE_MARKER, ELLIPSIS};

pub(crate) use attrs::render_attrs;

/// Render `value` in at most `budget` characters.
pub(crate) fn render_value(value: &dyn Inspect, budget: usize, cx: &Cx) -> String {
    let shape = match value.shape() {
        Shape::Pointer(inner) => return render_value(inner, budget, cx),
        Shape::Borrowed(inner) => return render_value(&*inner, budget, cx),
        shape => shape,
    };
    if budget < cx.limits.min_budget {
        drop(shape);
        return natural::natural(value, budget, cx).unwrap_or_else(|| placeholder(budget));
    }
    // hooks may recurse into their own value, so they are tracked even on scalars
    if shape.is_scalar() && value.as_budget_repr().is_none() {
        return dispatch(value, shape, budget, cx);
    }
    match cx.enter(value) {
        Visit::Cycle => {
            tracing::trace!(type_name = %value.type_name(), "cycle detected");
            clamp(CYCLE_MARKER.to_string(), budget)
        }
        Visit::Fresh(_guard) => dispatch(value, shape, budget, cx),
    }
}

fn dispatch(value: &dyn Inspect, shape: Shape<'_>, budget: usize, cx: &Cx) -> String {
    if let Some(hook) = value.as_budget_repr() {
        return invoke(value, budget, "budget hook", || hook.budget_repr(budget));
    }
    match cx.registry.resolve(value, shape.kind()) {
        Resolved::Custom(renderer) => {
            invoke(value, budget, "registered renderer", || renderer(value, budget))
        }
        Resolved::Builtin => {
            if let Some(full) = natural::builtin(value, shape, budget, cx) {
                return full;
            }
            let out = builtin(value, value.shape(), budget, cx);
            debug_assert!(
                char_len(&out) <= budget,
                "built-in renderer overflowed: {} > {budget}",
                char_len(&out)
            );
            clamp(out, budget)
        }
        Resolved::Fallback => fallback(value, &shape, budget),
    }
}

/// Degrading built-in rendering for a value that did not fit in full.
fn builtin(value: &dyn Inspect, shape: Shape<'_>, budget: usize, cx: &Cx) -> String {
    if let Some(out) = scalar::render(&shape, budget) {
        return out;
    }
    match shape {
        Shape::Sequence(kind, items) => container::render_sequence(value, kind, items, budget, cx),
        Shape::Set(items) => container::render_set(items, budget, cx),
        Shape::Mapping(kind, entries) => {
            container::render_mapping(value, kind, entries, budget, cx)
        }
        Shape::Record(fields) => attrs::render_record(value, &fields, budget, cx),
        Shape::Object(fields) => attrs::render_object(value, &fields, budget, cx),
        shape => fallback(value, &shape, budget),
    }
}

/// Last resort: the opaque text if the value offers one, else `<TypeName>`.
fn fallback(value: &dyn Inspect, shape: &Shape<'_>, budget: usize) -> String {
    match shape {
        Shape::Opaque(Some(text)) => truncate_scalar(text, budget),
        _ => clamp(attrs::tag(&value.type_name()), budget),
    }
}

/// Run user rendering code, containing its failures.
fn invoke<F>(value: &dyn Inspect, budget: usize, source: &'static str, call: F) -> String
where
    F: FnOnce() -> RenderResult<String>,
{
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(out)) => {
            let len = char_len(&out);
            if len > budget {
                tracing::warn!(
                    type_name = %value.type_name(),
                    source,
                    len,
                    budget,
                    "renderer exceeded its budget; output clamped"
                );
            }
            clamp(out, budget)
        }
        Ok(Err(err)) => {
            tracing::warn!(
                type_name = %value.type_name(),
                source,
                error = %err,
                "renderer failed; falling back to type name"
            );
            clamp(attrs::tag(&value.type_name()), budget)
        }
        Err(payload) => {
            tracing::warn!(
                type_name = %value.type_name(),
                source,
                panic = %panic_message(payload.as_ref()),
                "renderer panicked; falling back to type name"
            );
            clamp(attrs::tag(&value.type_name()), budget)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Render a named child (a mapping value or an attribute) into its slot.
///
/// A composite child whose rendering kept none of its contents is shown as
/// its type stub instead, which names its type and size. `None` when the
/// stub does not fit either, so the caller moves on to stubs or counts.
pub(crate) fn render_slot(value: &dyn Inspect, budget: usize, cx: &Cx) -> Option<String> {
    let out = render_value(value, budget, cx);
    if !is_collapsed(&out) || !is_composite(value) {
        return Some(out);
    }
    let stub = type_stub(value);
    (char_len(&stub) <= budget).then_some(stub)
}

/// A placeholder, a bare tag, or a container whose first entry is already
/// its `...` count.
fn is_collapsed(out: &str) -> bool {
    if out == CYCLE_MARKER {
        return false;
    }
    if out.is_empty() || out.starts_with('<') {
        return true;
    }
    out.trim_start_matches(|c: char| c.is_alphanumeric() || matches!(c, '_' | '(' | '[' | '{'))
        .starts_with(ELLIPSIS)
}

fn is_composite(value: &dyn Inspect) -> bool {
    match value.shape() {
        Shape::Pointer(inner) => is_composite(inner),
        Shape::Borrowed(inner) => is_composite(&*inner),
        shape => matches!(
            shape.kind(),
            ShapeKind::Sequence
                | ShapeKind::Set
                | ShapeKind::Mapping
                | ShapeKind::Record
                | ShapeKind::Object
        ),
    }
}

/// `<TypeName(n)>` or `<TypeName>`: a value's kind and size without its
/// contents.
pub(crate) fn type_stub(value: &dyn Inspect) -> String {
    match value.shape() {
        Shape::Pointer(inner) => type_stub(inner),
        Shape::Borrowed(inner) => type_stub(&*inner),
        shape => {
            let name = value.type_name();
            match shape.size() {
                Some(n) if shape.kind() != ShapeKind::Scalar => format!("<{name}({n})>"),
                _ => format!("<{name}>"),
            }
        }
    }
}
