//! `TypeName(name=value, ...)` rendering for records and objects.

use crate::budget::Allocator;
use crate::context::Cx;
use crate::inspect::{Fields, Inspect};
use crate::text::{char_len, clamp, more_marker, SEPARATOR};

use super::{render_slot, type_stub};

/// `<TypeName>`, used when nothing more fits.
pub(crate) fn tag(type_name: &str) -> String {
    format!("<{type_name}>")
}

pub(crate) fn render_record(value: &dyn Inspect, fields: &Fields<'_>, budget: usize, cx: &Cx) -> String {
    render_attrs(&value.type_name(), &fields.visible(false), budget, cx)
}

/// Objects use their summary verbatim when it fits, and their public
/// attributes otherwise.
pub(crate) fn render_object(value: &dyn Inspect, fields: &Fields<'_>, budget: usize, cx: &Cx) -> String {
    if let Some(summary) = fields.summary_text() {
        if char_len(summary) <= budget {
            return summary.to_string();
        }
    }
    render_attrs(&value.type_name(), &fields.visible(true), budget, cx)
}

/// Render named attributes in three phases: full values while each still
/// gets a useful slot, then `name=<Type(n)>` stubs while they fit, then a
/// count of what is left.
pub(crate) fn render_attrs(
    type_name: &str,
    attrs: &[(&str, &dyn Inspect)],
    budget: usize,
    cx: &Cx,
) -> String {
    let name_len = char_len(type_name);
    if attrs.is_empty() || budget <= name_len + 2 {
        return clamp(tag(type_name), budget);
    }
    let inner = budget - name_len - 2;
    let total = attrs.len();
    let mut alloc = Allocator::new(cx.policy, inner, total);
    let mut parts = Vec::with_capacity(total);

    for (idx, (name, value)) in attrs.iter().enumerate() {
        let Some(available) = alloc.slot(idx) else {
            break;
        };
        let Some(value_budget) = available.checked_sub(char_len(name) + 1) else {
            break;
        };
        if value_budget < cx.limits.min_child_budget {
            break;
        }
        let Some(value_part) = render_slot(*value, value_budget, cx) else {
            break;
        };
        let part = format!("{name}={value_part}");
        alloc.place(char_len(&part));
        parts.push(part);
    }

    for (idx, (name, value)) in attrs.iter().enumerate().skip(parts.len()) {
        let part = format!("{name}={}", type_stub(*value));
        let len = char_len(&part);
        if !alloc.fits(idx, len) {
            break;
        }
        alloc.place(len);
        parts.push(part);
    }

    let omitted = total - parts.len();
    if omitted > 0 {
        parts.push(more_marker(omitted));
    }
    let out = format!("{type_name}({})", parts.join(SEPARATOR));
    if char_len(&out) > budget {
        return clamp(tag(type_name), budget);
    }
    out
}
