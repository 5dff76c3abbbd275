//! Full, undegraded rendering with an early exit.
//!
//! Before a built-in renderer starts trading detail for space it asks for
//! the value's natural form: the complete rendering with nothing omitted.
//! Writing stops as soon as the output would pass the limit, so the attempt
//! costs at most `limit` characters of work per level. Values whose
//! rendering belongs to user code (hooks and registered renderers) have no
//! natural form and make the attempt give up.

use crate::context::{Cx, Visit};
use crate::inspect::{Entries, Fields, Inspect, Items, MapKind, SeqKind, Shape};
use crate::registry::Resolved;
use crate::text::{char_len, CYCLE_MARKER, SEPARATOR};

use super::{attrs, scalar};

/// Output buffer that refuses to grow past its limit.
struct Bounded {
    out: String,
    used: usize,
    limit: usize,
}

impl Bounded {
    fn new(limit: usize) -> Self {
        Self {
            out: String::new(),
            used: 0,
            limit,
        }
    }

    fn push(&mut self, s: &str) -> Option<()> {
        let len = char_len(s);
        if self.used + len > self.limit {
            return None;
        }
        self.used += len;
        self.out.push_str(s);
        Some(())
    }

    /// Render `value` naturally into the space that is left.
    fn value(&mut self, value: &dyn Inspect, cx: &Cx) -> Option<()> {
        let part = natural(value, self.limit - self.used, cx)?;
        self.push(&part)
    }

    fn items(&mut self, items: Items<'_>, cx: &Cx) -> Option<()> {
        for (idx, item) in items.enumerate() {
            if idx > 0 {
                self.push(SEPARATOR)?;
            }
            self.value(item, cx)?;
        }
        Some(())
    }

    fn entries(&mut self, entries: Entries<'_>, cx: &Cx) -> Option<()> {
        for (idx, (key, value)) in entries.enumerate() {
            if idx > 0 {
                self.push(SEPARATOR)?;
            }
            self.value(key, cx)?;
            self.push(": ")?;
            self.value(value, cx)?;
        }
        Some(())
    }

    fn finish(self) -> String {
        self.out
    }
}

/// The natural form of `value` if it is at most `limit` characters.
pub(crate) fn natural(value: &dyn Inspect, limit: usize, cx: &Cx) -> Option<String> {
    let shape = match value.shape() {
        Shape::Pointer(inner) => return natural(inner, limit, cx),
        Shape::Borrowed(inner) => return natural(&*inner, limit, cx),
        shape => shape,
    };
    if shape.is_scalar() {
        return resolved(value, shape, limit, cx);
    }
    match cx.enter(value) {
        Visit::Cycle => (CYCLE_MARKER.len() <= limit).then(|| CYCLE_MARKER.to_string()),
        Visit::Fresh(_guard) => resolved(value, shape, limit, cx),
    }
}

fn resolved(value: &dyn Inspect, shape: Shape<'_>, limit: usize, cx: &Cx) -> Option<String> {
    if value.as_budget_repr().is_some() {
        return None;
    }
    match cx.registry.resolve(value, shape.kind()) {
        Resolved::Builtin => builtin(value, shape, limit, cx),
        Resolved::Fallback => {
            let out = match shape {
                Shape::Opaque(Some(text)) => text.into_owned(),
                _ => format!("<{}>", value.type_name()),
            };
            (char_len(&out) <= limit).then_some(out)
        }
        Resolved::Custom(_) => None,
    }
}

/// Natural form of a value already entered and known to render built-in.
pub(crate) fn builtin(
    value: &dyn Inspect,
    shape: Shape<'_>,
    limit: usize,
    cx: &Cx,
) -> Option<String> {
    if let Some(repr) = scalar::natural(&shape) {
        return (char_len(&repr) <= limit).then_some(repr);
    }
    let mut w = Bounded::new(limit);
    match shape {
        Shape::Sequence(kind, items) => match kind {
            SeqKind::List => list(&mut w, items, "[", "]", cx)?,
            SeqKind::Tuple => {
                if items.len() == 1 {
                    list(&mut w, items, "(", ",)", cx)?
                } else {
                    list(&mut w, items, "(", ")", cx)?
                }
            }
            SeqKind::Queue => {
                let name = value.type_name();
                if items.is_empty() {
                    w.push(&format!("{name}()"))?;
                } else {
                    w.push(&format!("{name}("))?;
                    list(&mut w, items, "[", "]", cx)?;
                    w.push(")")?;
                }
            }
        },
        Shape::Set(items) => {
            if items.is_empty() {
                w.push("set()")?;
            } else {
                list(&mut w, items, "{", "}", cx)?;
            }
        }
        Shape::Mapping(kind, entries) => {
            let name = value.type_name();
            match kind {
                MapKind::Plain => mapping(&mut w, entries, cx)?,
                MapKind::Defaulting(factory) => {
                    if entries.is_empty() {
                        w.push(&format!("{name}({factory})"))?;
                    } else {
                        w.push(&format!("{name}({factory}, "))?;
                        mapping(&mut w, entries, cx)?;
                        w.push(")")?;
                    }
                }
                MapKind::Counter => {
                    if entries.is_empty() {
                        w.push(&format!("{name}()"))?;
                    } else {
                        w.push(&format!("{name}("))?;
                        mapping(&mut w, entries, cx)?;
                        w.push(")")?;
                    }
                }
            }
        }
        Shape::Record(fields) => fields_form(&mut w, value, &fields, false, cx)?,
        Shape::Object(fields) => {
            if let Some(summary) = fields.summary_text() {
                return (char_len(summary) <= limit).then(|| summary.to_string());
            }
            fields_form(&mut w, value, &fields, true, cx)?
        }
        _ => return None,
    }
    Some(w.finish())
}

fn list(w: &mut Bounded, items: Items<'_>, open: &str, close: &str, cx: &Cx) -> Option<()> {
    w.push(open)?;
    w.items(items, cx)?;
    w.push(close)
}

fn mapping(w: &mut Bounded, entries: Entries<'_>, cx: &Cx) -> Option<()> {
    w.push("{")?;
    w.entries(entries, cx)?;
    w.push("}")
}

fn fields_form(
    w: &mut Bounded,
    value: &dyn Inspect,
    fields: &Fields<'_>,
    public_only: bool,
    cx: &Cx,
) -> Option<()> {
    let name = value.type_name();
    let visible = fields.visible(public_only);
    if visible.is_empty() {
        return w.push(&attrs::tag(&name));
    }
    w.push(&name)?;
    w.push("(")?;
    for (idx, (field, item)) in visible.into_iter().enumerate() {
        if idx > 0 {
            w.push(SEPARATOR)?;
        }
        w.push(field)?;
        w.push("=")?;
        w.value(item, cx)?;
    }
    w.push(")")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use std::collections::BTreeMap;

    fn cx() -> Cx {
        Cx::new(&RenderConfig::default())
    }

    #[test]
    fn test_natural_fits() {
        let cx = cx();
        let v = vec![1, 2, 3];
        assert_eq!(natural(&v, 9, &cx).as_deref(), Some("[1, 2, 3]"));
        assert_eq!(natural(&v, 8, &cx), None);
    }

    #[test]
    fn test_natural_nested_mapping() {
        let cx = cx();
        let mut m = BTreeMap::new();
        m.insert("k", vec![(1, "x")]);
        assert_eq!(natural(&m, 100, &cx).as_deref(), Some("{'k': [(1, 'x')]}"));
    }

    #[test]
    fn test_natural_empty_forms() {
        let cx = cx();
        assert_eq!(natural(&Vec::<i32>::new(), 10, &cx).as_deref(), Some("[]"));
        assert_eq!(
            natural(&std::collections::BTreeSet::<i32>::new(), 10, &cx).as_deref(),
            Some("set()")
        );
        assert_eq!(natural(&(7,), 10, &cx).as_deref(), Some("(7,)"));
    }

    #[test]
    fn test_natural_releases_seen_set() {
        let cx = cx();
        let v = vec![vec![1], vec![2]];
        assert!(natural(&v, 3, &cx).is_none());
        assert_eq!(cx.in_progress(), 0);
    }
}
