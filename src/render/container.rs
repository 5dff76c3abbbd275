//! Sequences, sets, mappings and the wrapper forms built on them.

use crate::budget::Allocator;
use crate::context::Cx;
use crate::inspect::{Entries, Inspect, Items, MapKind, SeqKind};
use crate::text::{
    char_len, clamp, digits, more_marker, more_marker_len, placeholder, ELLIPSIS, SEPARATOR,
};

use super::{render_slot, render_value, type_stub};

/// Brackets of a bracketed collection.
struct Delims {
    open: &'static str,
    close: &'static str,
    empty: &'static str,
}

const LIST: Delims = Delims {
    open: "[",
    close: "]",
    empty: "[]",
};

const TUPLE: Delims = Delims {
    open: "(",
    close: ")",
    empty: "()",
};

const SET: Delims = Delims {
    open: "{",
    close: "}",
    empty: "set()",
};

const MAP: Delims = Delims {
    open: "{",
    close: "}",
    empty: "{}",
};

fn summary_len(delims: &Delims, total: usize) -> usize {
    delims.open.len() + ELLIPSIS.len() + digits(total) + " items".len() + delims.close.len()
}

/// `[...N items]`, then `[...]`, then the bare placeholder, whichever fits.
fn collapsed(delims: &Delims, total: usize, budget: usize) -> String {
    let summary = format!("{}{ELLIPSIS}{total} items{}", delims.open, delims.close);
    if char_len(&summary) <= budget {
        return summary;
    }
    let short = format!("{}{ELLIPSIS}{}", delims.open, delims.close);
    if char_len(&short) <= budget {
        return short;
    }
    placeholder(budget)
}

/// Wrap an inner rendering in `prefix`/`suffix`, or fall back to `shell`
/// when the container is empty or the wrapper leaves too little room.
fn wrapped(
    prefix: &str,
    suffix: &str,
    shell: &str,
    empty: bool,
    budget: usize,
    cx: &Cx,
    inner: impl FnOnce(usize) -> String,
) -> String {
    let frame = char_len(prefix) + char_len(suffix);
    if empty || budget <= char_len(shell) || budget < frame + cx.limits.min_budget {
        return clamp(shell.to_string(), budget);
    }
    format!("{prefix}{}{suffix}", inner(budget - frame))
}

pub(crate) fn render_sequence(
    value: &dyn Inspect,
    kind: SeqKind,
    items: Items<'_>,
    budget: usize,
    cx: &Cx,
) -> String {
    match kind {
        SeqKind::List => render_items(items, &LIST, true, false, budget, cx),
        SeqKind::Tuple => {
            let single = items.len() == 1;
            render_items(items, &TUPLE, true, single, budget, cx)
        }
        SeqKind::Queue => {
            let name = value.type_name();
            let shell = format!("{name}()");
            let empty = items.is_empty();
            wrapped(&format!("{name}("), ")", &shell, empty, budget, cx, |inner| {
                render_items(items, &LIST, true, false, inner, cx)
            })
        }
    }
}

pub(crate) fn render_set(items: Items<'_>, budget: usize, cx: &Cx) -> String {
    render_items(items, &SET, false, false, budget, cx)
}

/// Render items in order while each gets at least the minimum child budget,
/// optionally peek at the last item, and count the rest.
fn render_items(
    items: Items<'_>,
    delims: &Delims,
    peek_tail: bool,
    trailing_comma: bool,
    budget: usize,
    cx: &Cx,
) -> String {
    let total = items.len();
    if total == 0 {
        return clamp(delims.empty.to_string(), budget);
    }
    if budget <= summary_len(delims, total) {
        return collapsed(delims, total, budget);
    }
    let close = if trailing_comma { ",)" } else { delims.close };
    let inner = budget - delims.open.len() - close.len();
    let min_child = cx.limits.min_child_budget;
    // long enough to be worth showing the last item after the count
    let tail = if peek_tail && total > 2 && inner >= 4 * min_child {
        items.tail()
    } else {
        None
    };

    let mut alloc = Allocator::new(cx.policy, inner, total).with_floor(min_child);
    let mut parts = Vec::new();
    for (idx, item) in items.enumerate() {
        let hold = if tail.is_some() && total - idx > 2 {
            2 * min_child
        } else {
            0
        };
        let Some(available) = alloc.slot_reserving(idx, hold) else {
            break;
        };
        if available < min_child {
            break;
        }
        let part = render_value(item, available, cx);
        alloc.place(char_len(&part));
        parts.push(part);
    }

    let mut omitted = total - parts.len();
    let mut tail_part = None;
    if let Some(last) = tail.filter(|_| omitted > 1) {
        let remaining = alloc.remaining();
        let around = SEPARATOR.len() + more_marker_len(omitted - 1) + SEPARATOR.len();
        if remaining > 2 * min_child && remaining > around {
            let tail_budget = (remaining - around).min(remaining / 3);
            if tail_budget >= min_child {
                tail_part = Some(render_value(last, tail_budget, cx));
                omitted -= 1;
            }
        }
    }
    if omitted > 0 {
        parts.push(more_marker(omitted));
    }
    parts.extend(tail_part);

    let close = if omitted > 0 { delims.close } else { close };
    let out = format!("{}{}{close}", delims.open, parts.join(SEPARATOR));
    if char_len(&out) > budget {
        return collapsed(delims, total, budget);
    }
    out
}

pub(crate) fn render_mapping(
    value: &dyn Inspect,
    kind: MapKind<'_>,
    entries: Entries<'_>,
    budget: usize,
    cx: &Cx,
) -> String {
    let empty = entries.is_empty();
    match kind {
        MapKind::Plain => render_entries(entries, budget, cx),
        MapKind::Defaulting(factory) => {
            let name = value.type_name();
            let shell = format!("{name}({factory})");
            wrapped(&format!("{name}({factory}, "), ")", &shell, empty, budget, cx, |inner| {
                render_entries(entries, inner, cx)
            })
        }
        MapKind::Counter => {
            let name = value.type_name();
            let shell = format!("{name}()");
            wrapped(&format!("{name}("), ")", &shell, empty, budget, cx, |inner| {
                render_entries(entries, inner, cx)
            })
        }
    }
}

/// Render `key: value` entries in three phases: full entries while the
/// value still gets at least the minimum budget, `key: <Type(n)>` stubs
/// while they fit, then a count of the rest.
fn render_entries(entries: Entries<'_>, budget: usize, cx: &Cx) -> String {
    let total = entries.len();
    if total == 0 {
        return clamp(MAP.empty.to_string(), budget);
    }
    if budget <= summary_len(&MAP, total) {
        return collapsed(&MAP, total, budget);
    }
    let limits = cx.limits;
    let inner = budget - 2;
    let mut alloc = Allocator::new(cx.policy, inner, total);
    let mut entries = entries.peekable();
    let mut parts = Vec::new();

    while let Some(&(key, item)) = entries.peek() {
        let idx = parts.len();
        let Some(available) = alloc.slot(idx) else {
            break;
        };
        if available < limits.min_child_budget {
            break;
        }
        let key_part = render_value(key, (available / 2).min(limits.key_budget_cap), cx);
        let Some(value_budget) = available.checked_sub(char_len(&key_part) + 2) else {
            break;
        };
        if value_budget < limits.min_budget {
            break;
        }
        let Some(value_part) = render_slot(item, value_budget, cx) else {
            break;
        };
        let part = format!("{key_part}: {value_part}");
        alloc.place(char_len(&part));
        parts.push(part);
        entries.next();
    }

    while let Some(&(key, item)) = entries.peek() {
        let idx = parts.len();
        let key_budget = (alloc.remaining() / 2).min(limits.key_budget_cap);
        if key_budget < limits.min_budget {
            break;
        }
        let part = format!("{}: {}", render_value(key, key_budget, cx), type_stub(item));
        let len = char_len(&part);
        if !alloc.fits(idx, len) {
            break;
        }
        alloc.place(len);
        parts.push(part);
        entries.next();
    }

    let omitted = total - parts.len();
    if omitted > 0 {
        parts.push(more_marker(omitted));
    }
    let out = format!("{{{}}}", parts.join(SEPARATOR));
    if char_len(&out) > budget {
        return collapsed(&MAP, total, budget);
    }
    out
}
