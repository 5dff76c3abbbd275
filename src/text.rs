//! Character-counted string helpers shared by every renderer.
//!
//! Budgets count `char`s, not bytes, so all measuring and cutting in the crate
//! goes through these functions.

/// Marker inserted where content was cut from text, bytes and containers.
pub const ELLIPSIS: &str = "...";

/// Single-character marker used when a scalar's canonical form is cut.
pub const ELLIPSIS_CHAR: char = '…';

/// Marker emitted in place of a value already being rendered higher up.
pub const CYCLE_MARKER: &str = "<...>";

/// Separator between rendered items.
pub const SEPARATOR: &str = ", ";

/// Length in characters.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Cut `s` to at most `budget` characters.
pub fn clamp(mut s: String, budget: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(budget) {
        s.truncate(idx);
    }
    s
}

/// Borrowing variant of [`clamp`].
pub fn clamp_str(s: &str, budget: usize) -> &str {
    match s.char_indices().nth(budget) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// The placeholder used when nothing meaningful fits.
pub fn placeholder(budget: usize) -> String {
    clamp_str(ELLIPSIS, budget).to_string()
}

/// Cut a scalar's canonical form, marking the cut with `…`.
pub fn truncate_scalar(repr: &str, budget: usize) -> String {
    let len = char_len(repr);
    if len <= budget {
        return repr.to_string();
    }
    if budget == 0 {
        return String::new();
    }
    let mut out: String = repr.chars().take(budget - 1).collect();
    out.push(ELLIPSIS_CHAR);
    out
}

/// The trailing count marker, e.g. `...3 more`.
pub fn more_marker(omitted: usize) -> String {
    format!("{ELLIPSIS}{omitted} more")
}

/// Length of [`more_marker`] without allocating.
pub fn more_marker_len(omitted: usize) -> usize {
    ELLIPSIS.len() + digits(omitted) + " more".len()
}

/// Number of decimal digits in `n`.
pub fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

/// Shorten a fully-qualified Rust type name to its last path segment,
/// dropping generic arguments: `alloc::vec::Vec<u8>` becomes `Vec`.
pub fn short_type_name(full: &'static str) -> &'static str {
    if full.starts_with('(') {
        return "tuple";
    }
    if full.starts_with('[') {
        return if full.contains(';') { "array" } else { "slice" };
    }
    let base = match full.find('<') {
        Some(idx) => &full[..idx],
        None => full,
    };
    match base.rfind("::") {
        Some(idx) => &base[idx + 2..],
        None => base,
    }
}
