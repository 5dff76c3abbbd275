//! Scalars, text and bytes.

use std::fmt::Write;

use crate::inspect::Shape;
use crate::text::{char_len, truncate_scalar, ELLIPSIS, ELLIPSIS_CHAR};

/// Canonical form of a scalar shape, `None` for anything that has children.
pub(crate) fn natural(shape: &Shape<'_>) -> Option<String> {
    Some(match shape {
        Shape::Unit(literal) => (*literal).to_string(),
        Shape::Bool(b) => b.to_string(),
        Shape::Int(n) => n.to_string(),
        Shape::UInt(n) => n.to_string(),
        Shape::Float(f) => format!("{f:?}"),
        Shape::Char(c) => text_repr(c.encode_utf8(&mut [0; 4])),
        Shape::Str(s) => text_repr(s),
        Shape::Bytes(b) => bytes_repr(b),
        _ => return None,
    })
}

/// Render a scalar shape within `budget`.
pub(crate) fn render(shape: &Shape<'_>, budget: usize) -> Option<String> {
    match shape {
        Shape::Str(s) => Some(render_text(s, budget)),
        Shape::Char(c) => Some(render_text(c.encode_utf8(&mut [0; 4]), budget)),
        Shape::Bytes(b) => Some(render_bytes(b, budget)),
        _ => natural(shape).map(|repr| truncate_scalar(&repr, budget)),
    }
}

/// Single quotes unless the text contains a single quote and no double one.
fn quote_for(has_single: bool, has_double: bool) -> char {
    if has_single && !has_double {
        '"'
    } else {
        '\''
    }
}

/// Append the escaped form of `c`, returning how many characters it took.
fn push_escaped(out: &mut String, c: char, quote: char) -> usize {
    let before = out.len();
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if c.is_control() && (c as u32) < 0x100 => {
            let _ = write!(out, "\\x{:02x}", c as u32);
        }
        c => out.push(c),
    }
    char_len(&out[before..])
}

/// Quoted, escaped text literal.
pub(crate) fn text_repr(s: &str) -> String {
    let quote = quote_for(s.contains('\''), s.contains('"'));
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        push_escaped(&mut out, c, quote);
    }
    out.push(quote);
    out
}

/// Text within `budget`. Cuts happen between escape sequences and keep both
/// quotes, with `...` just before the closing one.
pub(crate) fn render_text(s: &str, budget: usize) -> String {
    let full = text_repr(s);
    if char_len(&full) <= budget {
        return full;
    }
    let quote = quote_for(s.contains('\''), s.contains('"'));
    let frame = 2 + ELLIPSIS.len();
    match budget {
        0 => String::new(),
        1 => ELLIPSIS_CHAR.to_string(),
        b if b < frame => format!("{quote}{}{quote}", &ELLIPSIS[..b - 2]),
        b => {
            let room = b - frame;
            let mut out = String::new();
            out.push(quote);
            let mut used = 0;
            let mut unit = String::new();
            for c in s.chars() {
                unit.clear();
                let len = push_escaped(&mut unit, c, quote);
                if used + len > room {
                    break;
                }
                out.push_str(&unit);
                used += len;
            }
            out.push_str(ELLIPSIS);
            out.push(quote);
            out
        }
    }
}

fn push_escaped_byte(out: &mut String, byte: u8, quote: u8) -> usize {
    let before = out.len();
    match byte {
        b'\\' => out.push_str("\\\\"),
        b'\n' => out.push_str("\\n"),
        b'\r' => out.push_str("\\r"),
        b'\t' => out.push_str("\\t"),
        b if b == quote => {
            out.push('\\');
            out.push(b as char);
        }
        0x20..=0x7e => out.push(byte as char),
        _ => {
            let _ = write!(out, "\\x{byte:02x}");
        }
    }
    out.len() - before
}

/// `b'...'` literal with printable ASCII kept and everything else escaped.
pub(crate) fn bytes_repr(bytes: &[u8]) -> String {
    let quote = quote_for(bytes.contains(&b'\''), bytes.contains(&b'"')) as u8;
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote as char);
    for &byte in bytes {
        push_escaped_byte(&mut out, byte, quote);
    }
    out.push(quote as char);
    out
}

/// Bytes within `budget`, cut like text.
pub(crate) fn render_bytes(bytes: &[u8], budget: usize) -> String {
    let full = bytes_repr(bytes);
    if char_len(&full) <= budget {
        return full;
    }
    let frame = 3 + ELLIPSIS.len();
    if budget < frame {
        return truncate_scalar(&full, budget);
    }
    let quote = quote_for(bytes.contains(&b'\''), bytes.contains(&b'"')) as u8;
    let room = budget - frame;
    let mut out = String::from("b");
    out.push(quote as char);
    let mut used = 0;
    let mut unit = String::new();
    for &byte in bytes {
        unit.clear();
        let len = push_escaped_byte(&mut unit, byte, quote);
        if used + len > room {
            break;
        }
        out.push_str(&unit);
        used += len;
    }
    out.push_str(ELLIPSIS);
    out.push(quote as char);
    out
}
