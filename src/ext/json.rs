//! `serde_json::Value` support.

use std::borrow::Cow;

use serde_json::Value;

use crate::inspect::{Entries, Inspect, Items, MapKind, SeqKind, Shape};

impl Inspect for Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            Value::Null => Shape::Unit("null"),
            Value::Bool(b) => Shape::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Shape::Int(i.into())
                } else if let Some(u) = n.as_u64() {
                    Shape::UInt(u.into())
                } else {
                    Shape::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Shape::Str(s),
            Value::Array(items) => Shape::Sequence(
                SeqKind::List,
                Items::of(items.iter()).with_tail(items.last()),
            ),
            Value::Object(map) => Shape::Mapping(
                MapKind::Plain,
                Entries::of(map.iter()).with_tail(map.iter().next_back()),
            ),
        }
    }

    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        })
    }
}
