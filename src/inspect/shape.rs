//! The structural view a value exposes to the renderer.

use std::borrow::Cow;
use std::cell::Ref;
use std::fmt;

use super::Inspect;

/// Flavor of an ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqKind {
    /// `[a, b]`
    List,
    /// `(a, b)`, and `(a,)` for a single element
    Tuple,
    /// A queue-like container rendered as `TypeName([a, b])`.
    Queue,
}

/// Flavor of a key-value mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapKind<'a> {
    /// `{k: v}`
    Plain,
    /// A mapping that produces missing values on demand, rendered as
    /// `TypeName(Factory, {k: v})`. The payload names the factory.
    Defaulting(Cow<'a, str>),
    /// A frequency table rendered as `TypeName({k: n})`; entries must be
    /// supplied most-frequent-first.
    Counter,
}

/// Coarse classification of a [`Shape`], used for capability matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Keyword literals, booleans, numbers and chars.
    Scalar,
    /// Text.
    Text,
    /// Raw bytes.
    Bytes,
    /// Ordered sequences, tuples and queues.
    Sequence,
    /// Unordered collections of values.
    Set,
    /// Key-value mappings.
    Mapping,
    /// Fixed-schema records.
    Record,
    /// Attribute-bearing objects.
    Object,
    /// Transparent handles to another value.
    Pointer,
    /// Nothing to look inside.
    Opaque,
}

/// What a value looks like from the inside.
///
/// Composite variants borrow their children lazily; nothing is rendered or
/// collected until the renderer walks them.
pub enum Shape<'a> {
    /// A keyword-like literal rendered verbatim, e.g. `None`, `()`, `null`.
    Unit(&'a str),
    Bool(bool),
    Int(i128),
    UInt(u128),
    Float(f64),
    Char(char),
    Str(&'a str),
    Bytes(&'a [u8]),
    Sequence(SeqKind, Items<'a>),
    Set(Items<'a>),
    Mapping(MapKind<'a>, Entries<'a>),
    /// Declared fields in declaration order.
    Record(Fields<'a>),
    /// Discovered attributes; names starting with `_` are treated as private.
    Object(Fields<'a>),
    /// A handle that renders exactly as the value it points to.
    Pointer(&'a dyn Inspect),
    /// Like [`Shape::Pointer`], but through a runtime borrow.
    Borrowed(Ref<'a, dyn Inspect>),
    /// Nothing to introspect; the optional text is a best-effort rendering.
    Opaque(Option<Cow<'a, str>>),
}

impl<'a> Shape<'a> {
    /// Coarse classification.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Unit(_)
            | Shape::Bool(_)
            | Shape::Int(_)
            | Shape::UInt(_)
            | Shape::Float(_)
            | Shape::Char(_) => ShapeKind::Scalar,
            Shape::Str(_) => ShapeKind::Text,
            Shape::Bytes(_) => ShapeKind::Bytes,
            Shape::Sequence(..) => ShapeKind::Sequence,
            Shape::Set(_) => ShapeKind::Set,
            Shape::Mapping(..) => ShapeKind::Mapping,
            Shape::Record(_) => ShapeKind::Record,
            Shape::Object(_) => ShapeKind::Object,
            Shape::Pointer(_) | Shape::Borrowed(_) => ShapeKind::Pointer,
            Shape::Opaque(_) => ShapeKind::Opaque,
        }
    }

    /// Scalars cannot contain other values and are never cycle-tracked.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self.kind(),
            ShapeKind::Scalar | ShapeKind::Text | ShapeKind::Bytes
        )
    }

    /// Cheap magnitude used in type stubs: character count, element count or
    /// visible field count. Never walks children.
    pub fn size(&self) -> Option<usize> {
        match self {
            Shape::Str(s) => Some(s.chars().count()),
            Shape::Bytes(b) => Some(b.len()),
            Shape::Sequence(_, items) | Shape::Set(items) => Some(items.len()),
            Shape::Mapping(_, entries) => Some(entries.len()),
            Shape::Record(fields) => Some(fields.visible(false).len()),
            Shape::Object(fields) => Some(fields.visible(true).len()),
            _ => None,
        }
    }
}

impl fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("kind", &self.kind())
            .field("size", &self.size())
            .finish()
    }
}

/// Lazily walked children of a sequence or set.
pub struct Items<'a> {
    len: usize,
    iter: Box<dyn Iterator<Item = &'a dyn Inspect> + 'a>,
    tail: Option<&'a dyn Inspect>,
}

impl<'a> Items<'a> {
    /// Wrap an exact-size iterator of homogeneous children.
    pub fn of<T, I>(iter: I) -> Self
    where
        T: Inspect,
        I: ExactSizeIterator<Item = &'a T> + 'a,
    {
        let len = iter.len();
        Self {
            len,
            iter: Box::new(iter.map(|item| item as &dyn Inspect)),
            tail: None,
        }
    }

    /// Wrap an already type-erased list of children.
    pub fn dynamic(items: Vec<&'a dyn Inspect>) -> Self {
        let tail = items.last().copied();
        Self {
            len: items.len(),
            iter: Box::new(items.into_iter()),
            tail,
        }
    }

    /// Expose the last element so long sequences can show their tail.
    pub fn with_tail<T: Inspect>(mut self, tail: Option<&'a T>) -> Self {
        self.tail = tail.map(|item| item as &dyn Inspect);
        self
    }

    /// Exact number of children.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The last child, when the container can reach it cheaply.
    pub fn tail(&self) -> Option<&'a dyn Inspect> {
        self.tail
    }
}

impl<'a> Iterator for Items<'a> {
    type Item = &'a dyn Inspect;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Lazily walked key-value pairs of a mapping.
pub struct Entries<'a> {
    len: usize,
    iter: Box<dyn Iterator<Item = (&'a dyn Inspect, &'a dyn Inspect)> + 'a>,
    tail: Option<(&'a dyn Inspect, &'a dyn Inspect)>,
}

impl<'a> Entries<'a> {
    /// Wrap an exact-size iterator of homogeneous pairs.
    pub fn of<K, V, I>(iter: I) -> Self
    where
        K: Inspect,
        V: Inspect,
        I: ExactSizeIterator<Item = (&'a K, &'a V)> + 'a,
    {
        let len = iter.len();
        Self {
            len,
            iter: Box::new(iter.map(|(k, v)| (k as &dyn Inspect, v as &dyn Inspect))),
            tail: None,
        }
    }

    /// Wrap an already type-erased list of pairs.
    pub fn dynamic(entries: Vec<(&'a dyn Inspect, &'a dyn Inspect)>) -> Self {
        let tail = entries.last().copied();
        Self {
            len: entries.len(),
            iter: Box::new(entries.into_iter()),
            tail,
        }
    }

    /// Expose the last pair.
    pub fn with_tail<K: Inspect, V: Inspect>(mut self, tail: Option<(&'a K, &'a V)>) -> Self {
        self.tail = tail.map(|(k, v)| (k as &dyn Inspect, v as &dyn Inspect));
        self
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn tail(&self) -> Option<(&'a dyn Inspect, &'a dyn Inspect)> {
        self.tail
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a dyn Inspect, &'a dyn Inspect);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// One named field of a record or object.
pub struct Field<'a> {
    /// Field or attribute name.
    pub name: Cow<'a, str>,
    /// Current value.
    pub value: &'a dyn Inspect,
    /// `false` excludes the field from rendering and from omitted counts.
    pub repr: bool,
}

impl Field<'_> {
    /// Public by naming convention: no leading underscore.
    pub fn is_public(&self) -> bool {
        !self.name.starts_with('_')
    }
}

/// Ordered field list built with a small builder API.
///
/// ```
/// use reprobate::{Fields, Inspect, Shape};
///
/// struct Point {
///     x: i32,
///     y: i32,
///     cache: Vec<u8>,
/// }
///
/// impl Inspect for Point {
///     fn shape(&self) -> Shape<'_> {
///         Shape::Record(
///             Fields::new()
///                 .field("x", &self.x)
///                 .field("y", &self.y)
///                 .hidden("cache", &self.cache),
///         )
///     }
/// }
///
/// let p = Point { x: 1, y: 2, cache: vec![] };
/// assert_eq!(reprobate::render(&p, 100), "Point(x=1, y=2)");
/// ```
#[derive(Default)]
pub struct Fields<'a> {
    fields: Vec<Field<'a>>,
    summary: Option<Cow<'a, str>>,
}

impl<'a> Fields<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rendered field.
    pub fn field<T: Inspect>(self, name: impl Into<Cow<'a, str>>, value: &'a T) -> Self {
        self.field_dyn(name, value)
    }

    /// Add a rendered field holding a type-erased value.
    pub fn field_dyn(mut self, name: impl Into<Cow<'a, str>>, value: &'a dyn Inspect) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value,
            repr: true,
        });
        self
    }

    /// Add a field that is never rendered nor counted.
    pub fn hidden<T: Inspect>(mut self, name: impl Into<Cow<'a, str>>, value: &'a T) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value,
            repr: false,
        });
        self
    }

    /// The value's own short textual form. Objects use it verbatim when it
    /// fits the budget and fall back to their attributes otherwise; records
    /// ignore it.
    pub fn summary(mut self, text: impl Into<Cow<'a, str>>) -> Self {
        self.summary = Some(text.into());
        self
    }

    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field<'a>> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields that take part in rendering, as `(name, value)` pairs.
    pub(crate) fn visible(&self, public_only: bool) -> Vec<(&str, &'a dyn Inspect)> {
        self.fields
            .iter()
            .filter(|f| f.repr && (!public_only || f.is_public()))
            .map(|f| (f.name.as_ref(), f.value))
            .collect()
    }
}
