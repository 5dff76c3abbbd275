//! Container types with a rendering of their own: counters, defaulting maps,
//! byte strings and runtime attribute bags.

use std::borrow::Cow;
use std::collections::BTreeMap;

use super::{Entries, Fields, Inspect, MapKind, Shape};
use crate::text::short_type_name;

/// A frequency table. Renders most-frequent-first as `Counter({k: n, ...})`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter<K: Ord> {
    counts: BTreeMap<K, usize>,
}

impl<K: Ord> Default for Counter<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<K: Ord> Counter<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `key`, returning its new count.
    pub fn add(&mut self, key: K) -> usize {
        self.add_n(key, 1)
    }

    /// Count `n` occurrences of `key`, returning its new count.
    pub fn add_n(&mut self, key: K, n: usize) -> usize {
        let count = self.counts.entry(key).or_insert(0);
        *count += n;
        *count
    }

    /// Count for `key`, zero when never seen.
    pub fn get(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Keys with their counts, highest count first. Ties keep key order.
    pub fn most_common(&self) -> Vec<(&K, usize)> {
        let mut pairs: Vec<(&K, usize)> = self.counts.iter().map(|(k, n)| (k, *n)).collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }
}

impl<K: Ord> FromIterator<K> for Counter<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counter = Counter::new();
        for key in iter {
            counter.add(key);
        }
        counter
    }
}

impl<K: Inspect + Ord> Inspect for Counter<K> {
    fn shape(&self) -> Shape<'_> {
        let mut pairs: Vec<(&K, &usize)> = self.counts.iter().collect();
        pairs.sort_by(|a, b| b.1.cmp(a.1));
        let entries = pairs
            .into_iter()
            .map(|(k, n)| (k as &dyn Inspect, n as &dyn Inspect))
            .collect();
        Shape::Mapping(MapKind::Counter, Entries::dynamic(entries))
    }
}

/// A map that creates missing values with a factory on first access.
/// Renders as `DefaultMap(Factory, {k: v, ...})`, where `Factory` is the
/// short name of the value type.
#[derive(Debug, Clone)]
pub struct DefaultMap<K: Ord, V> {
    entries: BTreeMap<K, V>,
    factory: fn() -> V,
}

impl<K: Ord, V: Default> Default for DefaultMap<K, V> {
    fn default() -> Self {
        Self::with_factory(V::default)
    }
}

impl<K: Ord, V> DefaultMap<K, V> {
    pub fn new() -> Self
    where
        V: Default,
    {
        Self::default()
    }

    pub fn with_factory(factory: fn() -> V) -> Self {
        Self {
            entries: BTreeMap::new(),
            factory,
        }
    }

    /// Value for `key`, created by the factory if absent.
    pub fn entry(&mut self, key: K) -> &mut V {
        let factory = self.factory;
        self.entries.entry(key).or_insert_with(factory)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }
}

impl<K: Inspect + Ord, V: Inspect> Inspect for DefaultMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        let factory = short_type_name(std::any::type_name::<V>());
        Shape::Mapping(
            MapKind::Defaulting(Cow::Borrowed(factory)),
            Entries::of(self.entries.iter()).with_tail(self.entries.last_key_value()),
        )
    }
}

/// Raw bytes, rendered as a `b'...'` literal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Bytes(bytes)
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Bytes(bytes.to_vec())
    }
}

impl Inspect for Bytes {
    fn shape(&self) -> Shape<'_> {
        Shape::Bytes(&self.0)
    }
}

/// A dynamically built attribute bag, for values whose attributes are only
/// known at runtime.
///
/// Attributes keep insertion order; names starting with `_` are private and
/// never rendered. An optional summary is used verbatim whenever it fits.
///
/// ```
/// use reprobate::Object;
///
/// let user = Object::new("User")
///     .with("name", "alice")
///     .with("_token", "secret")
///     .with("age", 30);
/// assert_eq!(reprobate::render(&user, 100), "User(name='alice', age=30)");
/// ```
pub struct Object {
    name: String,
    attrs: Vec<(String, Box<dyn Inspect>)>,
    summary: Option<String>,
}

impl Object {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            summary: None,
        }
    }

    /// Builder form of [`Object::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Inspect) -> Self {
        self.set(name, value);
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set an attribute, replacing any previous value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Inspect) {
        let name = name.into();
        let value: Box<dyn Inspect> = Box::new(value);
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Inspect> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_ref())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of attributes, private ones included.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl Inspect for Object {
    fn shape(&self) -> Shape<'_> {
        let mut fields = Fields::new();
        for (name, value) in &self.attrs {
            fields = fields.field_dyn(name.as_str(), value.as_ref());
        }
        if let Some(summary) = &self.summary {
            fields = fields.summary(summary.as_str());
        }
        Shape::Object(fields)
    }

    fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}
