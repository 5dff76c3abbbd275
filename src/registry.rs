//! Process-wide renderer registry.
//!
//! Dispatch for a value that has no budget hook of its own checks, in order:
//!
//! 1. renderers registered for its exact type;
//! 2. user capability renderers, in registration order;
//! 3. the built-in scalar, text, bytes, mapping, sequence, set and record
//!    renderers;
//! 4. the built-in attribute renderer for object shapes;
//! 5. the opaque fallback.
//!
//! The registry is copy-on-write. Every top-level render takes a snapshot,
//! so registrations made while a render is running apply from the next one.

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::error::{RenderError, RenderResult};
use crate::inspect::{Inspect, ShapeKind};

/// A type-erased renderer.
pub type RenderFn = Arc<dyn Fn(&dyn Inspect, usize) -> RenderResult<String> + Send + Sync>;

/// A type-erased capability test.
pub type Predicate = Arc<dyn Fn(&dyn Inspect) -> bool + Send + Sync>;

/// A structural property a renderer can be registered against.
#[derive(Clone)]
pub enum Capability {
    Scalar,
    Text,
    Bytes,
    Sequence,
    Set,
    Mapping,
    Record,
    Object,
    /// A named user-defined test on the value itself.
    Matching {
        name: Cow<'static, str>,
        predicate: Predicate,
    },
}

impl Capability {
    /// A capability held by every value for which `predicate` returns true.
    pub fn matching<F>(name: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&dyn Inspect) -> bool + Send + Sync + 'static,
    {
        Capability::Matching {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Capability::Scalar => "scalar",
            Capability::Text => "text",
            Capability::Bytes => "bytes",
            Capability::Sequence => "sequence",
            Capability::Set => "set",
            Capability::Mapping => "mapping",
            Capability::Record => "record",
            Capability::Object => "object",
            Capability::Matching { name, .. } => name.as_ref(),
        }
    }

    fn matches(&self, value: &dyn Inspect, kind: ShapeKind) -> bool {
        match self {
            Capability::Scalar => kind == ShapeKind::Scalar,
            Capability::Text => kind == ShapeKind::Text,
            Capability::Bytes => kind == ShapeKind::Bytes,
            Capability::Sequence => kind == ShapeKind::Sequence,
            Capability::Set => kind == ShapeKind::Set,
            Capability::Mapping => kind == ShapeKind::Mapping,
            Capability::Record => kind == ShapeKind::Record,
            Capability::Object => kind == ShapeKind::Object,
            Capability::Matching { predicate, .. } => predicate(value),
        }
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Capability({})", self.name())
    }
}

#[derive(Clone)]
struct CapabilityEntry {
    capability: Capability,
    renderer: RenderFn,
}

#[derive(Clone)]
struct ExactEntry {
    type_name: &'static str,
    renderer: RenderFn,
}

/// Where a value's rendering comes from.
pub(crate) enum Resolved {
    /// A user renderer, exact or by capability.
    Custom(RenderFn),
    /// One of the built-in structural renderers.
    Builtin,
    /// Nothing matched.
    Fallback,
}

/// An immutable view of registered renderers.
#[derive(Clone)]
pub(crate) struct Registry {
    exact: HashMap<TypeId, ExactEntry>,
    capabilities: Vec<CapabilityEntry>,
    builtins: Vec<Capability>,
}

impl Registry {
    fn with_builtins() -> Self {
        let builtins = vec![
            Capability::Scalar,
            Capability::Text,
            Capability::Bytes,
            Capability::Mapping,
            Capability::Sequence,
            Capability::Set,
            Capability::Record,
        ];
        Self {
            exact: HashMap::new(),
            capabilities: Vec::new(),
            builtins,
        }
    }

    /// Pick the renderer for `value`, whose shape is of `kind`.
    pub fn resolve(&self, value: &dyn Inspect, kind: ShapeKind) -> Resolved {
        let any: &dyn Any = value;
        if let Some(entry) = self.exact.get(&any.type_id()) {
            return Resolved::Custom(Arc::clone(&entry.renderer));
        }
        if let Some(entry) = self
            .capabilities
            .iter()
            .find(|entry| entry.capability.matches(value, kind))
        {
            return Resolved::Custom(Arc::clone(&entry.renderer));
        }
        if kind == ShapeKind::Object
            || self.builtins.iter().any(|cap| cap.matches(value, kind))
        {
            Resolved::Builtin
        } else {
            Resolved::Fallback
        }
    }

    /// Names of the types with an exact renderer, sorted.
    fn exact_type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.exact.values().map(|e| e.type_name).collect();
        names.sort_unstable();
        names
    }
}

static REGISTRY: LazyLock<RwLock<Arc<Registry>>> =
    LazyLock::new(|| RwLock::new(Arc::new(Registry::with_builtins())));

/// Current registry contents for a new top-level render.
pub(crate) fn snapshot() -> Arc<Registry> {
    let guard = REGISTRY.read().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(&guard)
}

fn update<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    let mut guard = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    f(Arc::make_mut(&mut guard))
}

/// Register `renderer` for values of exactly type `T`. A later registration
/// for the same type replaces the earlier one.
///
/// The renderer is expected to stay within the budget it is given; longer
/// output is cut and logged. Errors and panics fall back to `<TypeName>`.
pub fn register<T, F>(renderer: F)
where
    T: Inspect,
    F: Fn(&T, usize) -> RenderResult<String> + Send + Sync + 'static,
{
    let type_name = std::any::type_name::<T>();
    let erased: RenderFn = Arc::new(move |value: &dyn Inspect, budget: usize| {
        let any: &dyn Any = value;
        match any.downcast_ref::<T>() {
            Some(value) => renderer(value, budget),
            None => Err(RenderError::failed(format!(
                "renderer for {type_name} received another type"
            ))),
        }
    });
    let replaced = update(|registry| {
        registry
            .exact
            .insert(
                TypeId::of::<T>(),
                ExactEntry {
                    type_name,
                    renderer: erased,
                },
            )
            .is_some()
    });
    tracing::debug!(type_name, replaced, "registered renderer");
}

/// Register `renderer` for every value holding `capability`. Capability
/// renderers are consulted in registration order, after exact-type
/// renderers and before the built-in ones, so they can take over any shape.
pub fn register_capability<F>(capability: Capability, renderer: F)
where
    F: Fn(&dyn Inspect, usize) -> RenderResult<String> + Send + Sync + 'static,
{
    let name = capability.name().to_string();
    update(|registry| {
        registry.capabilities.push(CapabilityEntry {
            capability,
            renderer: Arc::new(renderer),
        })
    });
    tracing::debug!(capability = %name, "registered capability renderer");
}

/// Remove the exact renderer for `T`. Returns whether one was registered.
pub fn unregister<T: Inspect>() -> bool {
    let removed = update(|registry| registry.exact.remove(&TypeId::of::<T>()).is_some());
    if removed {
        tracing::debug!(type_name = std::any::type_name::<T>(), "unregistered renderer");
    }
    removed
}

/// Whether an exact renderer is registered for `T`.
pub fn is_registered<T: Inspect>() -> bool {
    snapshot().exact.contains_key(&TypeId::of::<T>())
}

/// Fully-qualified names of the types with an exact renderer, sorted.
pub fn registered_types() -> Vec<&'static str> {
    snapshot().exact_type_names()
}
