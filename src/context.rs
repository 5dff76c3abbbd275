//! Per-render state: policy, thresholds, registry snapshot and the set of
//! values currently being rendered.
//!
//! A top-level render installs a [`Session`] in a thread-local slot so that
//! custom renderers can call back into the engine through
//! [`render_child`](crate::render_child) without threading a context
//! argument. Sessions nest: a top-level render started from inside a custom
//! renderer gets a fresh context, and the outer one is restored when it ends.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;

use crate::budget::Policy;
use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::inspect::Inspect;
use crate::registry::{self, Registry};

thread_local! {
    static ACTIVE: RefCell<Option<Rc<Cx>>> = const { RefCell::new(None) };
}

/// Thresholds that shape degradation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Limits {
    pub min_budget: usize,
    pub min_child_budget: usize,
    pub key_budget_cap: usize,
}

impl From<&RenderConfig> for Limits {
    fn from(config: &RenderConfig) -> Self {
        Self {
            min_budget: config.min_budget,
            min_child_budget: config.min_child_budget,
            key_budget_cap: config.key_budget_cap,
        }
    }
}

/// Identity of a live value: its address plus its concrete type, so a struct
/// and its first field never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Identity {
    addr: usize,
    type_id: TypeId,
}

impl Identity {
    /// Zero-sized values have no meaningful address and are never tracked.
    pub fn of(value: &dyn Inspect) -> Option<Self> {
        if std::mem::size_of_val(value) == 0 {
            return None;
        }
        let any: &dyn Any = value;
        Some(Self {
            addr: (value as *const dyn Inspect).cast::<()>() as usize,
            type_id: any.type_id(),
        })
    }
}

/// State shared by every render call below one top-level render.
pub(crate) struct Cx {
    pub policy: Policy,
    pub limits: Limits,
    pub registry: Arc<Registry>,
    seen: RefCell<HashSet<Identity>>,
}

/// Outcome of entering a composite value.
pub(crate) enum Visit<'a> {
    /// First visit on this path; the guard removes the value when dropped.
    Fresh(SeenGuard<'a>),
    /// The value is already being rendered further up.
    Cycle,
}

impl Cx {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            policy: config.policy,
            limits: Limits::from(config),
            registry: registry::snapshot(),
            seen: RefCell::new(HashSet::new()),
        }
    }

    /// Mark `value` as in progress for the lifetime of the returned guard.
    pub fn enter(&self, value: &dyn Inspect) -> Visit<'_> {
        let id = Identity::of(value);
        if let Some(id) = id {
            if !self.seen.borrow_mut().insert(id) {
                return Visit::Cycle;
            }
        }
        Visit::Fresh(SeenGuard { cx: self, id })
    }

    #[cfg(test)]
    pub fn in_progress(&self) -> usize {
        self.seen.borrow().len()
    }
}

pub(crate) struct SeenGuard<'a> {
    cx: &'a Cx,
    id: Option<Identity>,
}

impl Drop for SeenGuard<'_> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.cx.seen.borrow_mut().remove(&id);
        }
    }
}

/// The active context of a top-level render on this thread.
pub(crate) struct Session {
    cx: Rc<Cx>,
    previous: Option<Rc<Cx>>,
}

impl Session {
    pub fn begin(config: &RenderConfig) -> Self {
        let cx = Rc::new(Cx::new(config));
        let previous = ACTIVE.with(|slot| slot.replace(Some(Rc::clone(&cx))));
        Self { cx, previous }
    }

    pub fn cx(&self) -> &Cx {
        &self.cx
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let previous = self.previous.take();
        ACTIVE.with(|slot| *slot.borrow_mut() = previous);
    }
}

/// The context of the render in progress on this thread.
pub(crate) fn current() -> RenderResult<Rc<Cx>> {
    ACTIVE
        .with(|slot| slot.borrow().clone())
        .ok_or(RenderError::NoActiveRender)
}
