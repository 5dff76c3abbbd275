//! Per-item budget bookkeeping for composite renderers.

use super::policy::Policy;
use crate::text::{more_marker_len, SEPARATOR};

/// Tracks how much of a composite's inner budget is left while its items are
/// placed one by one.
///
/// Before an item is offered a slot, room is reserved for the separator that
/// precedes it and for the `, ...K more` marker covering every item after it,
/// so the count marker can always be emitted once placement stops.
#[derive(Debug, Clone)]
pub(crate) struct Allocator {
    remaining: usize,
    total: usize,
    placed: usize,
    share: Option<usize>,
}

impl Allocator {
    /// Create an allocator for `total` items sharing `inner` characters.
    pub fn new(policy: Policy, inner: usize, total: usize) -> Self {
        let share = if policy.is_even() && total > 1 {
            let separators = (total - 1) * SEPARATOR.len();
            Some(inner.saturating_sub(separators) / total)
        } else {
            None
        };
        Self {
            remaining: inner,
            total,
            placed: 0,
            share,
        }
    }

    /// Raise the even share to at least `floor` characters.
    pub fn with_floor(mut self, floor: usize) -> Self {
        self.share = self.share.map(|share| share.max(floor));
        self
    }

    fn separator(&self) -> usize {
        if self.placed > 0 {
            SEPARATOR.len()
        } else {
            0
        }
    }

    fn reserve(after: usize) -> usize {
        if after > 0 {
            SEPARATOR.len() + more_marker_len(after)
        } else {
            0
        }
    }

    /// Budget available to the item at `index` for a full render, or `None`
    /// when the reservations alone exhaust what is left.
    pub fn slot(&self, index: usize) -> Option<usize> {
        self.slot_reserving(index, 0)
    }

    /// Like [`Allocator::slot`], additionally holding back `extra`
    /// characters for something rendered after the counted items.
    pub fn slot_reserving(&self, index: usize, extra: usize) -> Option<usize> {
        let after = self.total.saturating_sub(index + 1);
        let available = self
            .remaining
            .checked_sub(self.separator() + Self::reserve(after) + extra)?;
        Some(match self.share {
            Some(share) => available.min(share),
            None => available,
        })
    }

    /// Whether a rendered part of `len` characters for the item at `index`
    /// still leaves room for the count marker of the items after it.
    pub fn fits(&self, index: usize, len: usize) -> bool {
        let after = self.total.saturating_sub(index + 1);
        len + self.separator() + Self::reserve(after) <= self.remaining
    }

    /// Record a placed part of `len` characters.
    pub fn place(&mut self, len: usize) {
        self.remaining = self.remaining.saturating_sub(len + self.separator());
        self.placed += 1;
    }

    /// Characters not yet used.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Number of parts placed so far.
    #[cfg(test)]
    pub fn placed(&self) -> usize {
        self.placed
    }
}
