//! Rotation ring over player ids.
//!
//! The ring owns "who comes after whom". Every lookup returns `Option` so an
//! emptied ring surfaces as a recoverable condition instead of an index
//! panic; callers treat `None` as the signal to finish the game.

use std::collections::VecDeque;

use super::state::PlayerId;

/// Ordered rotation of active player ids. No duplicates; always a
/// permutation of the players still in the game.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnOrder {
    ring: VecDeque<PlayerId>,
}

impl TurnOrder {
    /// Build a ring from `ids` rotated so that `start` comes first.
    ///
    /// If `start` is not among `ids` the original order is kept.
    pub fn rotated(ids: &[PlayerId], start: &str) -> Self {
        let mut ring: VecDeque<PlayerId> = ids.iter().cloned().collect();
        if let Some(pos) = ring.iter().position(|id| id == start) {
            ring.rotate_left(pos);
        }
        Self { ring }
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ring.iter().any(|p| p == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerId> {
        self.ring.iter()
    }

    /// First id in the current rotation.
    pub fn first(&self) -> Option<&PlayerId> {
        self.ring.front()
    }

    /// The id `n` steps clockwise from `id`, wrapping around the ring.
    ///
    /// `None` if `id` is not in the ring or the ring is empty.
    pub fn after_n(&self, id: &str, n: usize) -> Option<&PlayerId> {
        let pos = self.ring.iter().position(|p| p == id)?;
        let idx = (pos + n) % self.ring.len();
        self.ring.get(idx)
    }

    /// The next id clockwise from `id`.
    pub fn after(&self, id: &str) -> Option<&PlayerId> {
        self.after_n(id, 1)
    }

    /// The next id clockwise from `id` that is not `skip`.
    pub fn after_skipping(&self, id: &str, skip: &str) -> Option<&PlayerId> {
        let next = self.after(id)?;
        if next == skip {
            self.after(next.as_str())
        } else {
            Some(next)
        }
    }

    /// Ids in rotation order starting just after `from`, wrapping the ring.
    /// `from` itself comes last.
    pub fn cycle_from(&self, from: &str) -> Vec<PlayerId> {
        let Some(pos) = self.ring.iter().position(|p| p == from) else {
            return self.ring.iter().cloned().collect();
        };
        let mut out = Vec::with_capacity(self.ring.len());
        for i in 1..=self.ring.len() {
            let idx = (pos + i) % self.ring.len();
            out.push(self.ring[idx].clone());
        }
        out
    }

    /// Remove `id` from the ring. Returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ring.iter().position(|p| p == id) {
            self.ring.remove(pos);
            true
        } else {
            false
        }
    }
}

impl FromIterator<PlayerId> for TurnOrder {
    fn from_iter<I: IntoIterator<Item = PlayerId>>(iter: I) -> Self {
        Self {
            ring: iter.into_iter().collect(),
        }
    }
}
