//! Undo history of full attribute snapshots.

use glam::{Vec3, Vec4};
use std::collections::VecDeque;
use tracing::debug;

/// Attribute arrays captured before a commit.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Positions(Vec<Vec3>),
    Colors(Vec<Vec4>),
    /// Every vertex attribute, as captured by a mesh reset
    Mesh {
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        colors: Vec<Vec4>,
    },
}

impl Snapshot {
    /// Number of vertices covered by the snapshot
    pub fn vertex_count(&self) -> usize {
        match self {
            Snapshot::Positions(p) => p.len(),
            Snapshot::Colors(c) => c.len(),
            Snapshot::Mesh { positions, .. } => positions.len(),
        }
    }
}

/// LIFO stack of snapshots, newest on top.
///
/// With a non-zero `max_depth` the oldest snapshot is dropped once the
/// stack is full. A depth of 0 keeps everything.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    entries: VecDeque<Snapshot>,
    max_depth: usize,
}

impl EditHistory {
    pub fn new(max_depth: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_depth,
        }
    }

    pub fn unbounded() -> Self {
        Self::new(0)
    }

    /// Push a snapshot on top, evicting the oldest if the stack is full.
    pub fn push(&mut self, snapshot: Snapshot) {
        if self.max_depth > 0 && self.entries.len() >= self.max_depth {
            self.entries.pop_front();
            debug!("EditHistory: evicted oldest snapshot (depth {})", self.max_depth);
        }
        self.entries.push_back(snapshot);
    }

    /// Take the newest snapshot. `None` means there is nothing to undo.
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.entries.pop_back()
    }

    /// Newest snapshot without removing it
    pub fn peek(&self) -> Option<&Snapshot> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Change the cap, dropping the oldest snapshots that no longer fit.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
        if max_depth > 0 && self.entries.len() > max_depth {
            let excess = self.entries.len() - max_depth;
            self.entries.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(x: f32) -> Snapshot {
        Snapshot::Positions(vec![Vec3::splat(x)])
    }

    #[test]
    fn test_pop_empty_returns_none() {
        let mut history = EditHistory::new(4);
        assert!(history.pop().is_none());
        assert!(!history.can_undo());
        assert!(history.peek().is_none());
    }

    #[test]
    fn test_lifo_order() {
        let mut history = EditHistory::unbounded();
        history.push(positions(1.0));
        history.push(Snapshot::Colors(vec![Vec4::ONE]));
        history.push(positions(3.0));

        assert_eq!(history.len(), 3);
        assert_eq!(history.pop(), Some(positions(3.0)));
        assert_eq!(history.pop(), Some(Snapshot::Colors(vec![Vec4::ONE])));
        assert_eq!(history.pop(), Some(positions(1.0)));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn test_bounded_evicts_oldest() {
        let mut history = EditHistory::new(2);
        history.push(positions(1.0));
        history.push(positions(2.0));
        history.push(positions(3.0));

        assert_eq!(history.len(), 2);
        assert_eq!(history.pop(), Some(positions(3.0)));
        assert_eq!(history.pop(), Some(positions(2.0)));
        assert!(history.is_empty());
    }

    #[test]
    fn test_unbounded_keeps_everything() {
        let mut history = EditHistory::unbounded();
        for i in 0..100 {
            history.push(positions(i as f32));
        }
        assert_eq!(history.len(), 100);
        assert_eq!(history.peek(), Some(&positions(99.0)));
    }

    #[test]
    fn test_shrinking_cap_drops_oldest() {
        let mut history = EditHistory::unbounded();
        for i in 0..5 {
            history.push(positions(i as f32));
        }
        history.set_max_depth(2);
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop(), Some(positions(4.0)));
        assert_eq!(history.pop(), Some(positions(3.0)));
    }

    #[test]
    fn test_clear() {
        let mut history = EditHistory::new(3);
        history.push(positions(1.0));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.max_depth(), 3);
    }

    #[test]
    fn test_snapshot_vertex_count() {
        let snapshot = Snapshot::Mesh {
            positions: vec![Vec3::ZERO; 4],
            normals: vec![Vec3::Z; 4],
            colors: vec![Vec4::ZERO; 4],
        };
        assert_eq!(snapshot.vertex_count(), 4);
    }
}
