//! Undo/redo functionality
//!
//! Linear snapshot history with a cursor. Restoring a snapshot only touches
//! transform and visibility of objects still in the registry: objects missing
//! from the target snapshot are hidden, never removed, and objects deleted from
//! the registry cannot come back through undo.

use shared::HistorySnapshot;

use super::SceneState;

/// Ordered snapshots plus a cursor
#[derive(Debug, Clone)]
pub struct HistoryManager {
    snapshots: Vec<HistorySnapshot>,
    cursor: usize,
    limit: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(100)
    }
}

impl HistoryManager {
    /// Empty history keeping at most `limit` snapshots (at least 1)
    pub fn new(limit: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Append after the cursor, dropping any redo tail, and move the cursor to it
    pub fn push(&mut self, snapshot: HistorySnapshot) {
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.cursor + 1);
        }
        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.limit {
            let excess = self.snapshots.len() - self.limit;
            self.snapshots.drain(..excess);
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back; `None` at the first snapshot
    pub fn undo(&mut self) -> Option<&HistorySnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor)
    }

    /// Step forward; `None` at the tail
    pub fn redo(&mut self) -> Option<&HistorySnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.snapshots.is_empty() && self.cursor + 1 < self.snapshots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> Option<&HistorySnapshot> {
        self.snapshots.get(self.cursor)
    }

    /// Drop everything and start over from one snapshot
    pub fn reset(&mut self, snapshot: HistorySnapshot) {
        self.snapshots.clear();
        self.snapshots.push(snapshot);
        self.cursor = 0;
    }
}

impl SceneState {
    /// Undo last change. Returns false at the start of history.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(&snapshot);
        tracing::debug!(cursor = self.history.cursor(), "undo");
        true
    }

    /// Redo last undone change. Returns false at the tail of history.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(&snapshot);
        tracing::debug!(cursor = self.history.cursor(), "redo");
        true
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn restore(&mut self, snapshot: &HistorySnapshot) {
        for object in self.registry.iter_mut() {
            match snapshot.get(&object.id) {
                Some(entry) => {
                    object.transform.position = entry.position;
                    object.transform.rotation = entry.rotation;
                    object.transform.scale = entry.scale;
                    object.visible = entry.visible;
                }
                None => object.visible = false,
            }
        }
        self.drag = None;
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Category, SnapshotEntry};

    fn snap(tag: &str) -> HistorySnapshot {
        HistorySnapshot {
            entries: vec![SnapshotEntry {
                id: tag.to_string(),
                category: Category::Stage,
                position: [0.0; 3],
                rotation: [0.0; 3],
                scale: [1.0; 3],
                visible: true,
            }],
        }
    }

    fn current_tag(h: &HistoryManager) -> String {
        h.current().unwrap().entries[0].id.clone()
    }

    #[test]
    fn test_empty_history_is_inert() {
        let mut h = HistoryManager::default();
        assert!(h.undo().is_none());
        assert!(h.redo().is_none());
        assert!(h.current().is_none());
        assert_eq!(h.cursor(), 0);
    }

    #[test]
    fn test_push_moves_cursor_to_tail() {
        let mut h = HistoryManager::default();
        h.push(snap("a"));
        h.push(snap("b"));
        h.push(snap("c"));
        assert_eq!(h.len(), 3);
        assert_eq!(h.cursor(), 2);
        assert!(!h.can_redo());
    }

    #[test]
    fn test_undo_at_zero_is_noop() {
        let mut h = HistoryManager::default();
        h.push(snap("a"));
        assert!(h.undo().is_none());
        assert_eq!(h.cursor(), 0);
        assert_eq!(current_tag(&h), "a");
    }

    #[test]
    fn test_redo_at_tail_is_noop() {
        let mut h = HistoryManager::default();
        h.push(snap("a"));
        h.push(snap("b"));
        assert!(h.redo().is_none());
        assert_eq!(h.cursor(), 1);
    }

    #[test]
    fn test_push_after_undo_truncates() {
        let mut h = HistoryManager::default();
        h.push(snap("a"));
        h.push(snap("b"));
        h.push(snap("c"));
        h.undo();
        h.undo();
        h.push(snap("d"));
        assert_eq!(h.len(), 2);
        assert_eq!(h.cursor(), 1);
        assert!(!h.can_redo());
        assert_eq!(current_tag(&h), "d");
        h.undo();
        assert_eq!(current_tag(&h), "a");
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut h = HistoryManager::new(3);
        for tag in ["a", "b", "c", "d", "e"] {
            h.push(snap(tag));
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.cursor(), 2);
        h.undo();
        h.undo();
        assert_eq!(current_tag(&h), "c");
        assert!(!h.can_undo());
    }

    #[test]
    fn test_cursor_stays_in_range_under_mixed_sequence() {
        let mut h = HistoryManager::new(5);
        h.push(snap("0"));
        // Deterministic pseudo-random walk over push/undo/redo
        let mut seed: u32 = 7;
        for i in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            match (seed >> 16) % 3 {
                0 => h.push(snap(&i.to_string())),
                1 => {
                    h.undo();
                }
                _ => {
                    h.redo();
                }
            }
            assert!(h.cursor() < h.len());
            assert!(h.len() <= 5);
        }
    }

    #[test]
    fn test_reset() {
        let mut h = HistoryManager::default();
        h.push(snap("a"));
        h.push(snap("b"));
        h.reset(snap("z"));
        assert_eq!(h.len(), 1);
        assert_eq!(h.cursor(), 0);
        assert_eq!(current_tag(&h), "z");
    }
}
