//! Per-location visit history.
//!
//! The log is scoped to the current location visit: the ordered path taken
//! through its spots, which obstacles were destroyed, and which locks were
//! opened versus bypassed. Entering a new location resets it.

use logic_graph::{LockId, LogicGraph, ObstacleId, SpotId, StratId};

/// One step of the path through the current location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisitEntry {
    /// Spot reached by this step.
    pub spot: SpotId,
    /// Strat used to reach it; `None` for the entry step.
    pub strat: Option<StratId>,
}

/// Visit history for the current location.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisitLog {
    path: Vec<VisitEntry>,
    destroyed: Vec<bool>,
    opened: Vec<bool>,
    bypassed: Vec<bool>,
}

impl VisitLog {
    /// An empty log sized for the given graph.
    pub fn new(graph: &LogicGraph) -> Self {
        Self {
            path: Vec::new(),
            destroyed: vec![false; graph.obstacle_count()],
            opened: vec![false; graph.lock_count()],
            bypassed: vec![false; graph.lock_count()],
        }
    }

    /// Clears the log for a fresh location visit.
    pub fn reset(&mut self) {
        self.path.clear();
        self.destroyed.fill(false);
        self.opened.fill(false);
        self.bypassed.fill(false);
    }

    // ========================================================================
    // Path
    // ========================================================================

    /// Appends a path step.
    pub fn record_step(&mut self, spot: SpotId, strat: Option<StratId>) {
        self.path.push(VisitEntry { spot, strat });
    }

    /// The spot currently occupied, if any step was recorded.
    pub fn current_spot(&self) -> Option<SpotId> {
        self.path.last().map(|entry| entry.spot)
    }

    /// The spot occupied immediately before the current one.
    pub fn previous_spot(&self) -> Option<SpotId> {
        if self.path.len() < 2 {
            return None;
        }
        self.path.get(self.path.len() - 2).map(|entry| entry.spot)
    }

    /// The full path taken this visit, oldest first.
    pub fn path(&self) -> &[VisitEntry] {
        &self.path
    }

    // ========================================================================
    // Obstacles
    // ========================================================================

    /// True iff the obstacle was destroyed earlier this visit.
    #[inline]
    pub fn is_destroyed(&self, obstacle: ObstacleId) -> bool {
        self.destroyed[obstacle.index()]
    }

    /// Marks an obstacle destroyed for the rest of the visit.
    pub fn record_destroyed(&mut self, obstacle: ObstacleId) {
        self.destroyed[obstacle.index()] = true;
    }

    // ========================================================================
    // Locks
    // ========================================================================

    /// True iff the lock was opened this visit.
    #[inline]
    pub fn is_opened(&self, lock: LockId) -> bool {
        self.opened[lock.index()]
    }

    /// True iff the lock was bypassed (slipped past, not opened) this visit.
    #[inline]
    pub fn is_bypassed(&self, lock: LockId) -> bool {
        self.bypassed[lock.index()]
    }

    /// Marks a lock opened.
    pub fn record_opened(&mut self, lock: LockId) {
        self.opened[lock.index()] = true;
    }

    /// Marks a lock bypassed.
    pub fn record_bypassed(&mut self, lock: LockId) {
        self.bypassed[lock.index()] = true;
    }
}
