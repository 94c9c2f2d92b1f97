//! Execution results and the chaining operator.
//!
//! Success is an [`ExecutionResult`]; infeasibility is `None`. Every
//! multi-step flow in the engine — AND children, destroy-or-bypass, lock
//! opening — composes through [`chain`], which threads the resulting state
//! of one step into the next and merges the side-effect logs, so no log
//! entry is lost on a multi-step success.

use logic_graph::{Capacity, CapabilityId, ConsumableKind, EnemyId, LockId, ObstacleId};

use crate::state::SimulatedState;

/// Accumulated side effects of a successful evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionLog {
    spent: [Capacity; ConsumableKind::COUNT],
    capabilities_used: Vec<CapabilityId>,
    obstacles_destroyed: Vec<ObstacleId>,
    locks_opened: Vec<LockId>,
    locks_bypassed: Vec<LockId>,
    enemies_defeated: Vec<(EnemyId, u32)>,
}

impl ExecutionLog {
    // ========================================================================
    // Recording
    // ========================================================================

    /// Records resources spent from one consumable pool.
    pub fn record_spent(&mut self, pool: ConsumableKind, amount: Capacity) {
        self.spent[pool.as_index()] += amount;
    }

    /// Records a capability that contributed (mitigation, weapon, gate).
    pub fn record_capability(&mut self, capability: CapabilityId) {
        if !self.capabilities_used.contains(&capability) {
            self.capabilities_used.push(capability);
        }
    }

    /// Records an obstacle destruction. Destroying twice is not a thing;
    /// duplicates collapse.
    pub fn record_obstacle(&mut self, obstacle: ObstacleId) {
        if !self.obstacles_destroyed.contains(&obstacle) {
            self.obstacles_destroyed.push(obstacle);
        }
    }

    /// Records a lock opened.
    pub fn record_lock_opened(&mut self, lock: LockId) {
        if !self.locks_opened.contains(&lock) {
            self.locks_opened.push(lock);
        }
    }

    /// Records a lock bypassed.
    pub fn record_lock_bypassed(&mut self, lock: LockId) {
        if !self.locks_bypassed.contains(&lock) {
            self.locks_bypassed.push(lock);
        }
    }

    /// Records enemies of one kind defeated.
    pub fn record_enemies(&mut self, enemy: EnemyId, count: u32) {
        for entry in &mut self.enemies_defeated {
            if entry.0 == enemy {
                entry.1 += count;
                return;
            }
        }
        self.enemies_defeated.push((enemy, count));
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Total spent from one consumable pool.
    #[inline]
    pub fn spent(&self, pool: ConsumableKind) -> Capacity {
        self.spent[pool.as_index()]
    }

    pub fn capabilities_used(&self) -> &[CapabilityId] {
        &self.capabilities_used
    }

    pub fn obstacles_destroyed(&self) -> &[ObstacleId] {
        &self.obstacles_destroyed
    }

    pub fn locks_opened(&self) -> &[LockId] {
        &self.locks_opened
    }

    pub fn locks_bypassed(&self) -> &[LockId] {
        &self.locks_bypassed
    }

    pub fn enemies_defeated(&self) -> &[(EnemyId, u32)] {
        &self.enemies_defeated
    }

    /// Merges another log onto this one: deltas sum, sets union.
    pub fn absorb(&mut self, other: &ExecutionLog) {
        for pool in ConsumableKind::all() {
            self.spent[pool.as_index()] += other.spent[pool.as_index()];
        }
        for capability in &other.capabilities_used {
            self.record_capability(*capability);
        }
        for obstacle in &other.obstacles_destroyed {
            self.record_obstacle(*obstacle);
        }
        for lock in &other.locks_opened {
            self.record_lock_opened(*lock);
        }
        for lock in &other.locks_bypassed {
            self.record_lock_bypassed(*lock);
        }
        for (enemy, count) in &other.enemies_defeated {
            self.record_enemies(*enemy, *count);
        }
    }
}

/// A successful evaluation: the resulting state plus what it cost.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionResult {
    pub state: SimulatedState,
    pub log: ExecutionLog,
}

impl ExecutionResult {
    /// A free success: the state passes through untouched.
    pub fn free(state: SimulatedState) -> Self {
        Self {
            state,
            log: ExecutionLog::default(),
        }
    }
}

/// Threads `first`'s resulting state into `next` and merges the logs.
///
/// Absence short-circuits: if either step fails, the whole chain fails and
/// no partial result leaks out.
pub fn chain<F>(first: Option<ExecutionResult>, next: F) -> Option<ExecutionResult>
where
    F: FnOnce(&SimulatedState) -> Option<ExecutionResult>,
{
    let first = first?;
    let second = next(&first.state)?;
    let mut log = first.log;
    log.absorb(&second.log);
    Some(ExecutionResult {
        state: second.state,
        log,
    })
}
