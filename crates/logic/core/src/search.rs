//! Best-choice search over strats and guard alternatives.
//!
//! Wherever several methods achieve the same effect — traversing an edge,
//! getting past a lock, getting past an obstacle — each alternative is
//! evaluated from the same starting state, failures are discarded, and the
//! success whose resulting state the configured comparator values most is
//! kept (declaration order breaks ties and is the whole ordering when no
//! comparator is configured).

use logic_graph::{EdgeId, LockId, ObstacleId, StratId};

use crate::compare::best_choice;
use crate::evaluate::EvalContext;
use crate::result::ExecutionResult;
use crate::state::SimulatedState;

/// How a lock was passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockPassage {
    /// Opened through an unlock strat.
    Opened(StratId),
    /// Slipped past without opening.
    Bypassed,
    /// Already opened earlier this visit; nothing to pay.
    AlreadyOpen,
}

impl<'a> EvalContext<'a> {
    /// Evaluates one strat: its guard at the configured try count, then its
    /// destruction side effects.
    ///
    /// Returns `None` for a disabled strat without evaluating anything.
    pub fn evaluate_strat(
        &self,
        id: StratId,
        state: &SimulatedState,
    ) -> Option<ExecutionResult> {
        if self.applied.options().is_strat_disabled(id) {
            return None;
        }
        let strat = self.graph.strat(id);
        let tries = self.applied.options().tries(id);
        let mut result = self.evaluate(strat.requirement, state, tries)?;
        for obstacle in &strat.clears_obstacles {
            result.state.visit.record_destroyed(*obstacle);
            result.log.record_obstacle(*obstacle);
        }
        Some(result)
    }

    /// Traverses an edge through its cheapest workable strat.
    ///
    /// On success the resulting state's visit path gains a step at the
    /// edge's destination spot. Crossing into another location is the
    /// navigator's concern; the path is extended either way.
    pub fn traverse_edge(
        &self,
        id: EdgeId,
        state: &SimulatedState,
    ) -> Option<(StratId, ExecutionResult)> {
        let edge = self.graph.edge(id);
        let (index, mut result) = best_choice(
            edge.strats.len(),
            self.applied.options().weights(),
            |index| self.evaluate_strat(edge.strats[index], state),
        )?;
        let strat = edge.strats[index];
        result.state.visit.record_step(edge.to, Some(strat));
        Some((strat, result))
    }

    /// Gets past a lock, preferring whichever of opening and bypassing
    /// leaves the most valuable state.
    ///
    /// Opening and bypassing are recorded distinctly in the visit history;
    /// a bypassed lock is still closed.
    pub fn open_lock(
        &self,
        id: LockId,
        state: &SimulatedState,
    ) -> Option<(LockPassage, ExecutionResult)> {
        if state.visit.is_opened(id) {
            return Some((
                LockPassage::AlreadyOpen,
                ExecutionResult::free(state.clone()),
            ));
        }
        let lock = self.graph.lock(id);
        let unlock_count = lock.unlock_strats.len();
        let alternatives = unlock_count + usize::from(lock.bypass.is_some());

        let (index, mut result) =
            best_choice(alternatives, self.applied.options().weights(), |index| {
                if index < unlock_count {
                    self.evaluate_strat(lock.unlock_strats[index], state)
                } else {
                    // The bypass guard, present iff index reaches here.
                    self.evaluate(lock.bypass?, state, 1)
                }
            })?;

        let passage = if index < unlock_count {
            let strat = lock.unlock_strats[index];
            result.state.visit.record_opened(id);
            result.log.record_lock_opened(id);
            LockPassage::Opened(strat)
        } else {
            result.state.visit.record_bypassed(id);
            result.log.record_lock_bypassed(id);
            LockPassage::Bypassed
        };
        Some((passage, result))
    }

    /// Gets past an obstacle by destroying it or slipping past it,
    /// whichever is cheaper. A previously destroyed obstacle costs nothing.
    pub fn clear_obstacle(
        &self,
        id: ObstacleId,
        state: &SimulatedState,
    ) -> Option<ExecutionResult> {
        if state.visit.is_destroyed(id) {
            return Some(ExecutionResult::free(state.clone()));
        }
        let obstacle = self.graph.obstacle(id);
        let alternatives = 1 + usize::from(obstacle.bypass.is_some());

        let (index, mut result) =
            best_choice(alternatives, self.applied.options().weights(), |index| {
                if index == 0 {
                    self.evaluate(obstacle.destroy, state, 1)
                } else {
                    self.evaluate(obstacle.bypass?, state, 1)
                }
            })?;

        if index == 0 {
            result.state.visit.record_destroyed(id);
            result.log.record_obstacle(id);
        }
        Some(result)
    }
}
