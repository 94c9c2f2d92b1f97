//! Resource-value comparison and best-choice selection.
//!
//! OR nodes and the composite search operations pick among successful
//! alternatives with a configurable weighting over the consumable pools.
//! Without a configured weighting the first success wins, which keeps
//! selection deterministic either way.

use logic_graph::ConsumableKind;

use crate::result::ExecutionResult;
use crate::state::SimulatedState;

/// Weighting over consumable pools used to score a resulting state.
///
/// Higher score means more valuable remaining resources; the alternative
/// whose resulting state scores highest is the "cheapest" one.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceWeights {
    weights: [f32; ConsumableKind::COUNT],
}

impl ResourceWeights {
    /// A weighting that only values energy.
    pub const ENERGY_ONLY: ResourceWeights = ResourceWeights {
        weights: [1.0, 0.0, 0.0, 0.0],
    };

    /// Builds a weighting from per-pool weights in [`ConsumableKind::all`]
    /// order.
    pub const fn new(weights: [f32; ConsumableKind::COUNT]) -> Self {
        Self { weights }
    }

    /// Weight of one pool.
    #[inline]
    pub fn weight(&self, pool: ConsumableKind) -> f32 {
        self.weights[pool.as_index()]
    }

    /// Scores a state by its weighted remaining resources.
    pub fn score(&self, state: &SimulatedState) -> f32 {
        ConsumableKind::all()
            .iter()
            .map(|pool| self.weight(*pool) * state.ledger.consumable_amount(*pool) as f32)
            .sum()
    }
}

impl Default for ResourceWeights {
    /// Energy dominates; ammunition is worth a fraction of a unit each.
    fn default() -> Self {
        Self::new([1.0, 0.3, 0.9, 0.8])
    }
}

/// Evaluates `count` alternatives against the same starting state and keeps
/// the best success.
///
/// Every alternative is tried from the caller's state (the evaluator is
/// responsible for cloning); failures are discarded. With a weighting the
/// highest-scoring resulting state wins, ties broken by declaration order;
/// without one the first success wins. Returns `None` when every
/// alternative fails.
pub fn best_choice<F>(
    count: usize,
    weights: Option<&ResourceWeights>,
    mut evaluate: F,
) -> Option<(usize, ExecutionResult)>
where
    F: FnMut(usize) -> Option<ExecutionResult>,
{
    let mut best: Option<(usize, f32, ExecutionResult)> = None;
    for index in 0..count {
        let Some(result) = evaluate(index) else {
            continue;
        };
        let Some(weights) = weights else {
            // No comparator: first success wins.
            return Some((index, result));
        };
        let score = weights.score(&result.state);
        match &best {
            Some((_, best_score, _)) if score <= *best_score => {}
            _ => best = Some((index, score, result)),
        }
    }
    best.map(|(index, _, result)| (index, result))
}
