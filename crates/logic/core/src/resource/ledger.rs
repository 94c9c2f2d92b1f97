//! Per-kind current/maximum resource tracking and consumption semantics.
//!
//! Health is special: primary and reserve energy are tracked separately but
//! spent through one merged pool, primary-first down to a floor of 1, then
//! reserve down to 0, then primary past zero. The floor-at-1 rule is the
//! load-bearing invariant: [`ResourceLedger::is_available`] authorizes
//! spending exactly `current - 1` primary energy and never `current`; only
//! [`ResourceLedger::consume`] — the unavoidable-damage path — may push
//! primary energy to or below zero.

use logic_graph::{Capacity, ConsumableKind, ResourceKind};

/// Rechargeable resource ledger.
///
/// Invariants: `current <= maximum` for every kind, and `current >= 0`
/// except for primary energy after lethal overflow (the "about to die"
/// transient, reported by [`ResourceLedger::is_dead`]).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceLedger {
    current: [Capacity; ResourceKind::COUNT],
    maximum: [Capacity; ResourceKind::COUNT],
}

impl ResourceLedger {
    /// A full ledger with the given maximums.
    pub fn new(maximum: [Capacity; ResourceKind::COUNT]) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// An empty ledger (all zeros); maximums are installed afterwards.
    pub fn zero() -> Self {
        Self {
            current: [0; ResourceKind::COUNT],
            maximum: [0; ResourceKind::COUNT],
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Current amount of one rechargeable kind.
    #[inline]
    pub fn amount(&self, kind: ResourceKind) -> Capacity {
        self.current[kind.as_index()]
    }

    /// Maximum amount of one rechargeable kind.
    #[inline]
    pub fn max_amount(&self, kind: ResourceKind) -> Capacity {
        self.maximum[kind.as_index()]
    }

    /// Current amount of a consumable pool (energy merges primary+reserve).
    pub fn consumable_amount(&self, pool: ConsumableKind) -> Capacity {
        match pool {
            ConsumableKind::Energy => {
                self.amount(ResourceKind::Energy) + self.amount(ResourceKind::Reserve)
            }
            ConsumableKind::Missiles => self.amount(ResourceKind::Missiles),
            ConsumableKind::Supers => self.amount(ResourceKind::Supers),
            ConsumableKind::PowerBombs => self.amount(ResourceKind::PowerBombs),
        }
    }

    /// Maximum amount of a consumable pool.
    pub fn consumable_max(&self, pool: ConsumableKind) -> Capacity {
        match pool {
            ConsumableKind::Energy => {
                self.max_amount(ResourceKind::Energy) + self.max_amount(ResourceKind::Reserve)
            }
            ConsumableKind::Missiles => self.max_amount(ResourceKind::Missiles),
            ConsumableKind::Supers => self.max_amount(ResourceKind::Supers),
            ConsumableKind::PowerBombs => self.max_amount(ResourceKind::PowerBombs),
        }
    }

    /// True once primary energy has been driven to zero or below.
    pub fn is_dead(&self) -> bool {
        self.amount(ResourceKind::Energy) <= 0
    }

    // ========================================================================
    // Pre-check
    // ========================================================================

    /// Whether `amount` can be consumed without illegal underflow.
    ///
    /// For energy this refuses to authorize dropping primary below 1 unless
    /// reserves cover the remainder: with no reserves, `current - 1` is the
    /// largest authorizable spend. Ammunition is a plain `>=` check.
    pub fn is_available(&self, pool: ConsumableKind, amount: Capacity) -> bool {
        debug_assert!(amount >= 0, "negative consumption requested");
        match pool {
            ConsumableKind::Energy => {
                let primary = (self.amount(ResourceKind::Energy) - 1).max(0);
                let reserve = self.amount(ResourceKind::Reserve).max(0);
                amount <= primary + reserve
            }
            _ => amount <= self.consumable_amount(pool),
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Consumes from a pool, applying the energy chain past lethal if the
    /// amount demands it.
    ///
    /// This is the unavoidable-damage path: it never refuses. Callers that
    /// can still decline must gate on [`ResourceLedger::is_available`]
    /// first and treat [`ResourceLedger::is_dead`] afterwards as failure.
    pub fn consume(&mut self, pool: ConsumableKind, amount: Capacity) {
        debug_assert!(amount >= 0, "negative consumption requested");
        match pool {
            ConsumableKind::Energy => {
                let mut remaining = amount;

                // Primary down to the floor of 1.
                let primary = self.amount(ResourceKind::Energy);
                let from_primary = remaining.min((primary - 1).max(0));
                self.current[ResourceKind::Energy.as_index()] -= from_primary;
                remaining -= from_primary;

                // Reserve down to 0.
                let reserve = self.amount(ResourceKind::Reserve);
                let from_reserve = remaining.min(reserve.max(0));
                self.current[ResourceKind::Reserve.as_index()] -= from_reserve;
                remaining -= from_reserve;

                // Whatever is left comes out of primary, past zero.
                self.current[ResourceKind::Energy.as_index()] -= remaining;
            }
            ConsumableKind::Missiles => {
                self.current[ResourceKind::Missiles.as_index()] -= amount;
            }
            ConsumableKind::Supers => {
                self.current[ResourceKind::Supers.as_index()] -= amount;
            }
            ConsumableKind::PowerBombs => {
                self.current[ResourceKind::PowerBombs.as_index()] -= amount;
            }
        }
    }

    /// Drains primary energy down to `limit` and returns the amount spent.
    ///
    /// Never touches reserves and never goes below the limit; a no-op when
    /// already at or under it.
    pub fn drain_energy_to(&mut self, limit: Capacity) -> Capacity {
        let primary = self.amount(ResourceKind::Energy);
        let spent = (primary - limit).max(0);
        self.current[ResourceKind::Energy.as_index()] = primary.min(limit);
        spent
    }

    /// Gains up to `amount` of one kind, clamped to its maximum.
    pub fn gain(&mut self, kind: ResourceKind, amount: Capacity) {
        debug_assert!(amount >= 0, "negative gain requested");
        let index = kind.as_index();
        self.current[index] = (self.current[index] + amount).min(self.maximum[index]);
    }

    /// Installs a new maximum, clamping the current amount down if needed.
    pub fn set_max(&mut self, kind: ResourceKind, maximum: Capacity) {
        debug_assert!(maximum >= 0, "negative maximum requested");
        let index = kind.as_index();
        self.maximum[index] = maximum;
        self.current[index] = self.current[index].min(maximum);
    }

    /// Refills one kind to its maximum.
    pub fn refill(&mut self, kind: ResourceKind) {
        let index = kind.as_index();
        self.current[index] = self.maximum[index];
    }

    /// Refills every kind to its maximum.
    pub fn refill_all(&mut self) {
        self.current = self.maximum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(energy: Capacity, reserve: Capacity) -> ResourceLedger {
        ResourceLedger::new([energy, reserve, 10, 5, 5])
    }

    #[test]
    fn energy_floor_authorizes_current_minus_one() {
        let state = ledger(99, 0);
        assert!(state.is_available(ConsumableKind::Energy, 98));
        assert!(!state.is_available(ConsumableKind::Energy, 99));
    }

    #[test]
    fn reserves_extend_the_authorized_spend() {
        let state = ledger(99, 100);
        assert!(state.is_available(ConsumableKind::Energy, 198));
        assert!(!state.is_available(ConsumableKind::Energy, 199));
    }

    #[test]
    fn consume_drains_primary_then_reserve() {
        let mut state = ledger(99, 100);
        state.consume(ConsumableKind::Energy, 120);
        assert_eq!(state.amount(ResourceKind::Energy), 1);
        assert_eq!(state.amount(ResourceKind::Reserve), 78);
        assert!(!state.is_dead());
    }

    #[test]
    fn consume_past_reserves_kills() {
        let mut state = ledger(50, 10);
        state.consume(ConsumableKind::Energy, 70);
        // 49 from primary (floor at 1), 10 from reserve, 11 more past lethal.
        assert_eq!(state.amount(ResourceKind::Energy), -10);
        assert_eq!(state.amount(ResourceKind::Reserve), 0);
        assert!(state.is_dead());
    }

    #[test]
    fn ammo_has_no_floor() {
        let mut state = ledger(99, 0);
        assert!(state.is_available(ConsumableKind::Missiles, 10));
        assert!(!state.is_available(ConsumableKind::Missiles, 11));
        state.consume(ConsumableKind::Missiles, 10);
        assert_eq!(state.amount(ResourceKind::Missiles), 0);
    }

    #[test]
    fn drain_energy_to_is_idempotent_below_target() {
        let mut state = ledger(99, 20);
        assert_eq!(state.drain_energy_to(50), 49);
        assert_eq!(state.amount(ResourceKind::Energy), 50);
        assert_eq!(state.amount(ResourceKind::Reserve), 20);
        assert_eq!(state.drain_energy_to(50), 0);
        let mut low = ledger(40, 0);
        assert_eq!(low.drain_energy_to(50), 0);
        assert_eq!(low.amount(ResourceKind::Energy), 40);
    }

    #[test]
    fn gain_clamps_to_maximum() {
        let mut state = ledger(99, 0);
        state.consume(ConsumableKind::Energy, 50);
        state.gain(ResourceKind::Energy, 1000);
        assert_eq!(state.amount(ResourceKind::Energy), 99);
    }

    #[test]
    fn set_max_clamps_current() {
        let mut state = ledger(99, 0);
        state.set_max(ResourceKind::Energy, 40);
        assert_eq!(state.amount(ResourceKind::Energy), 40);
    }
}
