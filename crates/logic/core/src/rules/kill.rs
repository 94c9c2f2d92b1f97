//! Enemy-kill cost accounting.
//!
//! Weapons that need no ammunition are preferred; otherwise ammunition is
//! spent greedily, cheapest kind first (missiles, then supers, then power
//! bombs). Some overkill is accepted: once a cheaper kind is exhausted the
//! remainder moves to the next kind without revisiting the split.

use logic_graph::{AmmoKind, Capacity, CapabilityId, EnemyId, LogicGraph};

use crate::inventory::Inventory;
use crate::resource::ResourceLedger;

/// What a kill would cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KillOutcome {
    /// Weapon capability that makes the kill free, if one is held.
    pub weapon: Option<CapabilityId>,
    /// Ammunition spent, indexed by [`AmmoKind`].
    pub ammo: [Capacity; AmmoKind::COUNT],
}

impl KillOutcome {
    /// Ammunition of one kind spent.
    #[inline]
    pub fn spent(&self, kind: AmmoKind) -> Capacity {
        self.ammo[kind.as_index()]
    }

    /// True iff nothing was spent.
    pub fn is_free(&self) -> bool {
        self.ammo.iter().all(|spent| *spent == 0)
    }
}

/// Computes the cost of defeating `count` enemies of one kind, or `None`
/// if the available arsenal cannot finish them.
pub fn kill_cost(
    graph: &LogicGraph,
    enemy: EnemyId,
    count: u32,
    inventory: &Inventory,
    ledger: &ResourceLedger,
) -> Option<KillOutcome> {
    if count == 0 {
        return Some(KillOutcome::default());
    }
    let def = graph.enemy(enemy);

    // A held weapon capability kills the whole group for free.
    if let Some(weapon) = def.weapon_kills.iter().find(|cap| inventory.has(**cap)) {
        return Some(KillOutcome {
            weapon: Some(*weapon),
            ammo: [0; AmmoKind::COUNT],
        });
    }

    let count = count as Capacity;
    let mut hp = def.hit_points; // per enemy
    let mut outcome = KillOutcome::default();

    // Missiles, split evenly across the group.
    if def.missile_damage > 0 && hp > 0 {
        let available = ledger.consumable_amount(AmmoKind::Missiles.consumable());
        let per_enemy = (available / count).min(div_ceil(hp, def.missile_damage)).max(0);
        hp -= per_enemy * def.missile_damage;
        outcome.ammo[AmmoKind::Missiles.as_index()] = per_enemy * count;
    }

    // Supers next.
    if def.super_damage > 0 && hp > 0 {
        let available = ledger.consumable_amount(AmmoKind::Supers.consumable());
        let per_enemy = (available / count).min(div_ceil(hp, def.super_damage)).max(0);
        hp -= per_enemy * def.super_damage;
        outcome.ammo[AmmoKind::Supers.as_index()] = per_enemy * count;
    }

    // Power bombs hit every enemy in the group at once.
    if def.power_bomb_damage > 0 && hp > 0 {
        let available = ledger.consumable_amount(AmmoKind::PowerBombs.consumable());
        let bombs = available.min(div_ceil(hp, def.power_bomb_damage)).max(0);
        hp -= bombs * def.power_bomb_damage;
        outcome.ammo[AmmoKind::PowerBombs.as_index()] = bombs;
    }

    if hp <= 0 { Some(outcome) } else { None }
}

fn div_ceil(amount: Capacity, step: Capacity) -> Capacity {
    (amount + step - 1) / step
}
