//! Definition catalogs referenced by requirement leaves.
//!
//! Catalogs are static data: the loader fills them through the builder and
//! the engine only ever reads them. Everything is addressed by arena index;
//! names exist for authoring and for resolving rule-configuration entries.

use crate::ids::{CapabilityId, RequirementId};
use crate::kinds::{Capacity, DotKind, ResourceKind};

// ============================================================================
// Capabilities
// ============================================================================

/// Damage mitigation conferred by a held capability.
///
/// Incoming environmental and contact damage is divided by the best divisor
/// among held mitigating capabilities. Divisors do not stack: a divisor-4
/// shield subsumes a divisor-2 one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mitigation {
    /// Damage divisor, at least 1.
    pub divisor: u32,
}

impl Mitigation {
    /// Halves incoming damage.
    pub const HALF: Mitigation = Mitigation { divisor: 2 };
    /// Quarters incoming damage.
    pub const QUARTER: Mitigation = Mitigation { divisor: 4 };
}

/// A unique, non-stacking capability.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapabilityDef {
    /// Authoring name, unique within the catalog.
    pub name: String,
    /// Damage mitigation granted while held and enabled.
    pub mitigation: Option<Mitigation>,
    /// Whether this capability is a weapon for ammo-free enemy kills.
    pub weapon: bool,
}

impl CapabilityDef {
    /// A plain capability with no mitigation and no weapon role.
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mitigation: None,
            weapon: false,
        }
    }

    /// A mitigating capability (suit-equivalent).
    pub fn shield(name: impl Into<String>, mitigation: Mitigation) -> Self {
        Self {
            name: name.into(),
            mitigation: Some(mitigation),
            weapon: false,
        }
    }

    /// A weapon capability usable for ammo-free kills.
    pub fn weapon(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mitigation: None,
            weapon: true,
        }
    }
}

// ============================================================================
// Techniques and helpers
// ============================================================================

/// A named technique: pure knowledge, no cost, individually disableable by
/// the rule configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TechniqueDef {
    /// Authoring name, unique within the catalog.
    pub name: String,
}

/// A named reusable sub-requirement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HelperDef {
    /// Authoring name, unique within the catalog.
    pub name: String,
    /// Root of the shared requirement tree.
    pub requirement: RequirementId,
}

// ============================================================================
// Expansions
// ============================================================================

/// A stacking pickup that raises one resource maximum by a fixed amount per
/// copy. Base maximums are supplied externally and never mutated by pickups.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpansionDef {
    /// Authoring name, unique within the catalog.
    pub name: String,
    /// The resource whose maximum this pickup raises.
    pub resource: ResourceKind,
    /// Maximum increase per copy.
    pub amount: Capacity,
}

// ============================================================================
// Enemies and hit sources
// ============================================================================

/// An enemy kind targeted by kill requirements.
///
/// Kill accounting is greedy: a held weapon capability from `weapon_kills`
/// defeats the enemy for free; otherwise ammunition is spent cheapest-first
/// against `hit_points`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDef {
    /// Authoring name, unique within the catalog.
    pub name: String,
    /// Hit points per individual.
    pub hit_points: Capacity,
    /// Damage dealt by one missile, 0 if immune.
    pub missile_damage: Capacity,
    /// Damage dealt by one super, 0 if immune.
    pub super_damage: Capacity,
    /// Damage dealt by one power bomb, 0 if immune. Power bombs hit every
    /// individual in a group at once.
    pub power_bomb_damage: Capacity,
    /// Weapon capabilities that defeat this enemy without ammunition.
    pub weapon_kills: Vec<CapabilityId>,
}

/// A named contact-damage source (an enemy touch, a thorn field).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitSourceDef {
    /// Authoring name, unique within the catalog.
    pub name: String,
    /// Unmitigated damage per hit.
    pub damage: Capacity,
}

// ============================================================================
// Damage-over-time table
// ============================================================================

/// Base damage rate of a damage-over-time category, expressed as an integer
/// fraction of energy per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRate {
    pub numerator: u32,
    pub denominator: u32,
}

impl DamageRate {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

/// Per-category damage-over-time rates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageTable {
    rates: [DamageRate; DotKind::COUNT],
}

impl DamageTable {
    /// Builds a table from explicit per-category rates, in [`DotKind::all`]
    /// order.
    pub const fn new(rates: [DamageRate; DotKind::COUNT]) -> Self {
        Self { rates }
    }

    /// Returns the rate for a category.
    #[inline]
    pub const fn rate(&self, kind: DotKind) -> DamageRate {
        self.rates[kind.as_index()]
    }

    /// Unmitigated damage for a frame count, rounded down per the rate
    /// fraction.
    pub fn damage(&self, kind: DotKind, frames: u32) -> Capacity {
        let rate = self.rate(kind);
        ((frames * rate.numerator) / rate.denominator) as Capacity
    }
}

impl Default for DamageTable {
    /// Conventional rates: heat 1/4 per frame, lava 1/2, acid 3/2,
    /// electricity 1/1.
    fn default() -> Self {
        Self::new([
            DamageRate::new(1, 4),
            DamageRate::new(1, 2),
            DamageRate::new(3, 2),
            DamageRate::new(1, 1),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_damage_scales_with_rate() {
        let table = DamageTable::default();
        assert_eq!(table.damage(DotKind::Heat, 100), 25);
        assert_eq!(table.damage(DotKind::Lava, 100), 50);
        assert_eq!(table.damage(DotKind::Acid, 100), 150);
        assert_eq!(table.damage(DotKind::Electricity, 100), 100);
    }

    #[test]
    fn dot_damage_rounds_down() {
        let table = DamageTable::default();
        assert_eq!(table.damage(DotKind::Heat, 3), 0);
        assert_eq!(table.damage(DotKind::Heat, 7), 1);
    }
}
