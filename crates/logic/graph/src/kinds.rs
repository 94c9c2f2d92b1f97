//! Closed kind enumerations shared by the data model and the engine.
//!
//! Resource amounts use [`Capacity`] (`i32`): a negative current value is the
//! permitted "about to die" transient while unavoidable damage is applied
//! past lethal.

/// Signed resource amount.
pub type Capacity = i32;

// ============================================================================
// Rechargeable resources
// ============================================================================

/// The closed set of rechargeable resource kinds tracked by the ledger.
///
/// `Energy` and `Reserve` are tracked separately but are spent through the
/// merged [`ConsumableKind::Energy`] pool.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResourceKind {
    /// Primary health pool.
    Energy,
    /// Reserve health pool, drained only after primary reaches its floor.
    Reserve,
    /// Basic ammunition.
    Missiles,
    /// Heavy ammunition.
    Supers,
    /// Area ammunition.
    PowerBombs,
}

impl ResourceKind {
    /// Total number of resource kinds.
    pub const COUNT: usize = 5;

    /// Returns all resource kinds in ledger order.
    pub const fn all() -> [ResourceKind; Self::COUNT] {
        [
            ResourceKind::Energy,
            ResourceKind::Reserve,
            ResourceKind::Missiles,
            ResourceKind::Supers,
            ResourceKind::PowerBombs,
        ]
    }

    /// Returns the kind as a ledger array index.
    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    /// Maps to the consumable pool this kind is spent through.
    pub const fn consumable(self) -> ConsumableKind {
        match self {
            ResourceKind::Energy | ResourceKind::Reserve => ConsumableKind::Energy,
            ResourceKind::Missiles => ConsumableKind::Missiles,
            ResourceKind::Supers => ConsumableKind::Supers,
            ResourceKind::PowerBombs => ConsumableKind::PowerBombs,
        }
    }
}

// ============================================================================
// Consumable view
// ============================================================================

/// The spendable resource pools.
///
/// Primary and reserve health merge into one `Energy` pool, consumed
/// primary-first down to 1, then reserve, then primary past zero (lethal
/// overflow allowed programmatically but signalled to the caller).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConsumableKind {
    /// Merged primary + reserve health.
    Energy,
    /// Basic ammunition.
    Missiles,
    /// Heavy ammunition.
    Supers,
    /// Area ammunition.
    PowerBombs,
}

impl ConsumableKind {
    /// Total number of consumable pools.
    pub const COUNT: usize = 4;

    /// Returns all consumable kinds in pool order.
    pub const fn all() -> [ConsumableKind; Self::COUNT] {
        [
            ConsumableKind::Energy,
            ConsumableKind::Missiles,
            ConsumableKind::Supers,
            ConsumableKind::PowerBombs,
        ]
    }

    /// Returns the kind as a pool array index.
    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }
}

// ============================================================================
// Ammunition
// ============================================================================

/// Ammunition kinds accepted by spend and kill requirements.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AmmoKind {
    Missiles,
    Supers,
    PowerBombs,
}

impl AmmoKind {
    /// Total number of ammunition kinds.
    pub const COUNT: usize = 3;

    /// Returns all ammunition kinds in spend-priority order (cheapest first).
    pub const fn all() -> [AmmoKind; Self::COUNT] {
        [AmmoKind::Missiles, AmmoKind::Supers, AmmoKind::PowerBombs]
    }

    /// Returns the kind as an array index.
    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    /// The rechargeable resource backing this ammunition.
    pub const fn resource(self) -> ResourceKind {
        match self {
            AmmoKind::Missiles => ResourceKind::Missiles,
            AmmoKind::Supers => ResourceKind::Supers,
            AmmoKind::PowerBombs => ResourceKind::PowerBombs,
        }
    }

    /// The consumable pool this ammunition is spent through.
    pub const fn consumable(self) -> ConsumableKind {
        match self {
            AmmoKind::Missiles => ConsumableKind::Missiles,
            AmmoKind::Supers => ConsumableKind::Supers,
            AmmoKind::PowerBombs => ConsumableKind::PowerBombs,
        }
    }
}

// ============================================================================
// Damage-over-time
// ============================================================================

/// Environmental damage-over-time categories.
///
/// Each category has a base damage rate in the graph's
/// [`DamageTable`](crate::DamageTable); the rule layer applies leniency and
/// mitigation on top.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DotKind {
    Heat,
    Lava,
    Acid,
    Electricity,
}

impl DotKind {
    /// Total number of damage-over-time categories.
    pub const COUNT: usize = 4;

    /// Returns all categories in table order.
    pub const fn all() -> [DotKind; Self::COUNT] {
        [
            DotKind::Heat,
            DotKind::Lava,
            DotKind::Acid,
            DotKind::Electricity,
        ]
    }

    /// Returns the category as a table index.
    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }
}
