//! Slot taxonomy: ship types, hull positions and the three disjoint families
//! of component slot kinds.
//!
//! Weapon, utility and core slot kinds are separate enums, so a kind can
//! never belong to more than one family. [`ComponentSlotKind`] is the sum of
//! the three and is what open/used slot queries are keyed by.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing a kebab-case name that matches no variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {expected}: '{name}'")]
pub struct ParseNameError {
    pub expected: &'static str,
    pub name: String,
}

/// Implements `Display` and `FromStr` from an `ALL` table and a `name()` method.
macro_rules! impl_named {
    ($ty:ty, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = ParseNameError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name() == s)
                    .ok_or_else(|| ParseNameError {
                        expected: $label,
                        name: s.to_string(),
                    })
            }
        }
    };
}

pub(crate) use impl_named;

// ---------------------------------------------------------------------------
// Ship types and hull positions
// ---------------------------------------------------------------------------

/// Hull class of a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShipType {
    Corvette,
    Frigate,
    Destroyer,
    Cruiser,
    Battleship,
    Titan,
    Juggernaut,
}

impl ShipType {
    pub const ALL: [ShipType; 7] = [
        ShipType::Corvette,
        ShipType::Frigate,
        ShipType::Destroyer,
        ShipType::Cruiser,
        ShipType::Battleship,
        ShipType::Titan,
        ShipType::Juggernaut,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShipType::Corvette => "corvette",
            ShipType::Frigate => "frigate",
            ShipType::Destroyer => "destroyer",
            ShipType::Cruiser => "cruiser",
            ShipType::Battleship => "battleship",
            ShipType::Titan => "titan",
            ShipType::Juggernaut => "juggernaut",
        }
    }
}

impl_named!(ShipType, "ship type");

/// One of the (up to) three hull sections a ship is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HullPosition {
    Bow,
    Core,
    Stern,
}

impl HullPosition {
    /// Bow, core, stern. This is also the order segment components are listed in.
    pub const ALL: [HullPosition; 3] = [HullPosition::Bow, HullPosition::Core, HullPosition::Stern];

    pub fn name(self) -> &'static str {
        match self {
            HullPosition::Bow => "bow",
            HullPosition::Core => "core",
            HullPosition::Stern => "stern",
        }
    }
}

impl_named!(HullPosition, "hull position");

// ---------------------------------------------------------------------------
// Slot kinds
// ---------------------------------------------------------------------------

/// Mount types that hold weapons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeaponSlot {
    Small,
    Medium,
    Large,
    ExtraLarge,
    PointDefense,
    Guided,
    Hangar,
    Titan,
    WorldDestroyer,
}

impl WeaponSlot {
    pub const ALL: [WeaponSlot; 9] = [
        WeaponSlot::Small,
        WeaponSlot::Medium,
        WeaponSlot::Large,
        WeaponSlot::ExtraLarge,
        WeaponSlot::PointDefense,
        WeaponSlot::Guided,
        WeaponSlot::Hangar,
        WeaponSlot::Titan,
        WeaponSlot::WorldDestroyer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WeaponSlot::Small => "small",
            WeaponSlot::Medium => "medium",
            WeaponSlot::Large => "large",
            WeaponSlot::ExtraLarge => "extra-large",
            WeaponSlot::PointDefense => "point-defense",
            WeaponSlot::Guided => "guided",
            WeaponSlot::Hangar => "hangar",
            WeaponSlot::Titan => "titan",
            WeaponSlot::WorldDestroyer => "world-destroyer",
        }
    }
}

impl_named!(WeaponSlot, "weapon slot");

/// Mount types that hold utility devices (armor, shields, auxiliaries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UtilitySlot {
    Small,
    Medium,
    Large,
    Auxiliary,
}

impl UtilitySlot {
    pub const ALL: [UtilitySlot; 4] = [
        UtilitySlot::Small,
        UtilitySlot::Medium,
        UtilitySlot::Large,
        UtilitySlot::Auxiliary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            UtilitySlot::Small => "small",
            UtilitySlot::Medium => "medium",
            UtilitySlot::Large => "large",
            UtilitySlot::Auxiliary => "auxiliary",
        }
    }
}

impl_named!(UtilitySlot, "utility slot");

/// Ship-wide module slots. A hull declares each of these at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoreSlot {
    Reactor,
    FtlDrive,
    ComputerSystem,
    Thrusters,
    Sensors,
    Aura,
}

impl CoreSlot {
    pub const ALL: [CoreSlot; 6] = [
        CoreSlot::Reactor,
        CoreSlot::FtlDrive,
        CoreSlot::ComputerSystem,
        CoreSlot::Thrusters,
        CoreSlot::Sensors,
        CoreSlot::Aura,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CoreSlot::Reactor => "reactor",
            CoreSlot::FtlDrive => "ftl-drive",
            CoreSlot::ComputerSystem => "computer-system",
            CoreSlot::Thrusters => "thrusters",
            CoreSlot::Sensors => "sensors",
            CoreSlot::Aura => "aura",
        }
    }
}

impl_named!(CoreSlot, "core slot");

/// Which family a component (or a slot) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    Weapon,
    Utility,
    Core,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 3] = [
        ComponentKind::Weapon,
        ComponentKind::Utility,
        ComponentKind::Core,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Weapon => "weapon",
            ComponentKind::Utility => "utility",
            ComponentKind::Core => "core",
        }
    }
}

impl_named!(ComponentKind, "component kind");

/// Any slot kind, tagged with its family.
///
/// Serializes as the bare kebab-case slot name; the family travels
/// separately (see `ComponentRecord`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum ComponentSlotKind {
    Weapon(WeaponSlot),
    Utility(UtilitySlot),
    Core(CoreSlot),
}

impl ComponentSlotKind {
    pub fn kind(self) -> ComponentKind {
        match self {
            ComponentSlotKind::Weapon(_) => ComponentKind::Weapon,
            ComponentSlotKind::Utility(_) => ComponentKind::Utility,
            ComponentSlotKind::Core(_) => ComponentKind::Core,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ComponentSlotKind::Weapon(s) => s.name(),
            ComponentSlotKind::Utility(s) => s.name(),
            ComponentSlotKind::Core(s) => s.name(),
        }
    }

    /// Parses a slot name within the given family.
    pub fn parse(kind: ComponentKind, name: &str) -> Result<Self, ParseNameError> {
        Ok(match kind {
            ComponentKind::Weapon => ComponentSlotKind::Weapon(name.parse()?),
            ComponentKind::Utility => ComponentSlotKind::Utility(name.parse()?),
            ComponentKind::Core => ComponentSlotKind::Core(name.parse()?),
        })
    }
}

impl fmt::Display for ComponentSlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.name())
    }
}

impl From<WeaponSlot> for ComponentSlotKind {
    fn from(slot: WeaponSlot) -> Self {
        ComponentSlotKind::Weapon(slot)
    }
}

impl From<UtilitySlot> for ComponentSlotKind {
    fn from(slot: UtilitySlot) -> Self {
        ComponentSlotKind::Utility(slot)
    }
}

impl From<CoreSlot> for ComponentSlotKind {
    fn from(slot: CoreSlot) -> Self {
        ComponentSlotKind::Core(slot)
    }
}

/// Slot counts keyed by slot kind.
pub type SlotCount<K> = BTreeMap<K, usize>;

/// Widens a typed slot count into one keyed by [`ComponentSlotKind`].
pub fn widen_slot_count<K>(counts: SlotCount<K>) -> SlotCount<ComponentSlotKind>
where
    K: Into<ComponentSlotKind>,
{
    counts.into_iter().map(|(k, n)| (k.into(), n)).collect()
}
