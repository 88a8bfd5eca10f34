//! Immutable device definitions: weapons, utility devices and core modules.
//!
//! Devices are catalog entries. Components (see [`crate::component`]) pair
//! a device with the slot it is mounted in and resolve its per-slot or
//! per-ship-type numbers.

use crate::resource::Cost;
use crate::slot::{CoreSlot, ShipType, UtilitySlot, WeaponSlot, impl_named, ParseNameError};
use crate::stats::ShipModifiers;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ===========================================================================
// Weapons
// ===========================================================================

/// Weapon families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeaponKind {
    // energy
    AntiArmor,
    AntiHull,
    Penetrating,
    AntiShield,
    // kinetic
    MassDriver,
    MacroBattery,
    AutoCannon,
    KineticLauncher,
    MegaCannon,
    SaturatorArtillery,
    // explosive
    Missile,
    Torpedoes,
    SwarmerMissiles,
    StrikeCraft,
    FlakGun,
    PointDefense,
    Perdition,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 17] = [
        WeaponKind::AntiArmor,
        WeaponKind::AntiHull,
        WeaponKind::Penetrating,
        WeaponKind::AntiShield,
        WeaponKind::MassDriver,
        WeaponKind::MacroBattery,
        WeaponKind::AutoCannon,
        WeaponKind::KineticLauncher,
        WeaponKind::MegaCannon,
        WeaponKind::SaturatorArtillery,
        WeaponKind::Missile,
        WeaponKind::Torpedoes,
        WeaponKind::SwarmerMissiles,
        WeaponKind::StrikeCraft,
        WeaponKind::FlakGun,
        WeaponKind::PointDefense,
        WeaponKind::Perdition,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WeaponKind::AntiArmor => "anti-armor",
            WeaponKind::AntiHull => "anti-hull",
            WeaponKind::Penetrating => "penetrating",
            WeaponKind::AntiShield => "anti-shield",
            WeaponKind::MassDriver => "mass-driver",
            WeaponKind::MacroBattery => "macro-battery",
            WeaponKind::AutoCannon => "auto-cannon",
            WeaponKind::KineticLauncher => "kinetic-launcher",
            WeaponKind::MegaCannon => "mega-cannon",
            WeaponKind::SaturatorArtillery => "saturator-artillery",
            WeaponKind::Missile => "missile",
            WeaponKind::Torpedoes => "torpedoes",
            WeaponKind::SwarmerMissiles => "swarmer-missiles",
            WeaponKind::StrikeCraft => "strike-craft",
            WeaponKind::FlakGun => "flak-gun",
            WeaponKind::PointDefense => "point-defense",
            WeaponKind::Perdition => "perdition",
        }
    }
}

impl_named!(WeaponKind, "weapon kind");

/// Low/high damage per hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageRange {
    pub low: f64,
    pub high: f64,
}

/// Engagement distance band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

/// How a weapon fires when mounted in a given slot size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Damage {
    pub damage: DamageRange,
    pub tracking: f64,
    pub cool_down: f64,
    pub range: Range,
}

/// Fractions of a defence layer a weapon ignores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreModifiers {
    pub hull: Option<f64>,
    pub armor: Option<f64>,
    pub shield: Option<f64>,
}

/// Accuracy and per-defence-layer damage multipliers shared by a weapon family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponModifiers {
    pub accuracy: f64,
    pub hull: f64,
    pub armor: f64,
    pub shield: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<IgnoreModifiers>,
}

/// Per-slot-size numbers of a weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub cost: Cost,
    pub power: f64,
    pub damage: Damage,
}

/// A weapon device, available in one or more slot sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponDevice {
    pub name: String,
    pub kind: WeaponKind,
    pub sub_kind: Option<String>,
    pub modifiers: WeaponModifiers,
    pub profiles: BTreeMap<WeaponSlot, WeaponProfile>,
    pub upkeep: Cost,
    pub provided_modifiers: Option<ShipModifiers>,
}

impl WeaponDevice {
    /// Slot sizes this weapon can be mounted in.
    pub fn slots(&self) -> impl Iterator<Item = WeaponSlot> + '_ {
        self.profiles.keys().copied()
    }

    pub fn supports(&self, slot: WeaponSlot) -> bool {
        self.profiles.contains_key(&slot)
    }

    pub fn profile(&self, slot: WeaponSlot) -> Option<&WeaponProfile> {
        self.profiles.get(&slot)
    }
}

// ===========================================================================
// Utility devices
// ===========================================================================

/// Per-slot-size numbers of a utility device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilityProfile {
    pub cost: Cost,
    pub power: f64,
    pub armor: f64,
    pub armor_regen: f64,
    pub shield: f64,
    pub shield_regen: f64,
    pub hull: f64,
    pub hull_regen: f64,
}

/// Armor plating, shield generators, auxiliaries.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilityDevice {
    pub name: String,
    pub profiles: BTreeMap<UtilitySlot, UtilityProfile>,
    pub upkeep: Cost,
    pub provided_modifiers: Option<ShipModifiers>,
}

impl UtilityDevice {
    pub fn slots(&self) -> impl Iterator<Item = UtilitySlot> + '_ {
        self.profiles.keys().copied()
    }

    pub fn supports(&self, slot: UtilitySlot) -> bool {
        self.profiles.contains_key(&slot)
    }

    pub fn profile(&self, slot: UtilitySlot) -> Option<&UtilityProfile> {
        self.profiles.get(&slot)
    }
}

// ===========================================================================
// Core modules
// ===========================================================================

/// Combat doctrine a computer system runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComputerSystemMode {
    Swarm,
    Torpedo,
    Picket,
    Line,
    Artillery,
    Carrier,
}

impl ComputerSystemMode {
    pub const ALL: [ComputerSystemMode; 6] = [
        ComputerSystemMode::Swarm,
        ComputerSystemMode::Torpedo,
        ComputerSystemMode::Picket,
        ComputerSystemMode::Line,
        ComputerSystemMode::Artillery,
        ComputerSystemMode::Carrier,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ComputerSystemMode::Swarm => "swarm",
            ComputerSystemMode::Torpedo => "torpedo",
            ComputerSystemMode::Picket => "picket",
            ComputerSystemMode::Line => "line",
            ComputerSystemMode::Artillery => "artillery",
            ComputerSystemMode::Carrier => "carrier",
        }
    }

    /// Ship types allowed to run this mode.
    pub fn allowed_ship_types(self) -> &'static [ShipType] {
        use ShipType::*;
        match self {
            ComputerSystemMode::Swarm => &[Corvette],
            ComputerSystemMode::Torpedo => &[Frigate, Cruiser],
            ComputerSystemMode::Picket => &[Corvette, Destroyer, Cruiser],
            ComputerSystemMode::Line => &[Destroyer, Cruiser, Battleship],
            ComputerSystemMode::Artillery => &[Frigate, Destroyer, Cruiser, Battleship, Titan],
            ComputerSystemMode::Carrier => &[Cruiser, Battleship, Titan, Juggernaut],
        }
    }

    /// Each ship type has exactly one default doctrine.
    pub fn default_for(ship: ShipType) -> ComputerSystemMode {
        match ship {
            ShipType::Corvette => ComputerSystemMode::Swarm,
            ShipType::Frigate => ComputerSystemMode::Torpedo,
            ShipType::Destroyer => ComputerSystemMode::Picket,
            ShipType::Cruiser => ComputerSystemMode::Line,
            ShipType::Battleship | ShipType::Titan => ComputerSystemMode::Artillery,
            ShipType::Juggernaut => ComputerSystemMode::Carrier,
        }
    }
}

impl_named!(ComputerSystemMode, "computer system mode");

/// Generates ship power. Cost and output scale with the hull.
#[derive(Debug, Clone, PartialEq)]
pub struct Reactor {
    pub name: String,
    pub ships: Vec<ShipType>,
    pub cost: BTreeMap<ShipType, Cost>,
    pub power: BTreeMap<ShipType, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FtlDrive {
    pub name: String,
    pub ships: Vec<ShipType>,
    pub cost: Cost,
    pub power: f64,
    pub disengagement_opportunities: u32,
    pub hyper_jump: bool,
}

/// A computer system fixed to one operating mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputerSystem {
    pub name: String,
    pub ships: Vec<ShipType>,
    pub cost: Cost,
    pub power: f64,
    pub mode: ComputerSystemMode,
    pub configurable: bool,
    pub provided_modifiers: ShipModifiers,
}

/// Declares a computer system once with an effect set per mode. Expands into
/// one [`ComputerSystem`] per mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputerSystemDescriptor {
    pub name: String,
    pub cost: Cost,
    pub power: f64,
    pub configurable: bool,
    pub effects: BTreeMap<ComputerSystemMode, ShipModifiers>,
}

impl ComputerSystemDescriptor {
    /// One device per declared mode, named `"<name> (<mode>)"`, usable on the
    /// mode's allowed ship types.
    pub fn expand(&self) -> Vec<ComputerSystem> {
        self.effects
            .iter()
            .map(|(mode, effects)| ComputerSystem {
                name: format!("{} ({})", self.name, mode),
                ships: mode.allowed_ship_types().to_vec(),
                cost: self.cost.clone(),
                power: self.power,
                mode: *mode,
                configurable: self.configurable,
                provided_modifiers: *effects,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SublightThruster {
    pub name: String,
    pub ships: Vec<ShipType>,
    pub cost: BTreeMap<ShipType, Cost>,
    pub power: BTreeMap<ShipType, f64>,
    pub evasion: BTreeMap<ShipType, f64>,
    pub provided_modifiers: ShipModifiers,
}

impl SublightThruster {
    /// Builds a thruster tier from per-size base values.
    ///
    /// Cost and power scale x1, x1, x2, x4, x8, x16 from corvette to titan;
    /// evasion scales x5, x5, x4, x3, x2, x1. Juggernauts take no thrusters.
    pub fn tier(
        name: &str,
        cost_per_size: Cost,
        power_per_size: f64,
        evasion_per_level: f64,
        sublight_speed: f64,
    ) -> SublightThruster {
        const SCALING: [(ShipType, f64, f64); 6] = [
            (ShipType::Corvette, 1.0, 5.0),
            (ShipType::Frigate, 1.0, 5.0),
            (ShipType::Destroyer, 2.0, 4.0),
            (ShipType::Cruiser, 4.0, 3.0),
            (ShipType::Battleship, 8.0, 2.0),
            (ShipType::Titan, 16.0, 1.0),
        ];
        SublightThruster {
            name: name.to_string(),
            ships: SCALING.iter().map(|(ship, _, _)| *ship).collect(),
            cost: SCALING
                .iter()
                .map(|(ship, size, _)| (*ship, cost_per_size.scaled(*size)))
                .collect(),
            power: SCALING
                .iter()
                .map(|(ship, size, _)| (*ship, power_per_size * size))
                .collect(),
            evasion: SCALING
                .iter()
                .map(|(ship, _, level)| (*ship, evasion_per_level * level))
                .collect(),
            provided_modifiers: ShipModifiers {
                sublight_speed: Some(sublight_speed),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sensors {
    pub name: String,
    pub ships: Vec<ShipType>,
    pub cost: Cost,
    pub power: f64,
    pub tracking: f64,
}

/// Any core module. Each variant fits exactly one [`CoreSlot`].
#[derive(Debug, Clone, PartialEq)]
pub enum CoreModule {
    Reactor(Reactor),
    FtlDrive(FtlDrive),
    ComputerSystem(ComputerSystem),
    Thrusters(SublightThruster),
    Sensors(Sensors),
}

impl CoreModule {
    pub fn name(&self) -> &str {
        match self {
            CoreModule::Reactor(d) => &d.name,
            CoreModule::FtlDrive(d) => &d.name,
            CoreModule::ComputerSystem(d) => &d.name,
            CoreModule::Thrusters(d) => &d.name,
            CoreModule::Sensors(d) => &d.name,
        }
    }

    pub fn slot(&self) -> CoreSlot {
        match self {
            CoreModule::Reactor(_) => CoreSlot::Reactor,
            CoreModule::FtlDrive(_) => CoreSlot::FtlDrive,
            CoreModule::ComputerSystem(_) => CoreSlot::ComputerSystem,
            CoreModule::Thrusters(_) => CoreSlot::Thrusters,
            CoreModule::Sensors(_) => CoreSlot::Sensors,
        }
    }

    /// Ship types this module may be fitted to.
    pub fn ships(&self) -> &[ShipType] {
        match self {
            CoreModule::Reactor(d) => &d.ships,
            CoreModule::FtlDrive(d) => &d.ships,
            CoreModule::ComputerSystem(d) => &d.ships,
            CoreModule::Thrusters(d) => &d.ships,
            CoreModule::Sensors(d) => &d.ships,
        }
    }

    pub fn supports(&self, ship: ShipType) -> bool {
        self.ships().contains(&ship)
    }

    /// Build cost when fitted to `ship`. `None` if a per-ship table has no entry.
    pub fn cost_for(&self, ship: ShipType) -> Option<Cost> {
        match self {
            CoreModule::Reactor(d) => d.cost.get(&ship).cloned(),
            CoreModule::Thrusters(d) => d.cost.get(&ship).cloned(),
            CoreModule::FtlDrive(d) => Some(d.cost.clone()),
            CoreModule::ComputerSystem(d) => Some(d.cost.clone()),
            CoreModule::Sensors(d) => Some(d.cost.clone()),
        }
    }

    /// Power drawn (negative) or generated (positive, reactors) on `ship`.
    pub fn power_for(&self, ship: ShipType) -> Option<f64> {
        match self {
            CoreModule::Reactor(d) => d.power.get(&ship).copied(),
            CoreModule::Thrusters(d) => d.power.get(&ship).map(|p| -p),
            CoreModule::FtlDrive(d) => Some(-d.power),
            CoreModule::ComputerSystem(d) => Some(-d.power),
            CoreModule::Sensors(d) => Some(-d.power),
        }
    }

    /// Ship-wide modifiers this module provides, if any.
    pub fn provided_modifiers(&self) -> Option<ShipModifiers> {
        match self {
            CoreModule::ComputerSystem(d) => Some(d.provided_modifiers),
            CoreModule::Thrusters(d) => Some(d.provided_modifiers),
            CoreModule::Sensors(d) if d.tracking != 0.0 => Some(ShipModifiers {
                tracking: Some(d.tracking),
                ..Default::default()
            }),
            CoreModule::Reactor(_) | CoreModule::FtlDrive(_) | CoreModule::Sensors(_) => None,
        }
    }
}
