//! Serde data file structs for catalog definitions.
//!
//! These structs define the on-disk format for ships, segment patterns,
//! weapons, utilities and core modules. They are deserialized from RON, JSON,
//! or TOML data files and then resolved into engine types by the loader.
//!
//! Enumerated values (ship types, slot kinds, resources, modes) are kept as
//! plain strings here and parsed during resolution, so every format spells
//! them the same way: `"point-defense"`, `"ftl-drive"`, `"dark-matter"`.

use serde::Deserialize;
use shipwright_core::device::{Damage, WeaponModifiers};
use shipwright_core::stats::ShipModifiers;
use std::collections::BTreeMap;

/// Resource name to quantity.
pub type CostData = BTreeMap<String, f64>;

// ===========================================================================
// Hulls
// ===========================================================================

/// A ship schema definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct ShipData {
    pub ship_type: String,
    #[serde(default)]
    pub base_cost: CostData,
    pub hull: f64,
    #[serde(default)]
    pub evasion: f64,
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub disengagement_chance: f64,
    pub core_slots: Vec<String>,
    #[serde(default)]
    pub upkeep: Option<UpkeepData>,
}

/// Upkeep rule override. Ships without one use the proportional default.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpkeepData {
    Proportional { energy_rate: f64, alloy_rate: f64 },
    Flat(CostData),
}

/// A named slot pattern for one hull position of one ship type.
///
/// Patterns are offered in file order.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentData {
    pub ship_type: String,
    pub position: String,
    pub name: String,
    #[serde(default)]
    pub weapons: BTreeMap<String, usize>,
    #[serde(default)]
    pub utilities: BTreeMap<String, usize>,
}

// ===========================================================================
// Weapons and utilities
// ===========================================================================

/// A weapon definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct WeaponData {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub sub_kind: Option<String>,
    pub modifiers: WeaponModifiers,
    /// One entry per slot size the weapon can be mounted in.
    pub sizes: Vec<WeaponSizeData>,
    #[serde(default)]
    pub upkeep: CostData,
    #[serde(default)]
    pub provided_modifiers: Option<ShipModifiers>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeaponSizeData {
    pub slot: String,
    #[serde(default)]
    pub cost: CostData,
    #[serde(default)]
    pub power: f64,
    pub damage: Damage,
}

/// A utility device definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct UtilityData {
    pub name: String,
    pub sizes: Vec<UtilitySizeData>,
    #[serde(default)]
    pub upkeep: CostData,
    #[serde(default)]
    pub provided_modifiers: Option<ShipModifiers>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UtilitySizeData {
    pub slot: String,
    pub cost: CostData,
    pub power: f64,
    pub armor: f64,
    pub armor_regen: f64,
    pub shield: f64,
    pub shield_regen: f64,
    pub hull: f64,
    pub hull_regen: f64,
}

// ===========================================================================
// Core modules
// ===========================================================================

/// Top-level core module file: one list per module family, all optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CoreModulesData {
    pub reactors: Vec<ReactorData>,
    pub ftl_drives: Vec<FtlDriveData>,
    pub computer_systems: Vec<ComputerSystemData>,
    pub thrusters: Vec<ThrusterData>,
    pub sensors: Vec<SensorData>,
}

/// A reactor; the ship types it fits are the ones listed in `per_ship`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReactorData {
    pub name: String,
    pub per_ship: Vec<ReactorSizeData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReactorSizeData {
    pub ship_type: String,
    #[serde(default)]
    pub cost: CostData,
    pub power: f64,
}

/// An FTL drive. An empty `ships` list means every ship type.
#[derive(Debug, Clone, Deserialize)]
pub struct FtlDriveData {
    pub name: String,
    #[serde(default)]
    pub ships: Vec<String>,
    #[serde(default)]
    pub cost: CostData,
    pub power: f64,
    #[serde(default = "default_disengagement")]
    pub disengagement_opportunities: u32,
    #[serde(default = "default_true")]
    pub hyper_jump: bool,
}

fn default_disengagement() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

/// A computer system declared once, with one effect set per mode it offers.
#[derive(Debug, Clone, Deserialize)]
pub struct ComputerSystemData {
    pub name: String,
    #[serde(default)]
    pub cost: CostData,
    pub power: f64,
    #[serde(default)]
    pub configurable: bool,
    pub modes: Vec<ModeEffectData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModeEffectData {
    pub mode: String,
    #[serde(default)]
    pub modifiers: ShipModifiers,
}

/// A thruster tier, expanded per ship size by the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct ThrusterData {
    pub name: String,
    pub cost_per_size: CostData,
    pub power_per_size: f64,
    #[serde(default)]
    pub evasion_per_level: f64,
    pub sublight_speed: f64,
}

/// Sensors. An empty `ships` list means every ship type.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorData {
    pub name: String,
    #[serde(default)]
    pub ships: Vec<String>,
    #[serde(default)]
    pub cost: CostData,
    pub power: f64,
    #[serde(default)]
    pub tracking: f64,
}
