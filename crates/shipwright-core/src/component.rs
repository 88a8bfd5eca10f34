//! Components: a device mounted in a particular slot.
//!
//! A component resolves the device's per-slot (weapons, utilities) or
//! per-ship-type (core modules) numbers once at construction and is
//! immutable afterwards. Components are cheap to clone; the device is shared.

use crate::catalog::CatalogError;
use crate::device::{
    ComputerSystemMode, CoreModule, Damage, UtilityDevice, UtilityProfile, WeaponDevice,
    WeaponProfile,
};
use crate::resource::Cost;
use crate::slot::{ComponentKind, ComponentSlotKind, CoreSlot, ShipType, UtilitySlot, WeaponSlot};
use crate::stats::{ShipModifiers, ShipSummary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Weapon
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct WeaponComponent {
    slot: WeaponSlot,
    device: Arc<WeaponDevice>,
}

impl WeaponComponent {
    /// Mounts `device` in a `slot`-sized weapon slot.
    pub fn new(slot: WeaponSlot, device: Arc<WeaponDevice>) -> Result<Self, CatalogError> {
        if !device.supports(slot) {
            return Err(CatalogError::UnsupportedSlot {
                device: device.name.clone(),
                slot: slot.into(),
            });
        }
        Ok(Self { slot, device })
    }

    pub fn slot(&self) -> WeaponSlot {
        self.slot
    }

    pub fn device(&self) -> &Arc<WeaponDevice> {
        &self.device
    }

    fn profile(&self) -> &WeaponProfile {
        // Checked in `new`.
        &self.device.profiles[&self.slot]
    }

    /// Damage profile for the mounted slot size.
    pub fn damage(&self) -> &Damage {
        &self.profile().damage
    }

    pub fn base_cost(&self) -> &Cost {
        &self.profile().cost
    }

    pub fn power(&self) -> f64 {
        self.profile().power
    }

    /// Mean of the damage range, scaled by accuracy.
    pub fn average_damage_per_hit(&self) -> f64 {
        let damage = &self.damage().damage;
        (damage.low + damage.high) / 2.0 * self.device.modifiers.accuracy
    }

    pub fn average_damage_per_day(&self) -> f64 {
        self.average_damage_per_hit() / self.damage().cool_down
    }

    pub fn stats(&self) -> ShipSummary {
        ShipSummary {
            dmg_per_day: Some(self.average_damage_per_day()),
            power: Some(-self.power()),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Utility
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct UtilityComponent {
    slot: UtilitySlot,
    device: Arc<UtilityDevice>,
}

impl UtilityComponent {
    pub fn new(slot: UtilitySlot, device: Arc<UtilityDevice>) -> Result<Self, CatalogError> {
        if !device.supports(slot) {
            return Err(CatalogError::UnsupportedSlot {
                device: device.name.clone(),
                slot: slot.into(),
            });
        }
        Ok(Self { slot, device })
    }

    pub fn slot(&self) -> UtilitySlot {
        self.slot
    }

    pub fn device(&self) -> &Arc<UtilityDevice> {
        &self.device
    }

    pub fn profile(&self) -> &UtilityProfile {
        &self.device.profiles[&self.slot]
    }

    pub fn base_cost(&self) -> &Cost {
        &self.profile().cost
    }

    pub fn stats(&self) -> ShipSummary {
        let p = self.profile();
        let nonzero = |v: f64| (v != 0.0).then_some(v);
        ShipSummary {
            armor: nonzero(p.armor),
            armor_regen: nonzero(p.armor_regen),
            shields: nonzero(p.shield),
            shield_regen: nonzero(p.shield_regen),
            hull: nonzero(p.hull),
            hull_regen: nonzero(p.hull_regen),
            power: nonzero(-p.power),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Core
// ---------------------------------------------------------------------------

/// A core module resolved for one ship type.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreComponent {
    ship_type: ShipType,
    device: Arc<CoreModule>,
    base_cost: Cost,
    power: f64,
}

impl CoreComponent {
    /// Resolves `device` for `ship_type`. Fails if the device does not list
    /// the ship type or has no per-ship numbers for it.
    pub fn new(ship_type: ShipType, device: Arc<CoreModule>) -> Result<Self, CatalogError> {
        if !device.supports(ship_type) {
            return Err(CatalogError::ShipTypeNotSupported {
                device: device.name().to_string(),
                ship_type,
            });
        }
        let missing = || CatalogError::MissingShipValue {
            device: device.name().to_string(),
            ship_type,
        };
        let base_cost = device.cost_for(ship_type).ok_or_else(missing)?;
        let power = device.power_for(ship_type).ok_or_else(missing)?;
        Ok(Self {
            ship_type,
            device,
            base_cost,
            power,
        })
    }

    pub fn slot(&self) -> CoreSlot {
        self.device.slot()
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn device(&self) -> &Arc<CoreModule> {
        &self.device
    }

    pub fn base_cost(&self) -> &Cost {
        &self.base_cost
    }

    pub fn stats(&self) -> ShipSummary {
        let evasion = match self.device.as_ref() {
            CoreModule::Thrusters(t) => t.evasion.get(&self.ship_type).copied(),
            _ => None,
        };
        ShipSummary {
            power: Some(self.power),
            evasion,
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Component sum type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Weapon(WeaponComponent),
    Utility(UtilityComponent),
    Core(CoreComponent),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Weapon(_) => ComponentKind::Weapon,
            Component::Utility(_) => ComponentKind::Utility,
            Component::Core(_) => ComponentKind::Core,
        }
    }

    pub fn slot(&self) -> ComponentSlotKind {
        match self {
            Component::Weapon(c) => c.slot().into(),
            Component::Utility(c) => c.slot().into(),
            Component::Core(c) => c.slot().into(),
        }
    }

    /// Device name.
    pub fn name(&self) -> &str {
        match self {
            Component::Weapon(c) => &c.device().name,
            Component::Utility(c) => &c.device().name,
            Component::Core(c) => c.device().name(),
        }
    }

    pub fn base_cost(&self) -> &Cost {
        match self {
            Component::Weapon(c) => c.base_cost(),
            Component::Utility(c) => c.base_cost(),
            Component::Core(c) => c.base_cost(),
        }
    }

    /// Running cost declared by the device itself. Core modules declare none.
    pub fn upkeep(&self) -> Cost {
        match self {
            Component::Weapon(c) => c.device().upkeep.clone(),
            Component::Utility(c) => c.device().upkeep.clone(),
            Component::Core(_) => Cost::new(),
        }
    }

    pub fn stats(&self) -> ShipSummary {
        match self {
            Component::Weapon(c) => c.stats(),
            Component::Utility(c) => c.stats(),
            Component::Core(c) => c.stats(),
        }
    }

    pub fn provided_modifiers(&self) -> Option<ShipModifiers> {
        match self {
            Component::Weapon(c) => c.device().provided_modifiers,
            Component::Utility(c) => c.device().provided_modifiers,
            Component::Core(c) => c.device().provided_modifiers(),
        }
    }

    pub fn to_record(&self) -> ComponentRecord {
        ComponentRecord {
            component_kind: self.kind(),
            slot: self.slot().name().to_string(),
            device: self.name().to_string(),
        }
    }
}

impl From<WeaponComponent> for Component {
    fn from(c: WeaponComponent) -> Self {
        Component::Weapon(c)
    }
}

impl From<UtilityComponent> for Component {
    fn from(c: UtilityComponent) -> Self {
        Component::Utility(c)
    }
}

impl From<CoreComponent> for Component {
    fn from(c: CoreComponent) -> Self {
        Component::Core(c)
    }
}

/// Whether `component` may be fitted to a ship of type `ship`.
///
/// Weapons and utilities fit any ship. A core module must list the ship
/// type; a non-configurable computer system additionally only fits ships
/// whose default doctrine matches its fixed mode.
pub fn can_use_in_ship(component: &Component, ship: ShipType) -> bool {
    match component {
        Component::Weapon(_) | Component::Utility(_) => true,
        Component::Core(core) => {
            let device = core.device();
            if !device.supports(ship) {
                return false;
            }
            match device.as_ref() {
                CoreModule::ComputerSystem(system) if !system.configurable => {
                    system.mode == ComputerSystemMode::default_for(ship)
                }
                _ => true,
            }
        }
    }
}

/// Interchange form of a component: kind, slot name and device name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    pub component_kind: ComponentKind,
    pub slot: String,
    pub device: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn red_laser_small_damage_figures() {
        let laser = weapon(&red_laser(), WeaponSlot::Small);
        assert!((laser.average_damage_per_hit() - 9.9).abs() < 1e-9);
        assert!((laser.average_damage_per_day() - 9.9 / 4.25).abs() < 1e-9);
        let stats = laser.stats();
        assert_eq!(stats.power, Some(-5.0));
        assert!((stats.dmg_per_day.unwrap() - 2.3294).abs() < 1e-3);
    }

    #[test]
    fn weapon_rejects_unsupported_slot() {
        let result = WeaponComponent::new(WeaponSlot::PointDefense, red_laser());
        assert!(matches!(
            result,
            Err(CatalogError::UnsupportedSlot { ref device, .. }) if device == "red-laser"
        ));
    }

    #[test]
    fn weapon_base_cost_is_per_slot() {
        let medium = weapon(&red_laser(), WeaponSlot::Medium);
        assert_eq!(medium.base_cost(), &alloy(20.0));
        let component = Component::from(medium);
        assert_eq!(component.kind(), ComponentKind::Weapon);
        assert_eq!(component.slot(), ComponentSlotKind::Weapon(WeaponSlot::Medium));
        assert!(component.upkeep().is_empty());
    }

    #[test]
    fn utility_stats_skip_zero_fields() {
        let plate = utility(&armor_plate(), UtilitySlot::Small);
        let stats = plate.stats();
        assert_eq!(stats.armor, Some(40.0));
        assert_eq!(stats.shields, None);
        assert_eq!(stats.power, Some(-2.0));
    }

    #[test]
    fn core_component_resolves_per_ship_numbers() {
        let reactor = core(&fission_reactor(), ShipType::Destroyer);
        assert_eq!(reactor.base_cost(), &alloy(20.0));
        assert_eq!(reactor.stats().power, Some(140.0));
        assert_eq!(reactor.slot(), CoreSlot::Reactor);
    }

    #[test]
    fn core_component_rejects_unlisted_ship() {
        let thrusters = chemical_thrusters();
        let result = CoreComponent::new(ShipType::Juggernaut, thrusters);
        assert!(matches!(
            result,
            Err(CatalogError::ShipTypeNotSupported { ship_type: ShipType::Juggernaut, .. })
        ));
    }

    #[test]
    fn thrusters_contribute_evasion() {
        let thrusters = core(&chemical_thrusters(), ShipType::Corvette);
        let stats = thrusters.stats();
        assert_eq!(stats.power, Some(-10.0));
        assert_eq!(stats.evasion, Some(0.0));
        let modifiers = Component::from(thrusters).provided_modifiers().unwrap();
        assert_eq!(modifiers.sublight_speed, Some(1.0));
    }

    #[test]
    fn weapons_and_utilities_fit_any_ship() {
        let laser = Component::from(weapon(&red_laser(), WeaponSlot::Small));
        let plate = Component::from(utility(&armor_plate(), UtilitySlot::Small));
        for ship in ShipType::ALL {
            assert!(can_use_in_ship(&laser, ship));
            assert!(can_use_in_ship(&plate, ship));
        }
    }

    #[test]
    fn core_module_fits_only_listed_ships() {
        let thrusters = Component::from(core(&chemical_thrusters(), ShipType::Corvette));
        assert!(can_use_in_ship(&thrusters, ShipType::Titan));
        assert!(!can_use_in_ship(&thrusters, ShipType::Juggernaut));
    }

    #[test]
    fn fixed_computer_needs_matching_default_doctrine() {
        // "picket" is allowed on corvettes but the corvette default is "swarm".
        let picket = computer_system(ComputerSystemMode::Picket, false);
        let on_corvette = Component::from(core(&picket, ShipType::Corvette));
        assert!(!can_use_in_ship(&on_corvette, ShipType::Corvette));
        assert!(can_use_in_ship(&on_corvette, ShipType::Destroyer));

        let swarm = computer_system(ComputerSystemMode::Swarm, false);
        let component = Component::from(core(&swarm, ShipType::Corvette));
        assert!(can_use_in_ship(&component, ShipType::Corvette));
    }

    #[test]
    fn configurable_computer_only_needs_listed_ship() {
        let picket = computer_system(ComputerSystemMode::Picket, true);
        let component = Component::from(core(&picket, ShipType::Corvette));
        assert!(can_use_in_ship(&component, ShipType::Corvette));
        assert!(!can_use_in_ship(&component, ShipType::Titan));
    }

    #[test]
    fn record_uses_kebab_case_slot_names() {
        let pd = Component::from(weapon(&sentinel_point_defense(), WeaponSlot::PointDefense));
        let record = pd.to_record();
        assert_eq!(record.component_kind, ComponentKind::Weapon);
        assert_eq!(record.slot, "point-defense");
        assert_eq!(record.device, "sentinel point-defense");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"componentKind":"weapon","slot":"point-defense","device":"sentinel point-defense"}"#
        );
    }
}
