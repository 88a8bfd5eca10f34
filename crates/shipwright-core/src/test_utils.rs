//! Shared fixtures for unit tests, integration tests and benches.

use crate::builtin;
use crate::component::{CoreComponent, UtilityComponent, WeaponComponent};
use crate::device::{ComputerSystem, ComputerSystemMode, CoreModule, UtilityDevice, WeaponDevice};
use crate::resource::{Cost, Resource};
use crate::slot::{ShipType, UtilitySlot, WeaponSlot};
use crate::stats::ShipModifiers;
use std::sync::Arc;

pub fn alloy(n: f64) -> Cost {
    Cost::from([(Resource::Alloy, n)])
}

// -- Devices --

pub fn red_laser() -> Arc<WeaponDevice> {
    Arc::new(builtin::red_laser())
}

pub fn sentinel_point_defense() -> Arc<WeaponDevice> {
    let mut weapons = builtin::point_defense_weapons();
    Arc::new(weapons.remove(0))
}

/// Small plate: 8 alloy, 40 armor, 2 power.
pub fn armor_plate() -> Arc<UtilityDevice> {
    Arc::new(builtin::nanocomposite_plating())
}

/// Small deflector: 12 alloy, 0.5 energy upkeep.
pub fn deflector() -> Arc<UtilityDevice> {
    Arc::new(builtin::deflector())
}

pub fn fission_reactor() -> Arc<CoreModule> {
    Arc::new(builtin::fission_reactor())
}

pub fn fusion_reactor() -> Arc<CoreModule> {
    Arc::new(builtin::fusion_reactor())
}

pub fn chemical_thrusters() -> Arc<CoreModule> {
    Arc::new(builtin::chemical_thrusters())
}

/// A computer fixed to `mode` with no effects, usable on the mode's allowed ships.
pub fn computer_system(mode: ComputerSystemMode, configurable: bool) -> Arc<CoreModule> {
    Arc::new(CoreModule::ComputerSystem(ComputerSystem {
        name: format!("test ({mode})"),
        ships: mode.allowed_ship_types().to_vec(),
        cost: Cost::new(),
        power: 5.0,
        mode,
        configurable,
        provided_modifiers: ShipModifiers::default(),
    }))
}

// -- Components --

/// Panics if the device does not support `slot`.
pub fn weapon(device: &Arc<WeaponDevice>, slot: WeaponSlot) -> WeaponComponent {
    WeaponComponent::new(slot, Arc::clone(device)).unwrap()
}

pub fn utility(device: &Arc<UtilityDevice>, slot: UtilitySlot) -> UtilityComponent {
    UtilityComponent::new(slot, Arc::clone(device)).unwrap()
}

pub fn core(device: &Arc<CoreModule>, ship: ShipType) -> CoreComponent {
    CoreComponent::new(ship, Arc::clone(device)).unwrap()
}
