//! Device catalog: the immutable set of weapons, utilities and core modules,
//! and every component they can be mounted as.
//!
//! Built with [`DeviceCatalogBuilder`] (register, then `build()`), frozen
//! afterwards. `build()` validates every device and enumerates one component
//! per (device x supported slot) for weapons and utilities and one per
//! (device x supported ship type) for core modules.

use crate::component::{
    Component, ComponentRecord, CoreComponent, UtilityComponent, WeaponComponent,
    can_use_in_ship,
};
use crate::design::{ShipDesign, ShipDesignRecord};
use crate::device::{ComputerSystemDescriptor, CoreModule, UtilityDevice, WeaponDevice};
use crate::slot::{
    ComponentKind, ComponentSlotKind, CoreSlot, HullPosition, ParseNameError, ShipType,
    UtilitySlot, WeaponSlot,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Errors raised while defining or querying a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("no schema registered for ship type {0}")]
    UnknownSchema(ShipType),
    #[error("duplicate schema for ship type {0}")]
    DuplicateSchema(ShipType),
    #[error("duplicate pattern '{pattern}' at {position} of {ship_type}")]
    DuplicatePattern {
        ship_type: ShipType,
        position: HullPosition,
        pattern: String,
    },
    #[error("pattern '{pattern}' belongs to {pattern_ship_type}, not {ship_type}")]
    PatternShipTypeMismatch {
        ship_type: ShipType,
        pattern: String,
        pattern_ship_type: ShipType,
    },
    #[error("pattern '{pattern}' declares zero slots of kind {slot}")]
    EmptySlotCount {
        pattern: String,
        slot: ComponentSlotKind,
    },
    #[error("{ship_type} declares core slot {slot} more than once")]
    DuplicateCoreSlot { ship_type: ShipType, slot: CoreSlot },
    #[error("duplicate {kind} device '{name}'")]
    DuplicateDevice { kind: ComponentKind, name: String },
    #[error("device '{0}' supports no slot sizes")]
    NoSlots(String),
    #[error("device '{0}' supports no ship types")]
    NoShipTypes(String),
    #[error("device '{device}' has no value for ship type {ship_type}")]
    MissingShipValue { device: String, ship_type: ShipType },
    #[error("device '{device}' does not support ship type {ship_type}")]
    ShipTypeNotSupported { device: String, ship_type: ShipType },
    #[error("device '{device}' cannot be mounted in slot {slot}")]
    UnsupportedSlot {
        device: String,
        slot: ComponentSlotKind,
    },
    #[error("unknown {kind} device '{name}'")]
    UnknownDevice { kind: ComponentKind, name: String },
    #[error(transparent)]
    InvalidName(#[from] ParseNameError),
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects device definitions before freezing them into a [`DeviceCatalog`].
#[derive(Debug, Default)]
pub struct DeviceCatalogBuilder {
    weapons: Vec<WeaponDevice>,
    utilities: Vec<UtilityDevice>,
    core_modules: Vec<CoreModule>,
}

impl DeviceCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_weapon(&mut self, weapon: WeaponDevice) -> &mut Self {
        self.weapons.push(weapon);
        self
    }

    pub fn register_utility(&mut self, utility: UtilityDevice) -> &mut Self {
        self.utilities.push(utility);
        self
    }

    pub fn register_core_module(&mut self, module: CoreModule) -> &mut Self {
        self.core_modules.push(module);
        self
    }

    /// Registers one computer system per mode the descriptor declares.
    pub fn register_computer_system(&mut self, descriptor: &ComputerSystemDescriptor) -> &mut Self {
        for system in descriptor.expand() {
            self.core_modules.push(CoreModule::ComputerSystem(system));
        }
        self
    }

    /// Validates every definition and enumerates the component list.
    pub fn build(self) -> Result<DeviceCatalog, CatalogError> {
        let mut seen = HashSet::new();
        let mut weapon_components = Vec::new();
        let mut weapons = Vec::with_capacity(self.weapons.len());
        for weapon in self.weapons {
            if !seen.insert((ComponentKind::Weapon, weapon.name.clone())) {
                return Err(CatalogError::DuplicateDevice {
                    kind: ComponentKind::Weapon,
                    name: weapon.name,
                });
            }
            if weapon.profiles.is_empty() {
                return Err(CatalogError::NoSlots(weapon.name));
            }
            let weapon = Arc::new(weapon);
            for slot in weapon.slots() {
                weapon_components.push(WeaponComponent::new(slot, Arc::clone(&weapon))?);
            }
            weapons.push(weapon);
        }

        let mut utility_components = Vec::new();
        let mut utilities = Vec::with_capacity(self.utilities.len());
        for utility in self.utilities {
            if !seen.insert((ComponentKind::Utility, utility.name.clone())) {
                return Err(CatalogError::DuplicateDevice {
                    kind: ComponentKind::Utility,
                    name: utility.name,
                });
            }
            if utility.profiles.is_empty() {
                return Err(CatalogError::NoSlots(utility.name));
            }
            let utility = Arc::new(utility);
            for slot in utility.slots() {
                utility_components.push(UtilityComponent::new(slot, Arc::clone(&utility))?);
            }
            utilities.push(utility);
        }

        let mut core_components = Vec::new();
        let mut core_modules = Vec::with_capacity(self.core_modules.len());
        for module in self.core_modules {
            let name = module.name().to_string();
            if !seen.insert((ComponentKind::Core, name.clone())) {
                return Err(CatalogError::DuplicateDevice {
                    kind: ComponentKind::Core,
                    name,
                });
            }
            if module.ships().is_empty() {
                return Err(CatalogError::NoShipTypes(name));
            }
            let module = Arc::new(module);
            for ship in module.ships() {
                core_components.push(CoreComponent::new(*ship, Arc::clone(&module))?);
            }
            core_modules.push(module);
        }

        tracing::info!(
            weapons = weapons.len(),
            utilities = utilities.len(),
            core_modules = core_modules.len(),
            components = weapon_components.len() + utility_components.len() + core_components.len(),
            "device catalog built"
        );

        Ok(DeviceCatalog {
            weapons,
            utilities,
            core_modules,
            weapon_components,
            utility_components,
            core_components,
        })
    }
}

// ---------------------------------------------------------------------------
// Frozen catalog
// ---------------------------------------------------------------------------

/// Immutable device catalog. Frozen after `build()`; safe to share across threads.
#[derive(Debug)]
pub struct DeviceCatalog {
    weapons: Vec<Arc<WeaponDevice>>,
    utilities: Vec<Arc<UtilityDevice>>,
    core_modules: Vec<Arc<CoreModule>>,
    weapon_components: Vec<WeaponComponent>,
    utility_components: Vec<UtilityComponent>,
    core_components: Vec<CoreComponent>,
}

impl DeviceCatalog {
    pub fn weapons(&self) -> &[Arc<WeaponDevice>] {
        &self.weapons
    }

    pub fn utilities(&self) -> &[Arc<UtilityDevice>] {
        &self.utilities
    }

    pub fn core_modules(&self) -> &[Arc<CoreModule>] {
        &self.core_modules
    }

    pub fn weapon_components(&self) -> &[WeaponComponent] {
        &self.weapon_components
    }

    pub fn utility_components(&self) -> &[UtilityComponent] {
        &self.utility_components
    }

    pub fn core_components(&self) -> &[CoreComponent] {
        &self.core_components
    }

    /// Every enumerated component: weapons, then utilities, then core.
    pub fn components(&self) -> impl Iterator<Item = Component> + '_ {
        self.weapon_components
            .iter()
            .cloned()
            .map(Component::from)
            .chain(self.utility_components.iter().cloned().map(Component::from))
            .chain(self.core_components.iter().cloned().map(Component::from))
    }

    /// Components that pass [`can_use_in_ship`] for `ship`.
    pub fn components_for(&self, ship: ShipType) -> Vec<Component> {
        self.components()
            .filter(|c| match c {
                // Core components are enumerated per ship type; only offer the matching one.
                Component::Core(core) => core.ship_type() == ship,
                _ => true,
            })
            .filter(|c| can_use_in_ship(c, ship))
            .collect()
    }

    pub fn weapon_component(&self, name: &str, slot: WeaponSlot) -> Option<&WeaponComponent> {
        self.weapon_components
            .iter()
            .find(|c| c.slot() == slot && c.device().name == name)
    }

    pub fn utility_component(&self, name: &str, slot: UtilitySlot) -> Option<&UtilityComponent> {
        self.utility_components
            .iter()
            .find(|c| c.slot() == slot && c.device().name == name)
    }

    pub fn core_component(&self, name: &str, ship: ShipType) -> Option<&CoreComponent> {
        self.core_components
            .iter()
            .find(|c| c.ship_type() == ship && c.device().name() == name)
    }

    /// Resolves an interchange record for a ship of type `ship`.
    pub fn resolve(
        &self,
        record: &ComponentRecord,
        ship: ShipType,
    ) -> Result<Component, CatalogError> {
        let slot = ComponentSlotKind::parse(record.component_kind, &record.slot)?;
        let unknown = || CatalogError::UnknownDevice {
            kind: record.component_kind,
            name: record.device.clone(),
        };
        let component = match slot {
            ComponentSlotKind::Weapon(slot) => self
                .weapon_component(&record.device, slot)
                .cloned()
                .map(Component::from),
            ComponentSlotKind::Utility(slot) => self
                .utility_component(&record.device, slot)
                .cloned()
                .map(Component::from),
            ComponentSlotKind::Core(slot) => self
                .core_component(&record.device, ship)
                .filter(|c| c.slot() == slot)
                .cloned()
                .map(Component::from),
        };
        component.ok_or_else(unknown)
    }

    /// Restores a design snapshot from its interchange record.
    pub fn restore_design(&self, record: &ShipDesignRecord) -> Result<ShipDesign, CatalogError> {
        let components = record
            .components
            .iter()
            .map(|c| self.resolve(c, record.ship_type))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ShipDesign::new(record.ship_type, components))
    }
}
