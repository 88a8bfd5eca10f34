//! The stock catalog: corvette and destroyer hulls and the devices that
//! ship with the game.
//!
//! Everything here is plain data. Shells that load their own catalogs from
//! files (see the `shipwright-data` crate) never need this module, but it
//! gives tests, benches and quick experiments a complete, valid catalog.

use crate::catalog::{CatalogError, DeviceCatalog, DeviceCatalogBuilder};
use crate::device::{
    ComputerSystemDescriptor, ComputerSystemMode, CoreModule, Damage, DamageRange, FtlDrive,
    IgnoreModifiers, Range, Reactor, Sensors, SublightThruster, UtilityDevice, UtilityProfile,
    WeaponDevice, WeaponKind, WeaponModifiers, WeaponProfile,
};
use crate::registry::{SchemaCatalog, SchemaCatalogBuilder};
use crate::resource::{Cost, Resource};
use crate::schema::{SegmentSchema, ShipSchema, UpkeepRule};
use crate::slot::{CoreSlot, HullPosition, ShipType, UtilitySlot, WeaponSlot};
use crate::stats::ShipModifiers;
use std::collections::BTreeMap;

fn alloy(n: f64) -> Cost {
    Cost::from([(Resource::Alloy, n)])
}

const STANDARD_CORE_SLOTS: [CoreSlot; 5] = [
    CoreSlot::FtlDrive,
    CoreSlot::Reactor,
    CoreSlot::ComputerSystem,
    CoreSlot::Sensors,
    CoreSlot::Thrusters,
];

// ---------------------------------------------------------------------------
// Hulls
// ---------------------------------------------------------------------------

pub fn corvette_schema() -> ShipSchema {
    let ship = ShipType::Corvette;
    let core = vec![
        SegmentSchema::new(ship, "picket-ship")
            .with_weapons(WeaponSlot::Small, 2)
            .with_weapons(WeaponSlot::PointDefense, 1)
            .with_utilities(UtilitySlot::Small, 3)
            .with_utilities(UtilitySlot::Auxiliary, 1),
        SegmentSchema::new(ship, "interceptor")
            .with_weapons(WeaponSlot::Small, 3)
            .with_utilities(UtilitySlot::Small, 3)
            .with_utilities(UtilitySlot::Auxiliary, 1),
    ];
    ShipSchema {
        ship_type: ship,
        segment_options: BTreeMap::from([(HullPosition::Core, core)]),
        core_slots: STANDARD_CORE_SLOTS.to_vec(),
        base_cost: alloy(30.0),
        base_hull: 200.0,
        base_evasion: 0.6,
        base_speed: 160.0,
        base_disengagement_chance: 1.0,
        upkeep: UpkeepRule::default(),
    }
}

pub fn destroyer_schema() -> ShipSchema {
    let ship = ShipType::Destroyer;
    let bow = vec![
        SegmentSchema::new(ship, "artillery")
            .with_weapons(WeaponSlot::Large, 1)
            .with_utilities(UtilitySlot::Small, 6),
        SegmentSchema::new(ship, "gunship")
            .with_weapons(WeaponSlot::Small, 2)
            .with_weapons(WeaponSlot::Medium, 1)
            .with_utilities(UtilitySlot::Small, 6),
        SegmentSchema::new(ship, "picket-ship")
            .with_weapons(WeaponSlot::Small, 2)
            .with_weapons(WeaponSlot::PointDefense, 1)
            .with_utilities(UtilitySlot::Small, 6),
    ];
    let stern = vec![
        SegmentSchema::new(ship, "gunship")
            .with_weapons(WeaponSlot::Medium, 1)
            .with_utilities(UtilitySlot::Auxiliary, 1),
        SegmentSchema::new(ship, "interceptor")
            .with_weapons(WeaponSlot::Small, 2)
            .with_utilities(UtilitySlot::Auxiliary, 2),
        SegmentSchema::new(ship, "picket-ship")
            .with_weapons(WeaponSlot::PointDefense, 2)
            .with_utilities(UtilitySlot::Auxiliary, 1),
    ];
    ShipSchema {
        ship_type: ship,
        segment_options: BTreeMap::from([(HullPosition::Bow, bow), (HullPosition::Stern, stern)]),
        core_slots: STANDARD_CORE_SLOTS.to_vec(),
        base_cost: alloy(60.0),
        base_hull: 600.0,
        base_evasion: 0.2,
        base_speed: 120.0,
        base_disengagement_chance: 1.5,
        upkeep: UpkeepRule::default(),
    }
}

/// Corvette and destroyer schemas, frozen.
pub fn schema_catalog() -> Result<SchemaCatalog, CatalogError> {
    let mut builder = SchemaCatalogBuilder::new();
    builder.register(corvette_schema()).register(destroyer_schema());
    builder.build()
}

// ---------------------------------------------------------------------------
// Weapons
// ---------------------------------------------------------------------------

fn profile(cost: f64, power: f64, low: f64, high: f64, tracking: f64, cool_down: f64, max_range: f64) -> WeaponProfile {
    WeaponProfile {
        cost: alloy(cost),
        power,
        damage: Damage {
            damage: DamageRange { low, high },
            tracking,
            cool_down,
            range: Range {
                min: 0.0,
                max: max_range,
            },
        },
    }
}

pub fn red_laser() -> WeaponDevice {
    WeaponDevice {
        name: "red-laser".to_string(),
        kind: WeaponKind::AntiArmor,
        sub_kind: Some("laser".to_string()),
        modifiers: WeaponModifiers {
            accuracy: 0.9,
            hull: 1.25,
            armor: 1.5,
            shield: 0.5,
            ignore: None,
        },
        profiles: BTreeMap::from([
            (WeaponSlot::Small, profile(10.0, 5.0, 6.0, 16.0, 0.5, 4.25, 40.0)),
            (WeaponSlot::Medium, profile(20.0, 13.0, 15.0, 50.0, 0.3, 5.0, 60.0)),
            (WeaponSlot::Large, profile(40.0, 30.0, 36.0, 96.0, 0.05, 5.7, 80.0)),
        ]),
        upkeep: Cost::new(),
        provided_modifiers: None,
    }
}

fn point_defense(name: &str, cost: f64, power: f64, low: f64, high: f64, tracking: f64) -> WeaponDevice {
    WeaponDevice {
        name: format!("{name} point-defense"),
        kind: WeaponKind::PointDefense,
        sub_kind: None,
        modifiers: WeaponModifiers {
            accuracy: 0.75,
            hull: 1.0,
            armor: 2.0,
            shield: 0.25,
            ignore: Some(IgnoreModifiers {
                armor: Some(0.25),
                ..Default::default()
            }),
        },
        profiles: BTreeMap::from([(
            WeaponSlot::PointDefense,
            profile(cost, power, low, high, tracking, 0.5, 30.0),
        )]),
        upkeep: Cost::new(),
        provided_modifiers: None,
    }
}

/// Sentinel, barrier and guardian point-defense, weakest first.
pub fn point_defense_weapons() -> Vec<WeaponDevice> {
    vec![
        point_defense("sentinel", 8.0, 5.0, 2.0, 4.0, 0.1),
        point_defense("barrier", 10.0, 7.0, 3.0, 6.0, 0.2),
        point_defense("guardian", 13.0, 10.0, 4.0, 8.0, 0.3),
    ]
}

pub fn weapons() -> Vec<WeaponDevice> {
    let mut weapons = vec![red_laser()];
    weapons.extend(point_defense_weapons());
    weapons
}

// ---------------------------------------------------------------------------
// Utilities
// ---------------------------------------------------------------------------

/// Armor plating: small, medium and large sizes.
pub fn nanocomposite_plating() -> UtilityDevice {
    let size = |cost: f64, armor: f64, power: f64| UtilityProfile {
        cost: alloy(cost),
        power,
        armor,
        ..Default::default()
    };
    UtilityDevice {
        name: "nanocomposite-plating".to_string(),
        profiles: BTreeMap::from([
            (UtilitySlot::Small, size(8.0, 40.0, 2.0)),
            (UtilitySlot::Medium, size(16.0, 80.0, 4.0)),
            (UtilitySlot::Large, size(32.0, 160.0, 8.0)),
        ]),
        upkeep: Cost::new(),
        provided_modifiers: None,
    }
}

/// Shield generator. Draws energy upkeep on top of its build cost.
pub fn deflector() -> UtilityDevice {
    let size = |cost: f64, shield: f64, regen: f64, power: f64| UtilityProfile {
        cost: alloy(cost),
        power,
        shield,
        shield_regen: regen,
        ..Default::default()
    };
    UtilityDevice {
        name: "deflector".to_string(),
        profiles: BTreeMap::from([
            (UtilitySlot::Small, size(12.0, 48.0, 1.0, 10.0)),
            (UtilitySlot::Medium, size(24.0, 96.0, 2.0, 20.0)),
            (UtilitySlot::Large, size(48.0, 192.0, 4.0, 40.0)),
        ]),
        upkeep: Cost::from([(Resource::Energy, 0.5)]),
        provided_modifiers: None,
    }
}

pub fn auxiliary_fire_control() -> UtilityDevice {
    UtilityDevice {
        name: "auxiliary-fire-control".to_string(),
        profiles: BTreeMap::from([(
            UtilitySlot::Auxiliary,
            UtilityProfile {
                cost: alloy(15.0),
                power: 5.0,
                ..Default::default()
            },
        )]),
        upkeep: Cost::new(),
        provided_modifiers: Some(ShipModifiers {
            tracking: Some(0.05),
            ..Default::default()
        }),
    }
}

pub fn utilities() -> Vec<UtilityDevice> {
    vec![nanocomposite_plating(), deflector(), auxiliary_fire_control()]
}

// ---------------------------------------------------------------------------
// Core modules
// ---------------------------------------------------------------------------

fn per_ship<T: Clone>(values: [T; 7]) -> BTreeMap<ShipType, T> {
    ShipType::ALL.into_iter().zip(values).collect()
}

pub fn fission_reactor() -> CoreModule {
    CoreModule::Reactor(Reactor {
        name: "fission reactor".to_string(),
        ships: ShipType::ALL.to_vec(),
        cost: per_ship([10.0, 10.0, 20.0, 40.0, 80.0, 160.0, 560.0].map(alloy)),
        power: per_ship([75.0, 75.0, 140.0, 280.0, 550.0, 1100.0, 3850.0]),
    })
}

pub fn fusion_reactor() -> CoreModule {
    CoreModule::Reactor(Reactor {
        name: "fusion reactor".to_string(),
        ships: ShipType::ALL.to_vec(),
        cost: per_ship([13.0, 13.0, 26.0, 52.0, 104.0, 208.0, 730.0].map(alloy)),
        power: per_ship([100.0, 100.0, 180.0, 360.0, 720.0, 1450.0, 5000.0]),
    })
}

fn ftl_drive(name: &str, cost: f64, power: f64, disengagement_opportunities: u32) -> CoreModule {
    CoreModule::FtlDrive(FtlDrive {
        name: name.to_string(),
        ships: ShipType::ALL.to_vec(),
        cost: alloy(cost),
        power,
        disengagement_opportunities,
        hyper_jump: true,
    })
}

pub fn ftl_drives() -> Vec<CoreModule> {
    vec![
        ftl_drive("hyper drive I", 5.0, 10.0, 1),
        ftl_drive("hyper drive II", 10.0, 15.0, 1),
        ftl_drive("hyper drive III", 15.0, 20.0, 1),
        ftl_drive("jump drive", 20.0, 30.0, 1),
        ftl_drive("psi jump drive", 20.0, 30.0, 2),
    ]
}

/// Free, non-configurable computer with no effects in any mode.
pub fn basic_computer_system() -> ComputerSystemDescriptor {
    ComputerSystemDescriptor {
        name: "basic".to_string(),
        cost: Cost::new(),
        power: 5.0,
        configurable: false,
        effects: ComputerSystemMode::ALL
            .into_iter()
            .map(|mode| (mode, ShipModifiers::default()))
            .collect(),
    }
}

pub fn chemical_thrusters() -> CoreModule {
    CoreModule::Thrusters(SublightThruster::tier("chemical-thrusters", alloy(3.0), 10.0, 0.0, 1.0))
}

pub fn sublight_thrusters() -> Vec<CoreModule> {
    let dark_matter = Cost::from([(Resource::Alloy, 12.0), (Resource::DarkMatter, 1.0)]);
    vec![
        chemical_thrusters(),
        CoreModule::Thrusters(SublightThruster::tier("ion-thrusters", alloy(6.0), 15.0, 1.0, 1.25)),
        CoreModule::Thrusters(SublightThruster::tier("plasma-thrusters", alloy(9.0), 20.0, 2.0, 1.5)),
        CoreModule::Thrusters(SublightThruster::tier("impulse-thrusters", alloy(12.0), 25.0, 3.0, 1.75)),
        CoreModule::Thrusters(SublightThruster::tier("dark-matter-thrusters", dark_matter, 30.0, 4.0, 2.25)),
    ]
}

pub fn sensors() -> Vec<CoreModule> {
    let sensor = |name: &str, cost: f64, power: f64, tracking: f64| {
        CoreModule::Sensors(Sensors {
            name: name.to_string(),
            ships: ShipType::ALL.to_vec(),
            cost: alloy(cost),
            power,
            tracking,
        })
    };
    vec![
        sensor("radar", 3.0, 5.0, 0.0),
        sensor("gravitic sensors", 6.0, 10.0, 0.05),
        sensor("subspace sensors", 9.0, 15.0, 0.1),
    ]
}

/// Reactors, FTL drives, thrusters and sensors. Computer systems are
/// registered from their descriptor instead.
pub fn core_modules() -> Vec<CoreModule> {
    let mut modules = vec![fission_reactor(), fusion_reactor()];
    modules.extend(ftl_drives());
    modules.extend(sublight_thrusters());
    modules.extend(sensors());
    modules
}

/// Every stock device, frozen.
pub fn device_catalog() -> Result<DeviceCatalog, CatalogError> {
    let mut builder = DeviceCatalogBuilder::new();
    for weapon in weapons() {
        builder.register_weapon(weapon);
    }
    for utility in utilities() {
        builder.register_utility(utility);
    }
    for module in core_modules() {
        builder.register_core_module(module);
    }
    builder.register_computer_system(&basic_computer_system());
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_catalogs_build() {
        let schemas = schema_catalog().unwrap();
        assert_eq!(schemas.len(), 2);
        let devices = device_catalog().unwrap();
        // red-laser in three sizes plus three point-defense weapons
        assert_eq!(devices.weapon_components().len(), 6);
        assert_eq!(devices.utility_components().len(), 7);
    }

    #[test]
    fn dark_matter_thrusters_scale_both_resources() {
        let thrusters = &sublight_thrusters()[4];
        let cost = thrusters.cost_for(ShipType::Cruiser).unwrap();
        assert_eq!(cost.get(Resource::Alloy), 48.0);
        assert_eq!(cost.get(Resource::DarkMatter), 4.0);
        assert_eq!(thrusters.power_for(ShipType::Titan), Some(-480.0));
        assert!(thrusters.cost_for(ShipType::Juggernaut).is_none());
    }

    #[test]
    fn reactor_tables_cover_every_ship() {
        for reactor in [fission_reactor(), fusion_reactor()] {
            for ship in ShipType::ALL {
                assert!(reactor.cost_for(ship).is_some());
                assert!(reactor.power_for(ship).unwrap() > 0.0);
            }
        }
        assert_eq!(fusion_reactor().power_for(ShipType::Juggernaut), Some(5000.0));
    }

    #[test]
    fn psi_jump_drive_has_two_disengagement_opportunities() {
        let drives = ftl_drives();
        match &drives[4] {
            CoreModule::FtlDrive(d) => {
                assert_eq!(d.name, "psi jump drive");
                assert_eq!(d.disengagement_opportunities, 2);
            }
            other => panic!("expected ftl drive, got: {other:?}"),
        }
    }

    #[test]
    fn every_hull_offers_some_pattern() {
        for schema in [corvette_schema(), destroyer_schema()] {
            assert!(schema.positions().count() > 0);
            for position in schema.positions() {
                assert!(!schema.patterns(position).is_empty());
            }
        }
    }
}
