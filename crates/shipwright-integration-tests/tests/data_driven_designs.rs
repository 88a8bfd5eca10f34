//! Cross-crate tests: catalogs loaded from the shipped data files drive the
//! design builder the same way the in-code stock catalog does.

use shipwright_core::builder::ShipDesignBuilder;
use shipwright_core::builtin;
use shipwright_core::catalog::{CatalogError, DeviceCatalog};
use shipwright_core::design::ShipDesignRecord;
use shipwright_core::error::DesignError;
use shipwright_core::registry::SchemaCatalog;
use shipwright_core::resource::Resource;
use shipwright_core::slot::{ComponentKind, HullPosition, ShipType, UtilitySlot, WeaponSlot};
use shipwright_data::{GameData, load_catalogs};
use std::path::Path;

fn loaded() -> GameData {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../shipwright-data/data");
    load_catalogs(&dir).unwrap()
}

/// Corvette interceptor: three lasers, three plates, aux fire control,
/// and a full core.
fn fitted_corvette(schemas: &SchemaCatalog, devices: &DeviceCatalog) -> ShipDesignBuilder {
    let ship = ShipType::Corvette;
    let mut builder = schemas.builder(ship).unwrap();
    let laser = devices.weapon_component("red-laser", WeaponSlot::Small).unwrap();
    let plate = devices
        .utility_component("nanocomposite-plating", UtilitySlot::Small)
        .unwrap();
    let aux = devices
        .utility_component("auxiliary-fire-control", UtilitySlot::Auxiliary)
        .unwrap();

    let core = builder
        .select_segment(HullPosition::Core, "interceptor")
        .unwrap();
    for i in 0..3 {
        core.set_weapon_component(laser.clone(), i).unwrap();
        core.set_utility_component(plate.clone(), i).unwrap();
    }
    core.set_utility_component(aux.clone(), 0).unwrap();

    for name in [
        "fission reactor",
        "hyper drive I",
        "basic (swarm)",
        "chemical-thrusters",
        "radar",
    ] {
        let component = devices.core_component(name, ship).unwrap().clone();
        builder.set_core_component(component).unwrap();
    }
    builder
}

#[test]
fn loaded_and_builtin_catalogs_give_same_design() {
    let data = loaded();
    let from_files = fitted_corvette(&data.schemas, &data.devices);
    let from_code = fitted_corvette(
        &builtin::schema_catalog().unwrap(),
        &builtin::device_catalog().unwrap(),
    );

    assert_eq!(from_files.build(), from_code.build());
    assert_eq!(from_files.summary(), from_code.summary());
    assert_eq!(from_files.modifiers(), from_code.modifiers());
    assert_eq!(from_files.upkeep(), from_code.upkeep());
}

#[test]
fn fitted_corvette_totals() {
    let data = loaded();
    let builder = fitted_corvette(&data.schemas, &data.devices);

    assert!(builder.open_core_slots().is_empty());
    assert!(builder.incompatible_components().is_empty());
    assert_eq!(builder.components().len(), 12);

    let summary = builder.summary();
    assert_eq!(summary.armor, 120.0);
    assert_eq!(summary.hull, 200.0);
    // 75 reactor - 15 lasers - 6 plates - 5 aux - 10 drive - 5 computer - 10 thrusters - 5 radar
    assert!((summary.power - 19.0).abs() < 1e-9);

    let modifiers = builder.modifiers();
    assert_eq!(modifiers.tracking, Some(0.05));
    assert_eq!(modifiers.sublight_speed, Some(1.0));
    assert_eq!(modifiers.combat_disengagement_chance, Some(1.0));
    assert_eq!(builder.build_cost().get(Resource::Alloy), 30.0);
}

#[test]
fn json_record_restores_against_either_catalog() {
    let data = loaded();
    let design = fitted_corvette(&data.schemas, &data.devices).build();
    let json = design.to_json().unwrap();
    let record = ShipDesignRecord::from_json(&json).unwrap();

    assert_eq!(data.devices.restore_design(&record).unwrap(), design);
    let builtin_devices = builtin::device_catalog().unwrap();
    assert_eq!(builtin_devices.restore_design(&record).unwrap(), design);
}

#[test]
fn record_naming_an_unknown_device_fails() {
    let data = loaded();
    let json = r#"{"shipType":"corvette","components":[{"componentKind":"weapon","slot":"small","device":"blue-laser"}]}"#;
    let record = ShipDesignRecord::from_json(json).unwrap();
    match data.devices.restore_design(&record) {
        Err(CatalogError::UnknownDevice { kind, name }) => {
            assert_eq!(kind, ComponentKind::Weapon);
            assert_eq!(name, "blue-laser");
        }
        other => panic!("expected UnknownDevice, got: {other:?}"),
    }
}

#[test]
fn destroyer_patterns_from_files_reject_wrong_sizes() {
    let data = loaded();
    let mut builder = data.schemas.builder(ShipType::Destroyer).unwrap();
    let large = data
        .devices
        .weapon_component("red-laser", WeaponSlot::Large)
        .unwrap()
        .clone();

    let bow = builder.select_segment(HullPosition::Bow, "gunship").unwrap();
    assert!(matches!(
        bow.set_weapon_component(large.clone(), 0),
        Err(DesignError::SlotNotFound { .. })
    ));

    let bow = builder
        .select_segment(HullPosition::Bow, "artillery")
        .unwrap();
    assert_eq!(bow.set_weapon_component(large, 0), Ok(None));
    assert_eq!(builder.components().len(), 1);
    assert!(matches!(
        builder.select_segment(HullPosition::Core, "gunship"),
        Err(DesignError::PositionNotAvailable { .. })
    ));
}

#[test]
fn design_json_shape_is_stable() {
    let data = loaded();
    let design = fitted_corvette(&data.schemas, &data.devices).build();
    let value: serde_json::Value = serde_json::from_str(&design.to_json().unwrap()).unwrap();
    assert_eq!(value["shipType"], "corvette");
    let components = value["components"].as_array().unwrap();
    assert_eq!(components.len(), 12);
    assert!(components.iter().any(|c| {
        c["componentKind"] == "core" && c["slot"] == "computer-system" && c["device"] == "basic (swarm)"
    }));
}
