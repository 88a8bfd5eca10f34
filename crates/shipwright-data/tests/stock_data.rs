//! The shipped data directory must describe exactly the stock catalog.

use shipwright_core::builtin;
use shipwright_core::slot::{HullPosition, ShipType};
use shipwright_data::{GameData, load_catalogs};
use std::path::Path;

fn stock() -> GameData {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    load_catalogs(&dir).unwrap()
}

#[test]
fn schemas_match_builtin() {
    let data = stock();
    let builtin = builtin::schema_catalog().unwrap();
    assert_eq!(
        data.schemas.ship_types().collect::<Vec<_>>(),
        builtin.ship_types().collect::<Vec<_>>()
    );
    for ship in builtin.ship_types() {
        assert_eq!(data.schemas.get(ship).unwrap(), builtin.get(ship).unwrap());
    }
}

#[test]
fn devices_match_builtin() {
    let data = stock();
    let builtin = builtin::device_catalog().unwrap();
    assert_eq!(data.devices.weapons(), builtin.weapons());
    assert_eq!(data.devices.utilities(), builtin.utilities());
    assert_eq!(data.devices.core_modules(), builtin.core_modules());
    assert_eq!(data.devices.weapon_components(), builtin.weapon_components());
    assert_eq!(data.devices.utility_components(), builtin.utility_components());
    assert_eq!(data.devices.core_components(), builtin.core_components());
}

#[test]
fn segment_patterns_keep_file_order() {
    let data = stock();
    assert_eq!(
        data.schemas.get(ShipType::Destroyer).unwrap().pattern_names(HullPosition::Bow),
        vec!["artillery", "gunship", "picket-ship"]
    );
}

#[test]
fn computer_system_expands_per_mode() {
    let data = stock();
    let names: Vec<_> = data
        .devices
        .core_modules()
        .iter()
        .map(|m| m.name().to_string())
        .filter(|n| n.starts_with("basic"))
        .collect();
    assert_eq!(
        names,
        vec![
            "basic (swarm)",
            "basic (torpedo)",
            "basic (picket)",
            "basic (line)",
            "basic (artillery)",
            "basic (carrier)",
        ]
    );
    assert!(data
        .devices
        .core_component("basic (swarm)", ShipType::Corvette)
        .is_some());
    assert!(data
        .devices
        .core_component("basic (swarm)", ShipType::Destroyer)
        .is_none());
}
