//! Resolution pipeline: reads data files, resolves names, builds catalogs.
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and deserialization
//! helpers, plus [`load_catalogs`], which turns a data directory into frozen
//! device and schema catalogs.

use serde::de::DeserializeOwned;
use shipwright_core::catalog::{CatalogError, DeviceCatalog, DeviceCatalogBuilder};
use shipwright_core::device::{
    ComputerSystemDescriptor, ComputerSystemMode, CoreModule, FtlDrive, Reactor, Sensors,
    SublightThruster, UtilityDevice, UtilityProfile, WeaponDevice, WeaponKind, WeaponProfile,
};
use shipwright_core::registry::{SchemaCatalog, SchemaCatalogBuilder};
use shipwright_core::resource::{Cost, Resource};
use shipwright_core::schema::{SegmentSchema, ShipSchema, UpkeepRule};
use shipwright_core::slot::{
    CoreSlot, HullPosition, ParseNameError, ShipType, SlotCount, UtilitySlot, WeaponSlot,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::schema::*;

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A name did not match any known value of its kind.
    #[error("unresolved {expected_kind} reference '{name}' in {file}")]
    UnresolvedRef {
        file: PathBuf,
        name: String,
        expected_kind: &'static str,
    },

    /// A duplicate name was found.
    #[error("duplicate name '{name}' in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// The resolved definitions were rejected when the catalog was frozen.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name (without extension).
///
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// more than one format exists for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in ["ron", "toml", "json"] {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn parse_error(path: &Path, e: impl std::fmt::Display) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: e.to_string(),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(path, e)),
    }
}

/// Deserialize a list from a file. For TOML files, extracts the array at the
/// given `toml_key` from a top-level table. For RON and JSON, deserializes
/// directly as `Vec<T>`.
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    match detect_format(path)? {
        Format::Ron | Format::Json => deserialize_file(path),
        Format::Toml => {
            let mut table: toml::Table = deserialize_file(path)?;
            let array = table.remove(toml_key).ok_or_else(|| {
                parse_error(path, format!("missing key '{toml_key}' in TOML file"))
            })?;
            array
                .try_into()
                .map_err(|e: toml::de::Error| parse_error(path, e))
        }
    }
}

// ===========================================================================
// Name resolution helpers
// ===========================================================================

/// Look up a name in a map, returning an `UnresolvedRef` error if not found.
pub fn resolve_name<'a, V>(
    map: &'a HashMap<String, V>,
    name: &str,
    file: &Path,
    expected_kind: &'static str,
) -> Result<&'a V, DataLoadError> {
    map.get(name).ok_or_else(|| DataLoadError::UnresolvedRef {
        file: file.to_path_buf(),
        name: name.to_string(),
        expected_kind,
    })
}

/// Check whether a name already exists in a map, returning a `DuplicateName`
/// error if so.
pub fn check_duplicate<V>(
    map: &HashMap<String, V>,
    name: &str,
    file: &Path,
) -> Result<(), DataLoadError> {
    if map.contains_key(name) {
        Err(DataLoadError::DuplicateName {
            file: file.to_path_buf(),
            name: name.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Parse a kebab-case engine name (ship type, slot kind, resource, ...).
pub fn parse_name<T>(name: &str, file: &Path) -> Result<T, DataLoadError>
where
    T: FromStr<Err = ParseNameError>,
{
    name.parse().map_err(|e: ParseNameError| DataLoadError::UnresolvedRef {
        file: file.to_path_buf(),
        name: e.name,
        expected_kind: e.expected,
    })
}

fn resolve_cost(data: &CostData, file: &Path) -> Result<Cost, DataLoadError> {
    data.iter()
        .map(|(name, quantity)| Ok::<_, DataLoadError>((parse_name::<Resource>(name, file)?, *quantity)))
        .collect()
}

fn resolve_ships(names: &[String], file: &Path) -> Result<Vec<ShipType>, DataLoadError> {
    if names.is_empty() {
        return Ok(ShipType::ALL.to_vec());
    }
    names.iter().map(|n| parse_name(n, file)).collect()
}

fn resolve_slot_count<K>(
    data: &BTreeMap<String, usize>,
    file: &Path,
) -> Result<SlotCount<K>, DataLoadError>
where
    K: FromStr<Err = ParseNameError> + Ord,
{
    data.iter()
        .map(|(name, count)| Ok::<_, DataLoadError>((parse_name::<K>(name, file)?, *count)))
        .collect()
}

// ===========================================================================
// Resolution
// ===========================================================================

/// Frozen catalogs produced from a data directory.
#[derive(Debug)]
pub struct GameData {
    pub devices: DeviceCatalog,
    pub schemas: SchemaCatalog,
}

/// Load every catalog file from `dir`.
///
/// Required: `ships`, `segments`, `weapons`. Optional: `utilities`,
/// `core_modules`. Each may be `.ron`, `.json` or `.toml`.
pub fn load_catalogs(dir: &Path) -> Result<GameData, DataLoadError> {
    let schemas = load_schemas(
        &require_data_file(dir, "ships")?,
        &require_data_file(dir, "segments")?,
    )?;

    let mut devices = DeviceCatalogBuilder::new();
    load_weapons(&require_data_file(dir, "weapons")?, &mut devices)?;
    if let Some(path) = find_data_file(dir, "utilities")? {
        load_utilities(&path, &mut devices)?;
    }
    if let Some(path) = find_data_file(dir, "core_modules")? {
        load_core_modules(&path, &mut devices)?;
    }

    Ok(GameData {
        devices: devices.build()?,
        schemas,
    })
}

pub(crate) fn load_schemas(
    ships_path: &Path,
    segments_path: &Path,
) -> Result<SchemaCatalog, DataLoadError> {
    let ships: Vec<ShipData> = deserialize_list(ships_path, "ships")?;
    let segments: Vec<SegmentData> = deserialize_list(segments_path, "segments")?;
    tracing::debug!(file = %ships_path.display(), ships = ships.len(), "loaded ship data");
    tracing::debug!(file = %segments_path.display(), segments = segments.len(), "loaded segment data");

    // Ship type name -> index into `schemas`, in file order.
    let mut declared: HashMap<String, usize> = HashMap::new();
    let mut schemas = Vec::with_capacity(ships.len());
    for ship in &ships {
        check_duplicate(&declared, &ship.ship_type, ships_path)?;
        let ship_type: ShipType = parse_name(&ship.ship_type, ships_path)?;
        let core_slots = ship
            .core_slots
            .iter()
            .map(|s| parse_name::<CoreSlot>(s, ships_path))
            .collect::<Result<Vec<_>, _>>()?;
        let upkeep = match &ship.upkeep {
            None => UpkeepRule::default(),
            Some(UpkeepData::Proportional {
                energy_rate,
                alloy_rate,
            }) => UpkeepRule::Proportional {
                energy_rate: *energy_rate,
                alloy_rate: *alloy_rate,
            },
            Some(UpkeepData::Flat(cost)) => UpkeepRule::Flat(resolve_cost(cost, ships_path)?),
        };
        declared.insert(ship.ship_type.clone(), schemas.len());
        schemas.push(ShipSchema {
            ship_type,
            segment_options: BTreeMap::new(),
            core_slots,
            base_cost: resolve_cost(&ship.base_cost, ships_path)?,
            base_hull: ship.hull,
            base_evasion: ship.evasion,
            base_speed: ship.speed,
            base_disengagement_chance: ship.disengagement_chance,
            upkeep,
        });
    }

    for segment in &segments {
        let index = *resolve_name(&declared, &segment.ship_type, segments_path, "ship")?;
        let schema = &mut schemas[index];
        let position: HullPosition = parse_name(&segment.position, segments_path)?;
        let mut pattern = SegmentSchema::new(schema.ship_type, &segment.name);
        pattern.weapon_slots = resolve_slot_count::<WeaponSlot>(&segment.weapons, segments_path)?;
        pattern.utility_slots = resolve_slot_count::<UtilitySlot>(&segment.utilities, segments_path)?;
        schema.segment_options.entry(position).or_default().push(pattern);
    }

    let mut builder = SchemaCatalogBuilder::new();
    for schema in schemas {
        builder.register(schema);
    }
    Ok(builder.build()?)
}

pub(crate) fn load_weapons(
    path: &Path,
    devices: &mut DeviceCatalogBuilder,
) -> Result<(), DataLoadError> {
    let weapons: Vec<WeaponData> = deserialize_list(path, "weapons")?;
    tracing::debug!(file = %path.display(), weapons = weapons.len(), "loaded weapon data");

    let mut seen = HashSet::new();
    for weapon in weapons {
        if !seen.insert(weapon.name.clone()) {
            return Err(DataLoadError::DuplicateName {
                file: path.to_path_buf(),
                name: weapon.name,
            });
        }
        let profiles = weapon
            .sizes
            .iter()
            .map(|size| {
                let slot: WeaponSlot = parse_name(&size.slot, path)?;
                let profile = WeaponProfile {
                    cost: resolve_cost(&size.cost, path)?,
                    power: size.power,
                    damage: size.damage,
                };
                Ok((slot, profile))
            })
            .collect::<Result<BTreeMap<_, _>, DataLoadError>>()?;
        devices.register_weapon(WeaponDevice {
            kind: parse_name::<WeaponKind>(&weapon.kind, path)?,
            upkeep: resolve_cost(&weapon.upkeep, path)?,
            name: weapon.name,
            sub_kind: weapon.sub_kind,
            modifiers: weapon.modifiers,
            profiles,
            provided_modifiers: weapon.provided_modifiers,
        });
    }
    Ok(())
}

pub(crate) fn load_utilities(
    path: &Path,
    devices: &mut DeviceCatalogBuilder,
) -> Result<(), DataLoadError> {
    let utilities: Vec<UtilityData> = deserialize_list(path, "utilities")?;
    tracing::debug!(file = %path.display(), utilities = utilities.len(), "loaded utility data");

    let mut seen = HashSet::new();
    for utility in utilities {
        if !seen.insert(utility.name.clone()) {
            return Err(DataLoadError::DuplicateName {
                file: path.to_path_buf(),
                name: utility.name,
            });
        }
        let profiles = utility
            .sizes
            .iter()
            .map(|size| {
                let slot: UtilitySlot = parse_name(&size.slot, path)?;
                let profile = UtilityProfile {
                    cost: resolve_cost(&size.cost, path)?,
                    power: size.power,
                    armor: size.armor,
                    armor_regen: size.armor_regen,
                    shield: size.shield,
                    shield_regen: size.shield_regen,
                    hull: size.hull,
                    hull_regen: size.hull_regen,
                };
                Ok((slot, profile))
            })
            .collect::<Result<BTreeMap<_, _>, DataLoadError>>()?;
        devices.register_utility(UtilityDevice {
            upkeep: resolve_cost(&utility.upkeep, path)?,
            name: utility.name,
            profiles,
            provided_modifiers: utility.provided_modifiers,
        });
    }
    Ok(())
}

pub(crate) fn load_core_modules(
    path: &Path,
    devices: &mut DeviceCatalogBuilder,
) -> Result<(), DataLoadError> {
    let data: CoreModulesData = deserialize_file(path)?;
    tracing::debug!(
        file = %path.display(),
        reactors = data.reactors.len(),
        ftl_drives = data.ftl_drives.len(),
        computer_systems = data.computer_systems.len(),
        thrusters = data.thrusters.len(),
        sensors = data.sensors.len(),
        "loaded core module data"
    );

    for reactor in &data.reactors {
        let mut ships = Vec::with_capacity(reactor.per_ship.len());
        let mut cost = BTreeMap::new();
        let mut power = BTreeMap::new();
        for entry in &reactor.per_ship {
            let ship: ShipType = parse_name(&entry.ship_type, path)?;
            ships.push(ship);
            cost.insert(ship, resolve_cost(&entry.cost, path)?);
            power.insert(ship, entry.power);
        }
        devices.register_core_module(CoreModule::Reactor(Reactor {
            name: reactor.name.clone(),
            ships,
            cost,
            power,
        }));
    }

    for drive in &data.ftl_drives {
        devices.register_core_module(CoreModule::FtlDrive(FtlDrive {
            name: drive.name.clone(),
            ships: resolve_ships(&drive.ships, path)?,
            cost: resolve_cost(&drive.cost, path)?,
            power: drive.power,
            disengagement_opportunities: drive.disengagement_opportunities,
            hyper_jump: drive.hyper_jump,
        }));
    }

    for thruster in &data.thrusters {
        devices.register_core_module(CoreModule::Thrusters(SublightThruster::tier(
            &thruster.name,
            resolve_cost(&thruster.cost_per_size, path)?,
            thruster.power_per_size,
            thruster.evasion_per_level,
            thruster.sublight_speed,
        )));
    }

    for sensor in &data.sensors {
        devices.register_core_module(CoreModule::Sensors(Sensors {
            name: sensor.name.clone(),
            ships: resolve_ships(&sensor.ships, path)?,
            cost: resolve_cost(&sensor.cost, path)?,
            power: sensor.power,
            tracking: sensor.tracking,
        }));
    }

    for system in &data.computer_systems {
        let effects = system
            .modes
            .iter()
            .map(|m| Ok((parse_name::<ComputerSystemMode>(&m.mode, path)?, m.modifiers)))
            .collect::<Result<BTreeMap<_, _>, DataLoadError>>()?;
        devices.register_computer_system(&ComputerSystemDescriptor {
            name: system.name.clone(),
            cost: resolve_cost(&system.cost, path)?,
            power: system.power,
            configurable: system.configurable,
            effects,
        });
    }
    Ok(())
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "shipwright_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    const SHIPS_RON: &str = r#"[
        (
            ship_type: "corvette",
            base_cost: {"alloy": 30.0},
            hull: 200.0,
            evasion: 0.6,
            speed: 160.0,
            disengagement_chance: 1.0,
            core_slots: ["ftl-drive", "reactor", "computer-system", "sensors", "thrusters"],
        ),
    ]"#;

    const SEGMENTS_JSON: &str = r#"[
        {"ship_type": "corvette", "position": "core", "name": "picket-ship",
         "weapons": {"small": 2, "point-defense": 1},
         "utilities": {"small": 3, "auxiliary": 1}},
        {"ship_type": "corvette", "position": "core", "name": "interceptor",
         "weapons": {"small": 3},
         "utilities": {"small": 3, "auxiliary": 1}}
    ]"#;

    const WEAPONS_TOML: &str = r#"
[[weapons]]
name = "red-laser"
kind = "anti-armor"
sub_kind = "laser"
modifiers = { accuracy = 0.9, hull = 1.25, armor = 1.5, shield = 0.5 }

[[weapons.sizes]]
slot = "small"
cost = { alloy = 10.0 }
power = 5.0
damage = { damage = { low = 6.0, high = 16.0 }, tracking = 0.5, coolDown = 4.25, range = { min = 0.0, max = 40.0 } }
"#;

    // -----------------------------------------------------------------------
    // detect_format / find_data_file
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("ships.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("ships.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("ships.json")).unwrap(), Format::Json);
        assert!(matches!(
            detect_format(Path::new("ships.yaml")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            detect_format(Path::new("ships")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn find_data_file_found_and_missing() {
        let dir = make_test_dir("find");
        fs::write(dir.join("weapons.toml"), "").unwrap();

        assert_eq!(
            find_data_file(&dir, "weapons").unwrap(),
            Some(dir.join("weapons.toml"))
        );
        assert_eq!(find_data_file(&dir, "utilities").unwrap(), None);

        cleanup(&dir);
    }

    #[test]
    fn find_data_file_conflict() {
        let dir = make_test_dir("find_conflict");
        fs::write(dir.join("ships.ron"), "[]").unwrap();
        fs::write(dir.join("ships.json"), "[]").unwrap();

        assert!(matches!(
            find_data_file(&dir, "ships"),
            Err(DataLoadError::ConflictingFormats { .. })
        ));

        cleanup(&dir);
    }

    #[test]
    fn require_data_file_missing() {
        let dir = make_test_dir("require_missing");

        match require_data_file(&dir, "segments") {
            Err(DataLoadError::MissingRequired { file, .. }) => assert_eq!(file, "segments"),
            other => panic!("expected MissingRequired, got: {other:?}"),
        }

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // deserialize_file / deserialize_list
    // -----------------------------------------------------------------------

    #[test]
    fn deserialize_list_in_every_format() {
        let dir = make_test_dir("list_formats");
        let ron_path = dir.join("ships.ron");
        fs::write(&ron_path, SHIPS_RON).unwrap();
        let ships: Vec<ShipData> = deserialize_list(&ron_path, "ships").unwrap();
        assert_eq!(ships[0].ship_type, "corvette");
        assert_eq!(ships[0].core_slots.len(), 5);

        let json_path = dir.join("segments.json");
        fs::write(&json_path, SEGMENTS_JSON).unwrap();
        let segments: Vec<SegmentData> = deserialize_list(&json_path, "segments").unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].weapons["point-defense"], 1);

        let toml_path = dir.join("weapons.toml");
        fs::write(&toml_path, WEAPONS_TOML).unwrap();
        let weapons: Vec<WeaponData> = deserialize_list(&toml_path, "weapons").unwrap();
        assert_eq!(weapons[0].sizes[0].damage.cool_down, 4.25);

        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_toml_missing_key() {
        let dir = make_test_dir("list_toml_missing");
        let path = dir.join("ships.toml");
        fs::write(&path, r#"foo = "bar""#).unwrap();

        let result: Result<Vec<ShipData>, _> = deserialize_list(&path, "ships");
        assert!(matches!(result, Err(DataLoadError::Parse { .. })));

        cleanup(&dir);
    }

    #[test]
    fn deserialize_file_parse_error() {
        let dir = make_test_dir("parse_err");
        let path = dir.join("ships.ron");
        fs::write(&path, "this is not valid RON {{{").unwrap();

        let result: Result<Vec<ShipData>, _> = deserialize_file(&path);
        match result {
            Err(DataLoadError::Parse { file, .. }) => assert_eq!(file, path),
            other => panic!("expected Parse, got: {other:?}"),
        }

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // Name helpers
    // -----------------------------------------------------------------------

    #[test]
    fn resolve_name_and_duplicates() {
        let mut map = HashMap::new();
        map.insert("corvette".to_string(), 1u32);

        assert_eq!(*resolve_name(&map, "corvette", Path::new("ships.ron"), "ship").unwrap(), 1);
        assert!(matches!(
            resolve_name(&map, "frigate", Path::new("ships.ron"), "ship"),
            Err(DataLoadError::UnresolvedRef { ref name, expected_kind: "ship", .. }) if name == "frigate"
        ));
        assert!(check_duplicate(&map, "frigate", Path::new("ships.ron")).is_ok());
        assert!(matches!(
            check_duplicate(&map, "corvette", Path::new("ships.ron")),
            Err(DataLoadError::DuplicateName { .. })
        ));
    }

    #[test]
    fn parse_name_reports_expected_kind() {
        let slot: WeaponSlot = parse_name("point-defense", Path::new("w.ron")).unwrap();
        assert_eq!(slot, WeaponSlot::PointDefense);
        match parse_name::<WeaponSlot>("point-defence", Path::new("w.ron")) {
            Err(DataLoadError::UnresolvedRef {
                name, expected_kind, ..
            }) => {
                assert_eq!(name, "point-defence");
                assert_eq!(expected_kind, "weapon slot");
            }
            other => panic!("expected UnresolvedRef, got: {other:?}"),
        }
    }

    #[test]
    fn resolve_cost_parses_resource_names() {
        let data: CostData = [("alloy".to_string(), 12.0), ("dark-matter".to_string(), 1.0)]
            .into_iter()
            .collect();
        let cost = resolve_cost(&data, Path::new("x.ron")).unwrap();
        assert_eq!(cost.get(Resource::DarkMatter), 1.0);

        let bad: CostData = [("gold".to_string(), 1.0)].into_iter().collect();
        assert!(matches!(
            resolve_cost(&bad, Path::new("x.ron")),
            Err(DataLoadError::UnresolvedRef { expected_kind: "resource", .. })
        ));
    }

    // -----------------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------------

    #[test]
    fn load_minimal_catalogs() {
        let dir = make_test_dir("load_minimal");
        fs::write(dir.join("ships.ron"), SHIPS_RON).unwrap();
        fs::write(dir.join("segments.json"), SEGMENTS_JSON).unwrap();
        fs::write(dir.join("weapons.toml"), WEAPONS_TOML).unwrap();

        let data = load_catalogs(&dir).unwrap();
        let corvette = data.schemas.get(ShipType::Corvette).unwrap();
        assert_eq!(
            corvette.pattern_names(HullPosition::Core),
            vec!["picket-ship", "interceptor"]
        );
        assert_eq!(corvette.upkeep, UpkeepRule::default());
        assert_eq!(data.devices.weapon_components().len(), 1);
        assert!(data.devices.core_components().is_empty());

        cleanup(&dir);
    }

    #[test]
    fn segment_for_unknown_ship_fails() {
        let dir = make_test_dir("segment_unknown_ship");
        let ships = dir.join("ships.ron");
        let segments = dir.join("segments.json");
        fs::write(&ships, SHIPS_RON).unwrap();
        fs::write(
            &segments,
            r#"[{"ship_type": "destroyer", "position": "bow", "name": "artillery", "weapons": {"large": 1}}]"#,
        )
        .unwrap();

        match load_schemas(&ships, &segments) {
            Err(DataLoadError::UnresolvedRef {
                file,
                name,
                expected_kind,
            }) => {
                assert_eq!(file, segments);
                assert_eq!(name, "destroyer");
                assert_eq!(expected_kind, "ship");
            }
            other => panic!("expected UnresolvedRef, got: {other:?}"),
        }

        cleanup(&dir);
    }

    #[test]
    fn duplicate_ship_type_fails() {
        let dir = make_test_dir("dup_ship");
        let ships = dir.join("ships.json");
        let segments = dir.join("segments.json");
        fs::write(
            &ships,
            r#"[{"ship_type": "corvette", "hull": 200.0, "core_slots": []},
                {"ship_type": "corvette", "hull": 250.0, "core_slots": []}]"#,
        )
        .unwrap();
        fs::write(&segments, "[]").unwrap();

        assert!(matches!(
            load_schemas(&ships, &segments),
            Err(DataLoadError::DuplicateName { ref name, .. }) if name == "corvette"
        ));

        cleanup(&dir);
    }

    #[test]
    fn duplicate_utility_name_fails() {
        let dir = make_test_dir("dup_utility");
        let path = dir.join("utilities.json");
        fs::write(
            &path,
            r#"[{"name": "deflector", "sizes": [{"slot": "small", "shield": 48.0}]},
                {"name": "deflector", "sizes": [{"slot": "medium", "shield": 96.0}]}]"#,
        )
        .unwrap();

        let mut devices = DeviceCatalogBuilder::new();
        assert!(matches!(
            load_utilities(&path, &mut devices),
            Err(DataLoadError::DuplicateName { ref name, .. }) if name == "deflector"
        ));

        cleanup(&dir);
    }

    #[test]
    fn duplicate_weapon_name_fails() {
        let dir = make_test_dir("dup_weapon");
        let path = dir.join("weapons.toml");
        fs::write(&path, format!("{WEAPONS_TOML}\n{WEAPONS_TOML}")).unwrap();

        let mut devices = DeviceCatalogBuilder::new();
        assert!(matches!(
            load_weapons(&path, &mut devices),
            Err(DataLoadError::DuplicateName { ref name, .. }) if name == "red-laser"
        ));

        cleanup(&dir);
    }

    #[test]
    fn catalog_errors_pass_through() {
        let dir = make_test_dir("catalog_error");
        let ships = dir.join("ships.ron");
        let segments = dir.join("segments.json");
        fs::write(&ships, SHIPS_RON).unwrap();
        fs::write(
            &segments,
            r#"[{"ship_type": "corvette", "position": "core", "name": "empty", "weapons": {"small": 0}}]"#,
        )
        .unwrap();

        assert!(matches!(
            load_schemas(&ships, &segments),
            Err(DataLoadError::Catalog(CatalogError::EmptySlotCount { .. }))
        ));

        cleanup(&dir);
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let data_err: DataLoadError = io_err.into();
        assert!(matches!(data_err, DataLoadError::Io(_)));
        assert!(format!("{data_err}").contains("file not found"));
    }
}
