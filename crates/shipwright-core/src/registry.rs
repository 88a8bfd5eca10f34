use crate::builder::ShipDesignBuilder;
use crate::catalog::CatalogError;
use crate::schema::{SegmentSchema, ShipSchema};
use crate::slot::{ComponentSlotKind, HullPosition, ShipType};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Builder for constructing an immutable [`SchemaCatalog`].
/// Two-phase lifecycle: registration -> finalization.
#[derive(Debug, Default)]
pub struct SchemaCatalogBuilder {
    schemas: Vec<ShipSchema>,
}

impl SchemaCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase 1: Register a ship schema.
    pub fn register(&mut self, schema: ShipSchema) -> &mut Self {
        self.schemas.push(schema);
        self
    }

    /// Phase 2: Validate and freeze.
    pub fn build(self) -> Result<SchemaCatalog, CatalogError> {
        let mut schemas = BTreeMap::new();
        for schema in self.schemas {
            validate_schema(&schema)?;
            let ship_type = schema.ship_type;
            if schemas.insert(ship_type, Arc::new(schema)).is_some() {
                return Err(CatalogError::DuplicateSchema(ship_type));
            }
        }
        tracing::info!(schemas = schemas.len(), "schema catalog built");
        Ok(SchemaCatalog { schemas })
    }
}

fn validate_schema(schema: &ShipSchema) -> Result<(), CatalogError> {
    for (position, patterns) in &schema.segment_options {
        let mut names = HashSet::new();
        for pattern in patterns {
            if pattern.ship_type != schema.ship_type {
                return Err(CatalogError::PatternShipTypeMismatch {
                    ship_type: schema.ship_type,
                    pattern: pattern.name.clone(),
                    pattern_ship_type: pattern.ship_type,
                });
            }
            if !names.insert(pattern.name.as_str()) {
                return Err(CatalogError::DuplicatePattern {
                    ship_type: schema.ship_type,
                    position: *position,
                    pattern: pattern.name.clone(),
                });
            }
            validate_pattern(pattern)?;
        }
    }

    let mut core = HashSet::new();
    for slot in &schema.core_slots {
        if !core.insert(*slot) {
            return Err(CatalogError::DuplicateCoreSlot {
                ship_type: schema.ship_type,
                slot: *slot,
            });
        }
    }
    Ok(())
}

fn validate_pattern(pattern: &SegmentSchema) -> Result<(), CatalogError> {
    let weapon = pattern
        .weapon_slots
        .iter()
        .map(|(k, n)| (ComponentSlotKind::from(*k), *n));
    let utility = pattern
        .utility_slots
        .iter()
        .map(|(k, n)| (ComponentSlotKind::from(*k), *n));
    match weapon.chain(utility).find(|(_, n)| *n == 0) {
        Some((slot, _)) => Err(CatalogError::EmptySlotCount {
            pattern: pattern.name.clone(),
            slot,
        }),
        None => Ok(()),
    }
}

/// Immutable schema catalog, one schema per ship type. Thread-safe to share.
#[derive(Debug)]
pub struct SchemaCatalog {
    schemas: BTreeMap<ShipType, Arc<ShipSchema>>,
}

impl SchemaCatalog {
    /// Schema for `ship_type`. A miss means the catalog was assembled wrongly.
    pub fn get(&self, ship_type: ShipType) -> Result<&Arc<ShipSchema>, CatalogError> {
        self.schemas
            .get(&ship_type)
            .ok_or(CatalogError::UnknownSchema(ship_type))
    }

    /// Pattern options of `ship_type` at `position` (empty if the hull has no such section).
    pub fn segment_options(
        &self,
        ship_type: ShipType,
        position: HullPosition,
    ) -> Result<&[SegmentSchema], CatalogError> {
        Ok(self.get(ship_type)?.patterns(position))
    }

    /// Starts a design session for `ship_type`.
    pub fn builder(&self, ship_type: ShipType) -> Result<ShipDesignBuilder, CatalogError> {
        Ok(ShipDesignBuilder::new(Arc::clone(self.get(ship_type)?)))
    }

    pub fn ship_types(&self) -> impl Iterator<Item = ShipType> + '_ {
        self.schemas.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;
    use crate::slot::{CoreSlot, UtilitySlot, WeaponSlot};

    fn setup_builder() -> SchemaCatalogBuilder {
        let mut b = SchemaCatalogBuilder::new();
        b.register(builtin::corvette_schema());
        b.register(builtin::destroyer_schema());
        b
    }

    #[test]
    fn register_and_build() {
        let catalog = setup_builder().build().unwrap();
        assert_eq!(catalog.len(), 2);
        let types: Vec<_> = catalog.ship_types().collect();
        assert_eq!(types, vec![ShipType::Corvette, ShipType::Destroyer]);
    }

    #[test]
    fn unknown_schema() {
        let catalog = setup_builder().build().unwrap();
        match catalog.get(ShipType::Titan) {
            Err(CatalogError::UnknownSchema(ship)) => {
                assert_eq!(ship, ShipType::Titan);
                let msg = format!("{}", CatalogError::UnknownSchema(ship));
                assert!(msg.contains("titan"), "got: {msg}");
            }
            other => panic!("expected UnknownSchema, got: {other:?}"),
        }
        assert!(catalog.builder(ShipType::Juggernaut).is_err());
    }

    #[test]
    fn segment_options_lookup() {
        let catalog = setup_builder().build().unwrap();
        let core = catalog
            .segment_options(ShipType::Corvette, HullPosition::Core)
            .unwrap();
        let names: Vec<_> = core.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["picket-ship", "interceptor"]);
        assert!(
            catalog
                .segment_options(ShipType::Corvette, HullPosition::Bow)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn duplicate_schema_fails() {
        let mut b = setup_builder();
        b.register(builtin::corvette_schema());
        assert!(matches!(
            b.build(),
            Err(CatalogError::DuplicateSchema(ShipType::Corvette))
        ));
    }

    #[test]
    fn pattern_for_wrong_ship_fails() {
        let mut schema = builtin::corvette_schema();
        schema.segment_options.insert(
            HullPosition::Bow,
            vec![SegmentSchema::new(ShipType::Destroyer, "artillery")
                .with_weapons(WeaponSlot::Large, 1)],
        );
        let mut b = SchemaCatalogBuilder::new();
        b.register(schema);
        assert!(matches!(
            b.build(),
            Err(CatalogError::PatternShipTypeMismatch { .. })
        ));
    }

    #[test]
    fn duplicate_pattern_name_fails() {
        let mut schema = builtin::corvette_schema();
        let dup = schema.patterns(HullPosition::Core)[0].clone();
        schema
            .segment_options
            .get_mut(&HullPosition::Core)
            .unwrap()
            .push(dup);
        let mut b = SchemaCatalogBuilder::new();
        b.register(schema);
        match b.build() {
            Err(CatalogError::DuplicatePattern { pattern, position, .. }) => {
                assert_eq!(pattern, "picket-ship");
                assert_eq!(position, HullPosition::Core);
            }
            other => panic!("expected DuplicatePattern, got: {other:?}"),
        }
    }

    #[test]
    fn zero_slot_count_fails() {
        let mut schema = builtin::corvette_schema();
        schema.segment_options.insert(
            HullPosition::Stern,
            vec![SegmentSchema::new(ShipType::Corvette, "empty")
                .with_utilities(UtilitySlot::Auxiliary, 0)],
        );
        let mut b = SchemaCatalogBuilder::new();
        b.register(schema);
        assert!(matches!(
            b.build(),
            Err(CatalogError::EmptySlotCount { .. })
        ));
    }

    #[test]
    fn duplicate_core_slot_fails() {
        let mut schema = builtin::corvette_schema();
        schema.core_slots.push(CoreSlot::Reactor);
        let mut b = SchemaCatalogBuilder::new();
        b.register(schema);
        assert!(matches!(
            b.build(),
            Err(CatalogError::DuplicateCoreSlot {
                slot: CoreSlot::Reactor,
                ..
            })
        ));
    }

    #[test]
    fn empty_catalog_builds_successfully() {
        let catalog = SchemaCatalogBuilder::new().build().unwrap();
        assert!(catalog.is_empty());
    }
}
