//! Interactive ship design session.
//!
//! A [`ShipDesignBuilder`] is bound to one [`ShipSchema`]. Segments are
//! chosen per hull position, core modules are fitted into the schema's core
//! slots, and every derived value (cost, upkeep, stats, modifiers, military
//! power) is recomputed from the current state on demand. Nothing derived is
//! cached, so reads between mutations are always consistent.

use crate::component::{Component, CoreComponent, can_use_in_ship};
use crate::design::ShipDesign;
use crate::error::DesignError;
use crate::resource::Cost;
use crate::schema::ShipSchema;
use crate::segment::{Segment, Slot, assign_slot};
use crate::slot::{CoreSlot, HullPosition, ShipType};
use crate::stats::{ShipModifiers, ShipStats, ShipSummary, fold_modifiers, fold_stats};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ShipDesignBuilder {
    schema: Arc<ShipSchema>,
    segments: BTreeMap<HullPosition, Segment>,
    core_slots: Box<[Slot<CoreSlot, CoreComponent>]>,
    base_modifiers: ShipModifiers,
}

impl ShipDesignBuilder {
    /// Starts an empty design: no segments, every core slot open.
    pub fn new(schema: Arc<ShipSchema>) -> Self {
        let core_slots = schema.core_slots.iter().copied().map(Slot::empty).collect();
        let base_modifiers = ShipModifiers {
            combat_disengagement_chance: Some(schema.base_disengagement_chance),
            ..Default::default()
        };
        Self {
            schema,
            segments: BTreeMap::new(),
            core_slots,
            base_modifiers,
        }
    }

    pub fn schema(&self) -> &Arc<ShipSchema> {
        &self.schema
    }

    pub fn ship_type(&self) -> ShipType {
        self.schema.ship_type
    }

    // -- Segments --

    /// Pattern names offered at `position`, in schema order.
    pub fn pattern_names(&self, position: HullPosition) -> Vec<&str> {
        self.schema.pattern_names(position)
    }

    /// Builds a fresh segment from the named pattern. The segment is not
    /// attached; see [`ShipDesignBuilder::set_segment`].
    pub fn create_segment(&self, position: HullPosition, pattern: &str) -> Result<Segment, DesignError> {
        self.schema
            .pattern(position, pattern)
            .map(Segment::from_schema)
            .ok_or_else(|| DesignError::UnknownPattern {
                position,
                pattern: pattern.to_string(),
            })
    }

    /// Attaches `segment` at `position`, returning the segment it replaces.
    ///
    /// The segment must have been built for this ship type from one of the
    /// patterns offered at that position, with that pattern's slot layout.
    pub fn set_segment(
        &mut self,
        position: HullPosition,
        segment: Segment,
    ) -> Result<Option<Segment>, DesignError> {
        let ship = self.schema.ship_type;
        if !self.schema.has_position(position) {
            return Err(DesignError::PositionNotAvailable {
                position,
                ship_type: ship,
            });
        }
        if segment.ship_type() != ship {
            return Err(DesignError::ShipTypeMismatch {
                component: segment.ship_type(),
                ship,
            });
        }
        match self.schema.pattern(position, segment.name()) {
            Some(pattern) if segment.is_built_from(pattern) => {}
            _ => {
                return Err(DesignError::UnknownPattern {
                    position,
                    pattern: segment.name().to_string(),
                });
            }
        }
        tracing::debug!(ship = %self.schema.ship_type, %position, pattern = segment.name(), "segment attached");
        Ok(self.segments.insert(position, segment))
    }

    /// Creates the named pattern, attaches it at `position` and returns it
    /// for fitting.
    pub fn select_segment(
        &mut self,
        position: HullPosition,
        pattern: &str,
    ) -> Result<&mut Segment, DesignError> {
        if !self.schema.has_position(position) {
            return Err(DesignError::PositionNotAvailable {
                position,
                ship_type: self.schema.ship_type,
            });
        }
        let segment = self.create_segment(position, pattern)?;
        self.set_segment(position, segment)?;
        self.segments
            .get_mut(&position)
            .ok_or(DesignError::PositionNotAvailable {
                position,
                ship_type: self.schema.ship_type,
            })
    }

    /// Detaches the segment at `position`.
    pub fn take_segment(&mut self, position: HullPosition) -> Option<Segment> {
        self.segments.remove(&position)
    }

    pub fn segment(&self, position: HullPosition) -> Option<&Segment> {
        self.segments.get(&position)
    }

    pub fn segment_mut(&mut self, position: HullPosition) -> Option<&mut Segment> {
        self.segments.get_mut(&position)
    }

    /// Attached segments, bow to stern.
    pub fn segments(&self) -> impl Iterator<Item = (HullPosition, &Segment)> + '_ {
        self.segments.iter().map(|(p, s)| (*p, s))
    }

    // -- Core slots --

    pub fn core_slots(&self) -> &[Slot<CoreSlot, CoreComponent>] {
        &self.core_slots
    }

    /// Fits `component` into the core slot of its kind, returning the
    /// component it replaces.
    ///
    /// Fails if the schema has no slot of that kind, or if the component was
    /// resolved for a different ship type. A `CoreComponent` can only be
    /// resolved for ship types its device lists. Doctrine compatibility of computer
    /// systems is not enforced here; see
    /// [`ShipDesignBuilder::incompatible_components`].
    pub fn set_core_component(
        &mut self,
        component: CoreComponent,
    ) -> Result<Option<CoreComponent>, DesignError> {
        let slot = component.slot();
        if !self.core_slots.iter().any(|s| s.kind() == slot) {
            return Err(DesignError::SlotNotFound { slot: slot.into() });
        }
        let ship = self.schema.ship_type;
        if component.ship_type() != ship {
            return Err(DesignError::ShipTypeMismatch {
                component: component.ship_type(),
                ship,
            });
        }
        let name = component.device().name().to_string();
        let previous = assign_slot(&mut self.core_slots, slot, 0, Some(component))?;
        tracing::debug!(%ship, %slot, device = %name, "core module fitted");
        Ok(previous)
    }

    /// Empties the core slot of `slot` kind.
    pub fn clear_core_component(&mut self, slot: CoreSlot) -> Result<Option<CoreComponent>, DesignError> {
        assign_slot(&mut self.core_slots, slot, 0, None)
    }

    /// Fitted core components, in the schema's core slot order.
    pub fn core_components(&self) -> impl Iterator<Item = &CoreComponent> + '_ {
        self.core_slots.iter().filter_map(Slot::assignment)
    }

    /// Core slot kinds with nothing fitted.
    pub fn open_core_slots(&self) -> Vec<CoreSlot> {
        self.core_slots
            .iter()
            .filter(|s| s.is_open())
            .map(Slot::kind)
            .collect()
    }

    // -- Modifiers --

    /// Modifiers applied before any component contributes.
    pub fn base_modifiers(&self) -> &ShipModifiers {
        &self.base_modifiers
    }

    pub fn set_base_modifiers(&mut self, modifiers: ShipModifiers) {
        self.base_modifiers = modifiers;
    }

    // -- Derived values --

    /// Every fitted component: core modules first, then the bow, core and
    /// stern segments' components.
    pub fn components(&self) -> Vec<Component> {
        let mut components: Vec<Component> =
            self.core_components().cloned().map(Component::from).collect();
        for segment in self.segments.values() {
            components.extend(segment.components());
        }
        components
    }

    /// The hull's base cost.
    ///
    /// Component costs are deliberately left out: they only flow into
    /// [`ShipDesignBuilder::upkeep`].
    pub fn build_cost(&self) -> Cost {
        self.schema.base_cost.clone()
    }

    /// Recurring cost under the schema's [`UpkeepRule`](crate::schema::UpkeepRule).
    pub fn upkeep(&self) -> Cost {
        self.schema.upkeep.apply(&self.build_cost(), &self.components())
    }

    /// Hull baseline plus every component's stat contribution.
    pub fn summary(&self) -> ShipStats {
        let baseline = ShipSummary {
            hull: Some(self.schema.base_hull),
            evasion: Some(self.schema.base_evasion),
            speed: Some(self.schema.base_speed),
            ..Default::default()
        };
        let contributions: Vec<ShipSummary> = std::iter::once(baseline)
            .chain(self.components().iter().map(Component::stats))
            .collect();
        fold_stats(&contributions)
    }

    /// Base modifiers plus the modifiers of every component that provides any.
    pub fn modifiers(&self) -> ShipModifiers {
        let provided: Vec<ShipModifiers> = self
            .components()
            .iter()
            .filter_map(Component::provided_modifiers)
            .collect();
        fold_modifiers(std::iter::once(&self.base_modifiers).chain(&provided))
    }

    pub fn military_power(&self) -> f64 {
        self.summary().military_power()
    }

    /// Fitted components that fail [`can_use_in_ship`] for this hull.
    pub fn incompatible_components(&self) -> Vec<Component> {
        let ship = self.schema.ship_type;
        self.components()
            .into_iter()
            .filter(|c| !can_use_in_ship(c, ship))
            .collect()
    }

    /// Freezes the current component list into an independent snapshot.
    pub fn build(&self) -> ShipDesign {
        let design = ShipDesign::new(self.schema.ship_type, self.components());
        tracing::debug!(
            ship = %design.ship_type(),
            components = design.components().len(),
            "design built"
        );
        design
    }
}
