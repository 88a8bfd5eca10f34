//! Hull segments: an instantiated [`SegmentSchema`] with fixed weapon and
//! utility slots.
//!
//! The slot arrays are built once from the schema and never resized; only
//! the `assignment` of each slot changes.

use crate::component::{Component, UtilityComponent, WeaponComponent};
use crate::error::DesignError;
use crate::schema::SegmentSchema;
use crate::slot::{
    ComponentKind, ComponentSlotKind, ShipType, SlotCount, UtilitySlot, WeaponSlot,
    widen_slot_count,
};
use crate::stats::{ShipStats, fold_stats};

/// One mount point: its kind and what (if anything) is fitted there.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot<K, C> {
    kind: K,
    assignment: Option<C>,
}

impl<K: Copy, C> Slot<K, C> {
    pub fn empty(kind: K) -> Self {
        Self {
            kind,
            assignment: None,
        }
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn assignment(&self) -> Option<&C> {
        self.assignment.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.assignment.is_none()
    }
}

/// Expands `(kind -> count)` into `count` empty slots per kind, in key order.
pub(crate) fn expand_slots<K: Copy, C>(counts: &SlotCount<K>) -> Box<[Slot<K, C>]> {
    counts
        .iter()
        .flat_map(|(kind, n)| (0..*n).map(|_| Slot::empty(*kind)))
        .collect()
}

/// Puts `component` into the `index`-th slot of `kind`, returning what was there.
pub(crate) fn assign_slot<K, C>(
    slots: &mut [Slot<K, C>],
    kind: K,
    index: usize,
    component: Option<C>,
) -> Result<Option<C>, DesignError>
where
    K: Copy + PartialEq + Into<ComponentSlotKind>,
{
    let available = slots.iter().filter(|s| s.kind == kind).count();
    if available == 0 {
        return Err(DesignError::SlotNotFound { slot: kind.into() });
    }
    let slot = slots
        .iter_mut()
        .filter(|s| s.kind == kind)
        .nth(index)
        .ok_or(DesignError::SlotIndexOutOfRange {
            slot: kind.into(),
            index,
            available,
        })?;
    Ok(std::mem::replace(&mut slot.assignment, component))
}

/// Counts open (`open == true`) or filled slots by kind. Kinds with no match are omitted.
pub(crate) fn count_slots<K: Copy + Ord, C>(slots: &[Slot<K, C>], open: bool) -> SlotCount<K> {
    let mut counts = SlotCount::new();
    for slot in slots.iter().filter(|s| s.is_open() == open) {
        *counts.entry(slot.kind).or_insert(0) += 1;
    }
    counts
}

/// Counts every slot by kind, fitted or not.
fn slot_layout<K: Copy + Ord, C>(slots: &[Slot<K, C>]) -> SlotCount<K> {
    let mut counts = SlotCount::new();
    for slot in slots {
        *counts.entry(slot.kind).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    ship_type: ShipType,
    name: String,
    weapons: Box<[Slot<WeaponSlot, WeaponComponent>]>,
    utilities: Box<[Slot<UtilitySlot, UtilityComponent>]>,
}

impl Segment {
    /// Builds an empty segment shaped exactly like `schema`.
    pub fn from_schema(schema: &SegmentSchema) -> Self {
        Self {
            ship_type: schema.ship_type,
            name: schema.name.clone(),
            weapons: expand_slots(&schema.weapon_slots),
            utilities: expand_slots(&schema.utility_slots),
        }
    }

    /// Pattern name this segment was built from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ship type of the pattern this segment was built from.
    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    /// True if this segment has exactly the identity and slot layout of `schema`.
    pub fn is_built_from(&self, schema: &SegmentSchema) -> bool {
        self.ship_type == schema.ship_type
            && self.name == schema.name
            && slot_layout(&self.weapons) == schema.weapon_slots
            && slot_layout(&self.utilities) == schema.utility_slots
    }

    pub fn weapon_slots(&self) -> &[Slot<WeaponSlot, WeaponComponent>] {
        &self.weapons
    }

    pub fn utility_slots(&self) -> &[Slot<UtilitySlot, UtilityComponent>] {
        &self.utilities
    }

    // -- Slot queries --

    pub fn open_weapon_slots(&self) -> SlotCount<WeaponSlot> {
        count_slots(&self.weapons, true)
    }

    pub fn used_weapon_slots(&self) -> SlotCount<WeaponSlot> {
        count_slots(&self.weapons, false)
    }

    pub fn open_utility_slots(&self) -> SlotCount<UtilitySlot> {
        count_slots(&self.utilities, true)
    }

    pub fn used_utility_slots(&self) -> SlotCount<UtilitySlot> {
        count_slots(&self.utilities, false)
    }

    /// Empty slots of a category, by kind. Segments hold no core slots.
    pub fn open_slots(&self, kind: ComponentKind) -> Result<SlotCount<ComponentSlotKind>, DesignError> {
        match kind {
            ComponentKind::Weapon => Ok(widen_slot_count(self.open_weapon_slots())),
            ComponentKind::Utility => Ok(widen_slot_count(self.open_utility_slots())),
            ComponentKind::Core => Err(DesignError::InvalidCategory(kind)),
        }
    }

    /// Filled slots of a category, by kind. Segments hold no core slots.
    pub fn used_slots(&self, kind: ComponentKind) -> Result<SlotCount<ComponentSlotKind>, DesignError> {
        match kind {
            ComponentKind::Weapon => Ok(widen_slot_count(self.used_weapon_slots())),
            ComponentKind::Utility => Ok(widen_slot_count(self.used_utility_slots())),
            ComponentKind::Core => Err(DesignError::InvalidCategory(kind)),
        }
    }

    // -- Assignment --

    /// Fits `component` into the `index`-th slot of its kind (0-based, in
    /// declaration order), replacing whatever was there.
    ///
    /// Ship-type compatibility is not checked here.
    pub fn set_weapon_component(
        &mut self,
        component: WeaponComponent,
        index: usize,
    ) -> Result<Option<WeaponComponent>, DesignError> {
        let kind = component.slot();
        let name = component.device().name.clone();
        let previous = assign_slot(&mut self.weapons, kind, index, Some(component))?;
        tracing::debug!(segment = %self.name, slot = %kind, index, device = %name, "weapon fitted");
        Ok(previous)
    }

    /// Utility counterpart of [`Segment::set_weapon_component`].
    pub fn set_utility_component(
        &mut self,
        component: UtilityComponent,
        index: usize,
    ) -> Result<Option<UtilityComponent>, DesignError> {
        let kind = component.slot();
        let name = component.device().name.clone();
        let previous = assign_slot(&mut self.utilities, kind, index, Some(component))?;
        tracing::debug!(segment = %self.name, slot = %kind, index, device = %name, "utility fitted");
        Ok(previous)
    }

    /// Fits a weapon or utility component. Core components belong on the
    /// design builder, not on a segment.
    pub fn set_component(
        &mut self,
        component: Component,
        index: usize,
    ) -> Result<Option<Component>, DesignError> {
        match component {
            Component::Weapon(c) => Ok(self.set_weapon_component(c, index)?.map(Component::from)),
            Component::Utility(c) => Ok(self.set_utility_component(c, index)?.map(Component::from)),
            Component::Core(_) => Err(DesignError::InvalidCategory(ComponentKind::Core)),
        }
    }

    /// Empties the `index`-th weapon slot of `kind`, returning what was there.
    pub fn clear_weapon_slot(
        &mut self,
        kind: WeaponSlot,
        index: usize,
    ) -> Result<Option<WeaponComponent>, DesignError> {
        assign_slot(&mut self.weapons, kind, index, None)
    }

    /// Empties the `index`-th utility slot of `kind`, returning what was there.
    pub fn clear_utility_slot(
        &mut self,
        kind: UtilitySlot,
        index: usize,
    ) -> Result<Option<UtilityComponent>, DesignError> {
        assign_slot(&mut self.utilities, kind, index, None)
    }

    // -- Derived --

    /// Fitted components: weapon slots first, then utility slots, in slot order.
    pub fn components(&self) -> Vec<Component> {
        self.weapons
            .iter()
            .filter_map(|s| s.assignment().cloned().map(Component::from))
            .chain(
                self.utilities
                    .iter()
                    .filter_map(|s| s.assignment().cloned().map(Component::from)),
            )
            .collect()
    }

    pub fn stats(&self) -> ShipStats {
        let contributions: Vec<_> = self.components().iter().map(Component::stats).collect();
        fold_stats(&contributions)
    }
}
