//! Ship and segment schemas: the static shape of each hull class.

use crate::component::Component;
use crate::resource::{Cost, Resource};
use crate::slot::{CoreSlot, HullPosition, ShipType, SlotCount, UtilitySlot, WeaponSlot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named slot pattern for one hull position of one ship type.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSchema {
    pub ship_type: ShipType,
    pub name: String,
    pub weapon_slots: SlotCount<WeaponSlot>,
    pub utility_slots: SlotCount<UtilitySlot>,
}

impl SegmentSchema {
    pub fn new(ship_type: ShipType, name: &str) -> Self {
        Self {
            ship_type,
            name: name.to_string(),
            weapon_slots: SlotCount::new(),
            utility_slots: SlotCount::new(),
        }
    }

    pub fn with_weapons(mut self, slot: WeaponSlot, count: usize) -> Self {
        self.weapon_slots.insert(slot, count);
        self
    }

    pub fn with_utilities(mut self, slot: UtilitySlot, count: usize) -> Self {
        self.utility_slots.insert(slot, count);
        self
    }
}

/// How a schema derives recurring upkeep from its base cost and fitted components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpkeepRule {
    /// Sum every quantity of the base cost and of each component's base cost
    /// into one build value, charge `energy_rate` of it in energy and
    /// `alloy_rate` of it in alloy, then add each component's own upkeep.
    Proportional { energy_rate: f64, alloy_rate: f64 },
    /// A fixed charge plus each component's own upkeep.
    Flat(Cost),
}

impl Default for UpkeepRule {
    fn default() -> Self {
        UpkeepRule::Proportional {
            energy_rate: 0.01,
            alloy_rate: 0.0033,
        }
    }
}

impl UpkeepRule {
    pub fn apply(&self, base: &Cost, components: &[Component]) -> Cost {
        let mut upkeep = match self {
            UpkeepRule::Proportional {
                energy_rate,
                alloy_rate,
            } => {
                let build_value = base.total()
                    + components
                        .iter()
                        .map(|c| c.base_cost().total())
                        .sum::<f64>();
                Cost::from([
                    (Resource::Energy, build_value * energy_rate),
                    (Resource::Alloy, build_value * alloy_rate),
                ])
            }
            UpkeepRule::Flat(cost) => cost.clone(),
        };
        for component in components {
            upkeep.add_cost(&component.upkeep());
        }
        upkeep
    }
}

/// The full static description of one ship type.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipSchema {
    pub ship_type: ShipType,
    /// Pattern options per hull position. A missing position is not part of the hull.
    pub segment_options: BTreeMap<HullPosition, Vec<SegmentSchema>>,
    /// Core slot kinds the hull provides, one slot each.
    pub core_slots: Vec<CoreSlot>,
    pub base_cost: Cost,
    pub base_hull: f64,
    pub base_evasion: f64,
    pub base_speed: f64,
    pub base_disengagement_chance: f64,
    pub upkeep: UpkeepRule,
}

impl ShipSchema {
    pub fn has_position(&self, position: HullPosition) -> bool {
        self.segment_options.contains_key(&position)
    }

    /// Pattern options for `position`; empty if the hull has no such section.
    pub fn patterns(&self, position: HullPosition) -> &[SegmentSchema] {
        self.segment_options
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn pattern(&self, position: HullPosition, name: &str) -> Option<&SegmentSchema> {
        self.patterns(position).iter().find(|p| p.name == name)
    }

    pub fn pattern_names(&self, position: HullPosition) -> Vec<&str> {
        self.patterns(position)
            .iter()
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Hull positions present on this ship, bow to stern.
    pub fn positions(&self) -> impl Iterator<Item = HullPosition> + '_ {
        HullPosition::ALL
            .into_iter()
            .filter(|p| self.has_position(*p))
    }
}
