//! Frozen design snapshots and their interchange record.

use crate::component::{Component, ComponentRecord};
use crate::slot::ShipType;
use serde::{Deserialize, Serialize, Serializer};

/// An immutable ship design: the hull type and the components fitted at the
/// time [`ShipDesignBuilder::build`](crate::builder::ShipDesignBuilder::build)
/// was called.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipDesign {
    ship_type: ShipType,
    components: Vec<Component>,
}

impl ShipDesign {
    pub fn new(ship_type: ShipType, components: Vec<Component>) -> Self {
        Self {
            ship_type,
            components,
        }
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn to_record(&self) -> ShipDesignRecord {
        ShipDesignRecord {
            ship_type: self.ship_type,
            components: self.components.iter().map(Component::to_record).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for ShipDesign {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

/// `{"shipType": ..., "components": [{"componentKind", "slot", "device"}, ...]}`
///
/// Resolve back into a [`ShipDesign`] with
/// [`DeviceCatalog::restore_design`](crate::catalog::DeviceCatalog::restore_design).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipDesignRecord {
    pub ship_type: ShipType,
    pub components: Vec<ComponentRecord>,
}

impl ShipDesignRecord {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
