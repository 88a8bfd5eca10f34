use crate::slot::{ComponentKind, ComponentSlotKind, HullPosition, ShipType};

/// Errors raised by segment and design mutations.
///
/// All of them are caller mistakes detected before any state changes: a
/// rejected call leaves the segment or builder exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DesignError {
    #[error("no pattern '{pattern}' at {position}")]
    UnknownPattern {
        position: HullPosition,
        pattern: String,
    },

    #[error("no {slot} slot on this ship")]
    SlotNotFound { slot: ComponentSlotKind },

    #[error("slot index {index} out of range for {slot} ({available} available)")]
    SlotIndexOutOfRange {
        slot: ComponentSlotKind,
        index: usize,
        available: usize,
    },

    #[error("cannot add component for {component} on a {ship}")]
    ShipTypeMismatch { component: ShipType, ship: ShipType },

    #[error("{0} slots are not part of this query")]
    InvalidCategory(ComponentKind),

    #[error("{ship_type} has no {position} section")]
    PositionNotAvailable {
        position: HullPosition,
        ship_type: ShipType,
    },
}
