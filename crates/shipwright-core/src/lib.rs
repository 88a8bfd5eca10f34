//! Shipwright Core -- the ship configuration and capability engine.
//!
//! A ship is assembled from a [`schema::ShipSchema`]: hull segments chosen
//! from named patterns at each hull position, plus one core module per core
//! slot. Devices from an immutable [`catalog::DeviceCatalog`] are mounted
//! into those slots as components, and the engine folds every component's
//! contribution into stats, modifiers, upkeep and a single military power
//! figure.
//!
//! # Design Session
//!
//! ```rust,ignore
//! let schemas = builtin::schema_catalog()?;
//! let devices = builtin::device_catalog()?;
//! let mut builder = schemas.builder(ShipType::Corvette)?;
//! let laser = devices.weapon_component("red-laser", WeaponSlot::Small).unwrap();
//! builder
//!     .select_segment(HullPosition::Core, "interceptor")?
//!     .set_weapon_component(laser.clone(), 0)?;
//! let power = builder.military_power();
//! let design = builder.build();
//! ```
//!
//! # Key Types
//!
//! - [`registry::SchemaCatalog`] -- Frozen ship schemas, one per ship type.
//! - [`catalog::DeviceCatalog`] -- Frozen devices and every component they
//!   enumerate, plus ship-type compatibility queries.
//! - [`segment::Segment`] -- A hull section with fixed weapon and utility slots.
//! - [`builder::ShipDesignBuilder`] -- Mutable design session; all derived
//!   values are recomputed on read.
//! - [`stats`] -- Field-by-field stat and modifier folds and the military
//!   power heuristic.
//! - [`design::ShipDesign`] -- Immutable snapshot with a JSON interchange form.

pub mod builder;
pub mod builtin;
pub mod catalog;
pub mod component;
pub mod design;
pub mod device;
pub mod error;
pub mod registry;
pub mod resource;
pub mod schema;
pub mod segment;
pub mod slot;
pub mod stats;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
