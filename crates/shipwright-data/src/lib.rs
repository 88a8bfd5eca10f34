//! Data-driven catalog loading for shipwright.
//!
//! Reads ship, segment-pattern and device definitions from RON, JSON or TOML
//! files and resolves them into frozen [`SchemaCatalog`] and [`DeviceCatalog`]
//! values.
//!
//! [`SchemaCatalog`]: shipwright_core::registry::SchemaCatalog
//! [`DeviceCatalog`]: shipwright_core::catalog::DeviceCatalog

pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, GameData, load_catalogs};
