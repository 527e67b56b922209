//! Core of an augmented-reality drawing app: touches become chains of sphere markers anchored in
//! world space, one anchor per stroke, saved and restored with the world map.

pub(crate) mod util;

pub mod config;
pub mod controls;
pub mod engine;
pub mod geom;
pub mod host;

pub use config::{ConfigError, DrawingConfig};
pub use engine::*;
