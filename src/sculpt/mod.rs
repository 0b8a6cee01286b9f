//! The sculpting passes: erosion, elevation UVs, flat normals and
//! vegetation placement.
//!
//! Each pass works on any [`EditableMesh`](crate::mesh::EditableMesh) and
//! takes its randomness explicitly. [`crate::pipeline`] runs them in order.

mod config;
pub mod erosion;
pub mod elevation;
pub mod normals;
pub mod vegetation;

pub use config::{ConfigError, PlanetConfig};
pub use erosion::{run_erosion, ErosionStats};
pub use elevation::{project_elevation_uvs, project_elevation_uvs_par, range_lerp};
pub use normals::recompute_flat_normals;
pub use vegetation::{place_vegetation, placement_chance, PlacementTransform};
