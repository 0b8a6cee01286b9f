//! Procedural planet sculpting.
//!
//! This crate turns a sphere mesh into a planet by randomized directional
//! erosion, assigns elevation UVs and flat normals, and scatters vegetation
//! instances around a target elevation.

pub mod mesh;
pub mod random;
pub mod sculpt;
pub mod pipeline;
pub mod instancing;
pub mod export;

pub use mesh::{EditableMesh, IndexedMesh, MeshError};
pub use random::{ChaChaRandom, ConstantRandom, RandomSource, SequenceRandom};
pub use sculpt::{PlacementTransform, PlanetConfig};
pub use pipeline::{PipelineError, PlanetSculptor, Progress, SculptedPlanet, StageId};
pub use instancing::{InstanceBatch, InstanceSink};
