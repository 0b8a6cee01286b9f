//! Orchestration of a full planet run.
//!
//! The stages always run in the same order: erosion, elevation UVs, flat
//! normals, vegetation. [`PlanetSculptor`] owns the pristine source mesh and
//! hands back a fresh [`SculptedPlanet`] per run.

mod stage;

pub use stage::{
    PipelineError, PlanetSculptor, Progress, SculptStats, SculptedPlanet, StageId,
};
