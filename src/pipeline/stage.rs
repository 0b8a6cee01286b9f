//! Fixed-order planet sculpting run.

use glam::Affine3A;
use thiserror::Error;

use crate::instancing::InstanceBatch;
use crate::mesh::{IndexedMesh, MeshError};
use crate::random::RandomSource;
use crate::sculpt::{
    place_vegetation, project_elevation_uvs_par, recompute_flat_normals, run_erosion, ConfigError,
    ErosionStats, PlacementTransform, PlanetConfig,
};

/// The stages of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Randomized directional erosion.
    Erosion,
    /// Elevation ramp UVs.
    ElevationUv,
    /// Flat per-face normals.
    Normals,
    /// Vegetation scattering.
    Vegetation,
}

impl StageId {
    /// All stages in the order they run.
    pub const ORDER: [StageId; 4] = [
        StageId::Erosion,
        StageId::ElevationUv,
        StageId::Normals,
        StageId::Vegetation,
    ];

    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Erosion => "erosion",
            StageId::ElevationUv => "elevation-uv",
            StageId::Normals => "normals",
            StageId::Vegetation => "vegetation",
        }
    }

    /// Position of the stage in [`StageId::ORDER`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Progress events emitted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    StageStarted(StageId),
    /// One erosion iteration finished; `iteration` counts from 1.
    ErosionIteration { iteration: u32, total: u32 },
    StageCompleted(StageId),
}

/// Errors that can occur when setting up a sculptor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid source mesh: {0}")]
    Mesh(#[from] MeshError),
}

/// Numbers describing one finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SculptStats {
    pub erosion: ErosionStats,
    /// Faces skipped by the normal pass because they had no area.
    pub degenerate_faces: usize,
    /// Minimum and maximum vertex radius after erosion.
    pub radius_range: (f32, f32),
    pub instance_count: usize,
}

/// Output of one run.
#[derive(Debug, Clone)]
pub struct SculptedPlanet {
    /// Eroded mesh with elevation UVs and flat normals. Same topology as the source.
    pub mesh: IndexedMesh,
    /// Vegetation instances in vertex order.
    pub placements: Vec<PlacementTransform>,
    pub stats: SculptStats,
}

impl SculptedPlanet {
    /// Packages the placements for an instanced renderer.
    pub fn instance_batch<P>(&self, prototype: P) -> InstanceBatch<P> {
        InstanceBatch::new(prototype, &self.placements)
    }
}

/// Sculpts planets from a pristine source mesh.
///
/// Every run starts from a fresh copy of the source, so repeated runs never
/// compound each other's deformation. A run borrows the random source
/// mutably for its whole duration; concurrent runs sharing one source are
/// therefore impossible, and callers that want several in flight must give
/// each its own source.
#[derive(Debug, Clone)]
pub struct PlanetSculptor {
    source: IndexedMesh,
    config: PlanetConfig,
    planet_transform: Affine3A,
}

impl PlanetSculptor {
    /// Creates a sculptor after validating both the mesh and the config.
    pub fn new(source: IndexedMesh, config: PlanetConfig) -> Result<Self, PipelineError> {
        source.validate()?;
        config.validate()?;
        Ok(Self {
            source,
            config,
            planet_transform: Affine3A::IDENTITY,
        })
    }

    /// Sets the planet-to-world transform applied to instance positions.
    pub fn with_planet_transform(mut self, transform: Affine3A) -> Self {
        self.planet_transform = transform;
        self
    }

    pub fn source(&self) -> &IndexedMesh {
        &self.source
    }

    pub fn config(&self) -> &PlanetConfig {
        &self.config
    }

    /// Replaces the config. The old one is kept if the new one is invalid.
    pub fn set_config(&mut self, config: PlanetConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Runs all stages without progress reporting.
    pub fn make_planet<R: RandomSource + ?Sized>(&self, rng: &mut R) -> SculptedPlanet {
        self.make_planet_with_progress(rng, |_| {})
    }

    /// Runs all stages, reporting progress through `on_progress`.
    ///
    /// Erosion emits one [`Progress::ErosionIteration`] per iteration, which
    /// is where a host can repaint or forward events over a channel.
    pub fn make_planet_with_progress<R, F>(&self, rng: &mut R, mut on_progress: F) -> SculptedPlanet
    where
        R: RandomSource + ?Sized,
        F: FnMut(Progress),
    {
        let config = &self.config;
        let mut mesh = self.source.clone();
        let mut stats = SculptStats::default();

        log::info!(
            "sculpting planet: {} vertices, {} faces, {} iterations",
            self.source.positions().len(),
            self.source.faces().len(),
            config.iterations
        );

        on_progress(Progress::StageStarted(StageId::Erosion));
        stats.erosion = run_erosion(&mut mesh, config, &mut *rng, |iteration, total| {
            on_progress(Progress::ErosionIteration { iteration, total });
        });
        stats.radius_range = mesh.radius_range();
        on_progress(Progress::StageCompleted(StageId::Erosion));
        log::debug!(
            "erosion done: radius range [{:.4}, {:.4}], {} zero directions",
            stats.radius_range.0,
            stats.radius_range.1,
            stats.erosion.zero_directions
        );

        on_progress(Progress::StageStarted(StageId::ElevationUv));
        project_elevation_uvs_par(&mut mesh, config);
        on_progress(Progress::StageCompleted(StageId::ElevationUv));

        on_progress(Progress::StageStarted(StageId::Normals));
        stats.degenerate_faces = recompute_flat_normals(&mut mesh);
        on_progress(Progress::StageCompleted(StageId::Normals));

        on_progress(Progress::StageStarted(StageId::Vegetation));
        let placements = place_vegetation(&mesh, config, rng, &self.planet_transform);
        stats.instance_count = placements.len();
        on_progress(Progress::StageCompleted(StageId::Vegetation));

        log::info!("planet done: {} vegetation instances", stats.instance_count);

        SculptedPlanet {
            mesh,
            placements,
            stats,
        }
    }
}
