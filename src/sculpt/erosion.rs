//! Randomized directional erosion.
//!
//! Each iteration picks a random direction and pushes every vertex along its
//! normal: outward where the normal faces the direction, inward where it faces
//! away. Repeated over many iterations this grows continent-like bumps.

use glam::Vec3;

use crate::mesh::EditableMesh;
use crate::random::RandomSource;

use super::config::PlanetConfig;

/// Summary of one erosion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ErosionStats {
    /// Iterations performed.
    pub iterations: u32,
    /// Iterations whose random direction had zero length and displaced nothing.
    pub zero_directions: u32,
    /// Largest single-iteration displacement applied to any vertex.
    pub max_step: f32,
}

/// Logistic function `exp(x) / (exp(x) + 1)`, evaluated without overflow.
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (e + 1.0)
    }
}

/// Maps the alignment of `normal` with `direction` into `(-0.5, 0.5)`.
///
/// `normal` is normalized first; a zero normal yields 0.
#[inline]
pub fn push_factor(normal: Vec3, direction: Vec3, sharpness: f32) -> f32 {
    let dot = normal.normalize_or_zero().dot(direction);
    sigmoid(dot * sharpness) - 0.5
}

/// Draws a random unit direction from three components in `[-1, 1)`.
///
/// Returns `Vec3::ZERO` when all three components are zero.
pub fn random_direction<R: RandomSource + ?Sized>(rng: &mut R) -> Vec3 {
    let x = rng.uniform(-1.0, 1.0);
    let y = rng.uniform(-1.0, 1.0);
    let z = rng.uniform(-1.0, 1.0);
    Vec3::new(x, y, z).normalize_or_zero()
}

/// Displaces every vertex once against a fixed direction.
///
/// Uses the stored (possibly non-unit) normal as the displacement axis.
/// Returns the largest displacement length applied.
pub fn erode_once<M: EditableMesh + ?Sized>(mesh: &mut M, direction: Vec3, sharpness: f32, step: f32) -> f32 {
    let mut max_step = 0.0f32;
    for j in 0..mesh.vertex_count() {
        let normal = mesh.normal(j);
        let s = push_factor(normal, direction, sharpness);
        let offset = normal * s * step;
        mesh.set_position(j, mesh.position(j) + offset);
        max_step = max_step.max(offset.length());
    }
    max_step
}

/// Runs `config.iterations` erosion iterations over `mesh`.
///
/// `on_iteration(done, total)` is called after every iteration. Normals are
/// not refreshed between iterations, so the push axis of each vertex stays
/// fixed for the whole pass.
pub fn run_erosion<M, R, F>(mesh: &mut M, config: &PlanetConfig, rng: &mut R, mut on_iteration: F) -> ErosionStats
where
    M: EditableMesh + ?Sized,
    R: RandomSource + ?Sized,
    F: FnMut(u32, u32),
{
    let total = config.iterations;
    let mut stats = ErosionStats::default();

    for i in 0..total {
        let direction = random_direction(&mut *rng);
        if direction == Vec3::ZERO {
            stats.zero_directions += 1;
        }

        let step = erode_once(&mut *mesh, direction, config.sharpness, config.displacement_step);
        stats.max_step = stats.max_step.max(step);
        stats.iterations += 1;

        on_iteration(i + 1, total);
    }

    stats
}
