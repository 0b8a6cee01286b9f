//! Elevation-driven vegetation scattering.
//!
//! Vertices near the vegetation level are accepted with a bell-shaped
//! probability; each accepted vertex becomes one instance oriented along its
//! surface normal, with a random yaw and a random uniform scale.

use std::f32::consts::TAU;

use glam::{Affine3A, Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::mesh::EditableMesh;
use crate::random::RandomSource;

use super::config::PlanetConfig;

/// World-space placement of one vegetation instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementTransform {
    /// Instance origin.
    pub position: Vec3,
    /// Orthonormal basis; `y_axis` is the surface normal.
    pub basis: Mat3,
    /// Uniform scale applied to all three axes.
    pub scale: f32,
}

impl PlacementTransform {
    /// Surface normal the instance stands on.
    pub fn up(&self) -> Vec3 {
        self.basis.y_axis
    }

    /// Scaled basis plus translation.
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_mat3_translation(self.basis * self.scale, self.position)
    }
}

/// Acceptance probability for a vertex at radial distance `dist`.
///
/// Peaks at 1 on the vegetation level and falls off quadratically in the
/// denominator; with the default constants it is ~0.5 at 0.001 away.
#[inline]
pub fn placement_chance(dist: f32, config: &PlanetConfig) -> f32 {
    let offset = (dist - config.vegetation_level).abs() * config.vegetation_falloff;
    1.0 / (1.0 + offset * offset * config.vegetation_falloff_weight)
}

/// Builds an orthonormal `(x, y, z)` frame with `y` along `up`.
///
/// `x = up × world_up`. When `up` is parallel to world up (or zero) the frame
/// falls back to the world axis least aligned with `up`.
pub fn surface_frame(up: Vec3) -> (Vec3, Vec3, Vec3) {
    let y = up.try_normalize().unwrap_or(Vec3::Y);

    let cross = y.cross(Vec3::Y);
    let x = if cross.length_squared() > 1e-12 {
        cross.normalize()
    } else {
        let axis = if y.x.abs() < 0.9 { Vec3::X } else { Vec3::Z };
        (axis - y * axis.dot(y)).normalize()
    };

    let z = x.cross(y).normalize();
    (x, y, z)
}

/// Orients a frame along `up`, spun by `yaw` radians about it.
pub fn oriented_basis(up: Vec3, yaw: f32) -> Mat3 {
    let (x, y, z) = surface_frame(up);
    let spin = Quat::from_axis_angle(y, yaw);
    Mat3::from_cols(spin * x, y, spin * z)
}

/// Returns true if the vertex at `dist` is accepted.
///
/// Underwater vertices are rejected without consuming a random draw.
pub fn accepts<R: RandomSource + ?Sized>(dist: f32, config: &PlanetConfig, rng: &mut R) -> bool {
    dist > config.beach_level && rng.uniform(0.0, 1.0) < placement_chance(dist, config)
}

/// Scatters vegetation over `mesh`.
///
/// All acceptance draws happen first, in vertex order; the yaw and scale
/// draws for accepted vertices follow in the same order. Positions are mapped
/// through `planet_transform`; the basis is not.
pub fn place_vegetation<M, R>(
    mesh: &M,
    config: &PlanetConfig,
    rng: &mut R,
    planet_transform: &Affine3A,
) -> Vec<PlacementTransform>
where
    M: EditableMesh + ?Sized,
    R: RandomSource + ?Sized,
{
    let mut accepted: Vec<(Vec3, Vec3)> = Vec::new();
    for i in 0..mesh.vertex_count() {
        let position = mesh.position(i);
        if accepts(position.length(), config, &mut *rng) {
            accepted.push((position, mesh.normal(i)));
        }
    }

    let (scale_min, scale_max) = config.instance_scale_range();

    accepted
        .into_iter()
        .map(|(position, normal)| {
            let yaw = rng.uniform(0.0, TAU);
            let scale = rng.uniform(scale_min, scale_max);
            PlacementTransform {
                position: planet_transform.transform_point3(position),
                basis: oriented_basis(normal, yaw),
                scale,
            }
        })
        .collect()
}
