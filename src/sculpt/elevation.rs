//! Elevation ramp UVs.
//!
//! Each vertex gets `uv = (t, 0)` where `t` is its radial distance remapped
//! from `[sea_level, mountain_level]` to `[0, 1]`. The remap is not clamped:
//! trenches below sea level get negative `t` and peaks above the mountain
//! level get `t > 1`, which the shading ramp is expected to handle.

use glam::{Vec2, Vec3};
use rayon::prelude::*;

use crate::mesh::{EditableMesh, IndexedMesh};

use super::config::PlanetConfig;

/// Position of `value` between `from` and `to`; 0 if the range is empty.
#[inline]
pub fn inverse_lerp(from: f32, to: f32, value: f32) -> f32 {
    let span = to - from;
    if span == 0.0 {
        0.0
    } else {
        (value - from) / span
    }
}

/// Linear interpolation between `min` and `max`.
#[inline]
pub fn lerp(min: f32, max: f32, weight: f32) -> f32 {
    min + (max - min) * weight
}

/// Remaps `value` from `[from, to]` onto `[min, max]` without clamping.
#[inline]
pub fn range_lerp(from: f32, to: f32, min: f32, max: f32, value: f32) -> f32 {
    lerp(min, max, inverse_lerp(from, to, value))
}

/// Elevation UV for a single position.
#[inline]
pub fn elevation_uv(position: Vec3, config: &PlanetConfig) -> Vec2 {
    let t = range_lerp(config.sea_level, config.mountain_level, 0.0, 1.0, position.length());
    Vec2::new(t, 0.0)
}

/// Writes elevation UVs for every vertex of any editable mesh.
pub fn project_elevation_uvs<M: EditableMesh + ?Sized>(mesh: &mut M, config: &PlanetConfig) {
    for i in 0..mesh.vertex_count() {
        let uv = elevation_uv(mesh.position(i), config);
        mesh.set_uv(i, uv);
    }
}

/// Data-parallel variant of [`project_elevation_uvs`] for owned meshes.
///
/// Produces exactly the same UVs; the projection is a pure per-vertex map.
pub fn project_elevation_uvs_par(mesh: &mut IndexedMesh, config: &PlanetConfig) {
    let uvs: Vec<Vec2> = mesh
        .positions()
        .par_iter()
        .map(|&p| elevation_uv(p, config))
        .collect();
    mesh.uvs_mut().copy_from_slice(&uvs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::icosphere;

    #[test]
    fn test_endpoints_are_exact() {
        let config = PlanetConfig::default();
        let sea = elevation_uv(Vec3::X * config.sea_level, &config);
        let mountain = elevation_uv(Vec3::X * config.mountain_level, &config);
        assert_eq!(sea, Vec2::new(0.0, 0.0));
        assert_eq!(mountain, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_extrapolates_outside_range() {
        let config = PlanetConfig::default();
        assert!(elevation_uv(Vec3::Y * 0.8, &config).x < 0.0);
        assert!(elevation_uv(Vec3::Y * 1.2, &config).x > 1.0);
    }

    #[test]
    fn test_monotonic_and_affine() {
        let config = PlanetConfig::default();
        let samples: Vec<f32> = (0..50).map(|i| 0.8 + i as f32 * 0.01).collect();
        let uvs: Vec<f32> = samples.iter().map(|&r| elevation_uv(Vec3::Z * r, &config).x).collect();

        for w in uvs.windows(2) {
            assert!(w[1] > w[0]);
        }
        let slope = 1.0 / (config.mountain_level - config.sea_level);
        for (&r, &u) in samples.iter().zip(&uvs) {
            assert!((u - (r - config.sea_level) * slope).abs() < 1e-4);
        }
    }

    #[test]
    fn test_second_component_is_zero() {
        let config = PlanetConfig::default();
        let mut mesh = icosphere(1);
        project_elevation_uvs(&mut mesh, &config);
        assert!(mesh.uvs().iter().all(|uv| uv.y == 0.0));
    }

    #[test]
    fn test_idempotent() {
        let config = PlanetConfig::default();
        let mut mesh = icosphere(2);
        project_elevation_uvs(&mut mesh, &config);
        let first = mesh.uvs().to_vec();
        project_elevation_uvs(&mut mesh, &config);
        assert_eq!(mesh.uvs(), first.as_slice());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = PlanetConfig::default();
        let mut a = icosphere(2);
        for (i, p) in a.positions().to_vec().into_iter().enumerate() {
            a.set_position(i, p * (0.85 + (i % 7) as f32 * 0.05));
        }
        let mut b = a.clone();
        project_elevation_uvs(&mut a, &config);
        project_elevation_uvs_par(&mut b, &config);
        assert_eq!(a.uvs(), b.uvs());
    }

    #[test]
    fn test_empty_range_does_not_divide_by_zero() {
        assert_eq!(inverse_lerp(1.0, 1.0, 5.0), 0.0);
        assert_eq!(range_lerp(0.0, 2.0, 10.0, 20.0, 1.0), 15.0);
    }
}
