//! Flat per-face normals.
//!
//! Faces are visited in ascending index order and each writes its normal to
//! all three of its vertices. A vertex shared by several faces ends up with
//! the normal of the last one, which gives the faceted look.

use glam::Vec3;

use crate::mesh::EditableMesh;

/// Normal of the triangle `(v0, v1, v2)` as `-normalize(ê1 × ê2)`, where
/// `ê1`, `ê2` are the normalized edges from `v0`.
///
/// Returns `None` for degenerate triangles.
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Option<Vec3> {
    let e1 = (v1 - v0).try_normalize()?;
    let e2 = (v2 - v0).try_normalize()?;
    e1.cross(e2).try_normalize().map(|n| -n)
}

/// Overwrites vertex normals with flat face normals.
///
/// Degenerate faces are skipped; their vertices keep whatever normal they
/// already had. Returns the number of skipped faces.
pub fn recompute_flat_normals<M: EditableMesh + ?Sized>(mesh: &mut M) -> usize {
    let mut degenerate = 0;

    for f in 0..mesh.face_count() {
        let [a, b, c] = mesh.face_vertices(f);
        match face_normal(mesh.position(a), mesh.position(b), mesh.position(c)) {
            Some(normal) => {
                mesh.set_normal(a, normal);
                mesh.set_normal(b, normal);
                mesh.set_normal(c, normal);
            }
            None => degenerate += 1,
        }
    }

    if degenerate > 0 {
        log::warn!("skipped {} degenerate faces while recomputing normals", degenerate);
    }
    degenerate
}
