//! Sphere-like source meshes.
//!
//! All generators emit unit-radius meshes centered on the origin with radial
//! normals. Faces are wound clockwise when seen from outside the sphere, so
//! the flat-normal pass (`-(e1 × e2)`) yields outward-facing normals.

use std::collections::HashMap;

use glam::Vec3;

use super::indexed::{Face, IndexedMesh};

/// Golden ratio, used for icosahedron vertex placement.
const PHI: f32 = 1.618_034;

const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];

const ICOSAHEDRON_FACES: [Face; 20] = [
    [0, 5, 11],
    [0, 1, 5],
    [0, 7, 1],
    [0, 10, 7],
    [0, 11, 10],
    [1, 9, 5],
    [5, 4, 11],
    [11, 2, 10],
    [10, 6, 7],
    [7, 8, 1],
    [3, 4, 9],
    [3, 2, 4],
    [3, 6, 2],
    [3, 8, 6],
    [3, 9, 8],
    [4, 5, 9],
    [2, 11, 4],
    [6, 10, 2],
    [8, 7, 6],
    [9, 1, 8],
];

/// Builds a unit icosahedron: 12 vertices, 20 faces.
pub fn icosahedron() -> IndexedMesh {
    let positions: Vec<Vec3> = ICOSAHEDRON_VERTICES
        .iter()
        .map(|&v| Vec3::from_array(v).normalize())
        .collect();
    IndexedMesh::with_radial_normals(positions, ICOSAHEDRON_FACES.to_vec())
        .unwrap_or_else(|_| IndexedMesh::empty())
}

/// Builds a unit icosphere by splitting every icosahedron triangle into four,
/// `subdivisions` times, and projecting new vertices onto the sphere.
///
/// Vertex count is `10 * 4^n + 2`, face count `20 * 4^n`.
pub fn icosphere(subdivisions: u32) -> IndexedMesh {
    let mut positions: Vec<Vec3> = ICOSAHEDRON_VERTICES
        .iter()
        .map(|&v| Vec3::from_array(v).normalize())
        .collect();
    let mut faces = ICOSAHEDRON_FACES.to_vec();

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut next = Vec::with_capacity(faces.len() * 4);

        for &[a, b, c] in &faces {
            let ab = midpoint(&mut positions, &mut midpoints, a, b);
            let bc = midpoint(&mut positions, &mut midpoints, b, c);
            let ca = midpoint(&mut positions, &mut midpoints, c, a);

            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }

        faces = next;
    }

    IndexedMesh::with_radial_normals(positions, faces).unwrap_or_else(|_| IndexedMesh::empty())
}

fn midpoint(positions: &mut Vec<Vec3>, cache: &mut HashMap<(u32, u32), u32>, a: u32, b: u32) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    *cache.entry(key).or_insert_with(|| {
        let p = ((positions[a as usize] + positions[b as usize]) * 0.5).normalize();
        positions.push(p);
        (positions.len() - 1) as u32
    })
}

/// Maps a point on the unit cube surface onto the unit sphere.
///
/// Spreads area more evenly than plain normalization, so cube corners do not
/// collect dense vertex clusters.
pub fn spherify_point(cube_pos: Vec3) -> Vec3 {
    let x2 = cube_pos.x * cube_pos.x;
    let y2 = cube_pos.y * cube_pos.y;
    let z2 = cube_pos.z * cube_pos.z;

    Vec3::new(
        cube_pos.x * (1.0 - y2 / 2.0 - z2 / 2.0 + y2 * z2 / 3.0).max(0.0).sqrt(),
        cube_pos.y * (1.0 - x2 / 2.0 - z2 / 2.0 + x2 * z2 / 3.0).max(0.0).sqrt(),
        cube_pos.z * (1.0 - x2 / 2.0 - y2 / 2.0 + x2 * y2 / 3.0).max(0.0).sqrt(),
    )
}

/// Outward axis, u axis and v axis of each cube face.
const CUBE_FACE_AXES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
];

/// Builds a spherified cube with `resolution x resolution` quads per face.
///
/// Each face owns its own grid of `(resolution + 1)^2` vertices, so seam
/// vertices are duplicated. Duplicates share position and normal, so they
/// stay coincident through erosion. A resolution of 0 is treated as 1.
pub fn cube_sphere(resolution: u32) -> IndexedMesh {
    let res = resolution.max(1);
    let side = res + 1;
    let per_face = (side * side) as usize;

    let mut positions = Vec::with_capacity(per_face * 6);
    let mut faces = Vec::with_capacity((res * res * 2 * 6) as usize);

    for (face_idx, &(normal, u_axis, v_axis)) in CUBE_FACE_AXES.iter().enumerate() {
        let base = (face_idx * per_face) as u32;

        for y in 0..side {
            for x in 0..side {
                let s = (x as f32 / res as f32) * 2.0 - 1.0;
                let t = (y as f32 / res as f32) * 2.0 - 1.0;
                let cube = normal + u_axis * s + v_axis * t;
                positions.push(spherify_point(cube));
            }
        }

        // Clockwise from outside means u x v must point inward for the
        // (i00, i10, i11) ordering; flip it when the face axes say otherwise.
        let flip = u_axis.cross(v_axis).dot(normal) > 0.0;

        for y in 0..res {
            for x in 0..res {
                let i00 = base + y * side + x;
                let i10 = i00 + 1;
                let i01 = i00 + side;
                let i11 = i01 + 1;

                if flip {
                    faces.push([i00, i11, i10]);
                    faces.push([i00, i01, i11]);
                } else {
                    faces.push([i00, i10, i11]);
                    faces.push([i00, i11, i01]);
                }
            }
        }
    }

    IndexedMesh::with_radial_normals(positions, faces).unwrap_or_else(|_| IndexedMesh::empty())
}
