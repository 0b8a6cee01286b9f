//! Owned indexed triangle mesh.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A triangle as three vertex indices. Index order defines winding.
pub type Face = [u32; 3];

/// Errors raised when building or validating an [`IndexedMesh`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("Attribute '{attribute}' has {actual} entries, expected {expected}")]
    AttributeLength {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
}

/// Index-addressed read/write access to a triangle mesh.
///
/// The sculpting passes only talk to meshes through this trait. Vertex and
/// face counts must not change while a pass holds the view.
pub trait EditableMesh {
    fn vertex_count(&self) -> usize;
    fn face_count(&self) -> usize;

    fn position(&self, vertex: usize) -> Vec3;
    fn set_position(&mut self, vertex: usize, position: Vec3);

    fn normal(&self, vertex: usize) -> Vec3;
    fn set_normal(&mut self, vertex: usize, normal: Vec3);

    fn uv(&self, vertex: usize) -> Vec2;
    fn set_uv(&mut self, vertex: usize, uv: Vec2);

    /// Returns vertex index `corner` (0, 1 or 2) of face `face`.
    fn face_vertex(&self, face: usize, corner: usize) -> usize;

    /// Returns all three vertex indices of `face`.
    fn face_vertices(&self, face: usize) -> [usize; 3] {
        [
            self.face_vertex(face, 0),
            self.face_vertex(face, 1),
            self.face_vertex(face, 2),
        ]
    }
}

/// A triangle mesh with per-vertex positions, normals and UVs.
///
/// All per-vertex arrays have the same length and every face index is a
/// valid vertex index. [`IndexedMesh::new`] enforces both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedMesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    faces: Vec<Face>,
}

impl IndexedMesh {
    /// Builds a mesh from positions, normals and faces. UVs start at zero.
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, faces: Vec<Face>) -> Result<Self, MeshError> {
        let uvs = vec![Vec2::ZERO; positions.len()];
        Self::with_uvs(positions, normals, uvs, faces)
    }

    /// Builds a mesh with explicit UVs.
    pub fn with_uvs(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        uvs: Vec<Vec2>,
        faces: Vec<Face>,
    ) -> Result<Self, MeshError> {
        let mesh = Self {
            positions,
            normals,
            uvs,
            faces,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Builds a mesh whose normals point radially away from the origin.
    ///
    /// Suitable for sphere-like source meshes centered on the origin.
    pub fn with_radial_normals(positions: Vec<Vec3>, faces: Vec<Face>) -> Result<Self, MeshError> {
        let normals = positions.iter().map(|p| p.normalize_or_zero()).collect();
        Self::new(positions, normals, faces)
    }

    /// Creates a mesh with no vertices and no faces.
    pub fn empty() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Checks attribute lengths and face indices.
    pub fn validate(&self) -> Result<(), MeshError> {
        let n = self.positions.len();
        if self.normals.len() != n {
            return Err(MeshError::AttributeLength {
                attribute: "normals",
                expected: n,
                actual: self.normals.len(),
            });
        }
        if self.uvs.len() != n {
            return Err(MeshError::AttributeLength {
                attribute: "uvs",
                expected: n,
                actual: self.uvs.len(),
            });
        }
        for (face, tri) in self.faces.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= n) {
                return Err(MeshError::FaceIndexOutOfRange {
                    face,
                    index,
                    vertex_count: n,
                });
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Mutable access to UVs, for passes that compute them in bulk.
    pub(crate) fn uvs_mut(&mut self) -> &mut [Vec2] {
        &mut self.uvs
    }

    /// Returns the minimum and maximum distance of any vertex from the origin.
    ///
    /// Returns `(0.0, 0.0)` for an empty mesh.
    pub fn radius_range(&self) -> (f32, f32) {
        if self.positions.is_empty() {
            return (0.0, 0.0);
        }
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for p in &self.positions {
            let r = p.length();
            min = min.min(r);
            max = max.max(r);
        }
        (min, max)
    }
}

impl EditableMesh for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    fn position(&self, vertex: usize) -> Vec3 {
        self.positions[vertex]
    }

    #[inline]
    fn set_position(&mut self, vertex: usize, position: Vec3) {
        self.positions[vertex] = position;
    }

    #[inline]
    fn normal(&self, vertex: usize) -> Vec3 {
        self.normals[vertex]
    }

    #[inline]
    fn set_normal(&mut self, vertex: usize, normal: Vec3) {
        self.normals[vertex] = normal;
    }

    #[inline]
    fn uv(&self, vertex: usize) -> Vec2 {
        self.uvs[vertex]
    }

    #[inline]
    fn set_uv(&mut self, vertex: usize, uv: Vec2) {
        self.uvs[vertex] = uv;
    }

    #[inline]
    fn face_vertex(&self, face: usize, corner: usize) -> usize {
        self.faces[face][corner] as usize
    }
}
