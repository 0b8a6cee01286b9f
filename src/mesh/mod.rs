//! Indexed triangle meshes and sphere generators.
//!
//! The sculpting passes operate on any [`EditableMesh`]; [`IndexedMesh`] is
//! the owned implementation used by the pipeline and the CLI.

mod indexed;
pub mod generators;

pub use indexed::{EditableMesh, Face, IndexedMesh, MeshError};
pub use generators::{cube_sphere, icosahedron, icosphere};
