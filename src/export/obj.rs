//! Wavefront OBJ export for sculpted meshes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::mesh::IndexedMesh;

/// Errors that can occur during OBJ export.
#[derive(Error, Debug)]
pub enum ObjExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes `mesh` as OBJ text to any writer.
///
/// Each vertex emits one `v`, `vt` and `vn` record, so faces use the same
/// 1-based index for all three: `f a/a/a b/b/b c/c/c`.
pub fn write_obj<W: Write>(mesh: &IndexedMesh, mut writer: W) -> Result<(), ObjExportError> {
    writeln!(writer, "# planetsculpt")?;
    writeln!(
        writer,
        "# {} vertices, {} faces",
        mesh.positions().len(),
        mesh.faces().len()
    )?;

    for p in mesh.positions() {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for uv in mesh.uvs() {
        writeln!(writer, "vt {} {}", uv.x, uv.y)?;
    }
    for n in mesh.normals() {
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for &[a, b, c] in mesh.faces() {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        writeln!(writer, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes `mesh` to an OBJ file at `path`.
pub fn export_mesh_obj(mesh: &IndexedMesh, path: &Path) -> Result<(), ObjExportError> {
    let file = File::create(path)?;
    write_obj(mesh, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::icosahedron;

    #[test]
    fn test_record_counts() {
        let mesh = icosahedron();
        let mut buf = Vec::new();
        write_obj(&mesh, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let count = |prefix: &str| text.lines().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(count("v "), 12);
        assert_eq!(count("vt "), 12);
        assert_eq!(count("vn "), 12);
        assert_eq!(count("f "), 20);
    }

    #[test]
    fn test_faces_are_one_based() {
        let mesh = icosahedron();
        let mut buf = Vec::new();
        write_obj(&mesh, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let first_face = text.lines().find(|l| l.starts_with("f ")).unwrap();
        assert_eq!(first_face, "f 1/1/1 6/6/6 12/12/12");
    }
}
