//! RAW export of vegetation instance transforms.
//!
//! Layout: little-endian `f32`, 12 values per instance, each instance a
//! row-major 3x4 matrix `(x, y, z, origin)` per row. No header; the instance
//! count is the file size divided by 48.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::instancing::{InstanceBatch, FLOATS_PER_INSTANCE};

/// Errors that can occur during instance export.
#[derive(Error, Debug)]
pub enum InstanceExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes every instance transform of `batch` to `writer`.
pub fn write_instances_raw<P, W: Write>(batch: &InstanceBatch<P>, mut writer: W) -> Result<(), InstanceExportError> {
    for i in 0..batch.instance_count() {
        if let Some(rows) = batch.rows_3x4(i) {
            for value in rows {
                writer.write_all(&value.to_le_bytes())?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Writes every instance transform of `batch` to a RAW file at `path`.
pub fn export_instances_raw<P>(batch: &InstanceBatch<P>, path: &Path) -> Result<(), InstanceExportError> {
    let file = File::create(path)?;
    write_instances_raw(batch, BufWriter::new(file))
}

/// Returns the expected file size for `instance_count` instances.
pub fn expected_file_size(instance_count: usize) -> u64 {
    (instance_count * FLOATS_PER_INSTANCE * std::mem::size_of::<f32>()) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sculpt::PlacementTransform;
    use glam::{Mat3, Vec3};

    #[test]
    fn test_layout_and_size() {
        let placements = [
            PlacementTransform {
                position: Vec3::new(1.0, 2.0, 3.0),
                basis: Mat3::IDENTITY,
                scale: 2.0,
            },
            PlacementTransform {
                position: Vec3::new(-1.0, 0.0, 0.5),
                basis: Mat3::IDENTITY,
                scale: 1.0,
            },
        ];
        let batch = InstanceBatch::new((), &placements);
        let mut buf = Vec::new();
        write_instances_raw(&batch, &mut buf).unwrap();

        assert_eq!(buf.len() as u64, expected_file_size(2));
        let floats: Vec<f32> = buf
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        assert_eq!(&floats[..4], &[2.0, 0.0, 0.0, 1.0]);
        assert_eq!(floats[12 + 3], -1.0);
        assert_eq!(floats[12 + 11], 0.5);
    }

    #[test]
    fn test_empty_batch_writes_nothing() {
        let batch: InstanceBatch<()> = InstanceBatch::new((), &[]);
        let mut buf = Vec::new();
        write_instances_raw(&batch, &mut buf).unwrap();
        assert!(buf.is_empty());
    }
}
