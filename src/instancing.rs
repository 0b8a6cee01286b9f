//! Hand-off of vegetation placements to an instanced renderer.
//!
//! The renderer itself lives outside this crate. It is modelled by
//! [`InstanceSink`]: it receives the prototype mesh, is told the instance
//! count, and is then assigned each transform by index.

use glam::Affine3A;

use crate::sculpt::PlacementTransform;

/// Number of floats in one packed 3x4 transform.
pub const FLOATS_PER_INSTANCE: usize = 12;

/// Receiver of instance data, typically a GPU multi-mesh.
pub trait InstanceSink {
    type Prototype;

    fn set_prototype(&mut self, prototype: Self::Prototype);
    fn set_instance_count(&mut self, count: usize);
    fn set_instance_transform(&mut self, index: usize, transform: Affine3A);
}

/// A prototype mesh plus one transform per instance.
///
/// The prototype is opaque here and passed through unchanged.
#[derive(Debug, Clone)]
pub struct InstanceBatch<P> {
    prototype: P,
    transforms: Vec<Affine3A>,
}

impl<P> InstanceBatch<P> {
    /// Builds a batch sized exactly to `placements`.
    pub fn new(prototype: P, placements: &[PlacementTransform]) -> Self {
        Self {
            prototype,
            transforms: placements.iter().map(PlacementTransform::to_affine).collect(),
        }
    }

    pub fn prototype(&self) -> &P {
        &self.prototype
    }

    pub fn instance_count(&self) -> usize {
        self.transforms.len()
    }

    pub fn transform(&self, index: usize) -> Option<Affine3A> {
        self.transforms.get(index).copied()
    }

    pub fn transforms(&self) -> &[Affine3A] {
        &self.transforms
    }

    /// Returns instance `index` as a row-major 3x4 matrix.
    pub fn rows_3x4(&self, index: usize) -> Option<[f32; FLOATS_PER_INSTANCE]> {
        self.transforms.get(index).map(pack_rows_3x4)
    }

    /// All instances packed back to back, `FLOATS_PER_INSTANCE` floats each.
    pub fn packed_rows(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.transforms.len() * FLOATS_PER_INSTANCE);
        for t in &self.transforms {
            out.extend_from_slice(&pack_rows_3x4(t));
        }
        out
    }

    /// Pushes the prototype, the count and every transform into `sink`.
    pub fn upload<S: InstanceSink<Prototype = P>>(self, sink: &mut S) {
        sink.set_prototype(self.prototype);
        sink.set_instance_count(self.transforms.len());
        for (i, t) in self.transforms.into_iter().enumerate() {
            sink.set_instance_transform(i, t);
        }
    }
}

/// Packs an affine transform as three rows of `(x, y, z, origin)`.
pub fn pack_rows_3x4(t: &Affine3A) -> [f32; FLOATS_PER_INSTANCE] {
    let m = t.matrix3;
    let o = t.translation;
    #[rustfmt::skip]
    let rows = [
        m.x_axis.x, m.y_axis.x, m.z_axis.x, o.x,
        m.x_axis.y, m.y_axis.y, m.z_axis.y, o.y,
        m.x_axis.z, m.y_axis.z, m.z_axis.z, o.z,
    ];
    rows
}
