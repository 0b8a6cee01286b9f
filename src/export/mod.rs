//! Export of sculpted planets to files.
//!
//! The mesh goes to Wavefront OBJ, instance transforms to a flat RAW float
//! buffer, and the elevation lookup ramp to PNG.

mod instances;
mod obj;
mod ramp;

pub use instances::{
    export_instances_raw, expected_file_size, write_instances_raw, InstanceExportError,
};
pub use obj::{export_mesh_obj, write_obj, ObjExportError};
pub use ramp::{export_ramp_png, ramp_color, RampExportError, RampOptions};
