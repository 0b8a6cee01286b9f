//! Elevation ramp texture.
//!
//! The sculpted mesh carries a 1D elevation coordinate in `uv.x`. This module
//! renders the matching lookup texture: water below the beach level, a sand
//! band, vegetation green peaking at the vegetation level, then rock and snow
//! toward the mountain level.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Rgb};
use thiserror::Error;

use crate::sculpt::elevation::{inverse_lerp, lerp};
use crate::sculpt::PlanetConfig;

/// Errors that can occur during ramp export.
#[derive(Error, Debug)]
pub enum RampExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid ramp size: {0}x{1}")]
    InvalidSize(u32, u32),
}

/// Options for ramp export.
#[derive(Debug, Clone)]
pub struct RampOptions {
    pub width: u32,
    pub height: u32,
    pub compression: CompressionType,
    pub filter: FilterType,
}

impl Default for RampOptions {
    fn default() -> Self {
        Self {
            width: 256,
            height: 8,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

const DEEP_WATER: [f32; 3] = [16.0, 48.0, 112.0];
const SHALLOW_WATER: [f32; 3] = [64.0, 140.0, 190.0];
const SAND: [f32; 3] = [220.0, 205.0, 150.0];
const GRASS: [f32; 3] = [70.0, 130.0, 60.0];
const ROCK: [f32; 3] = [110.0, 100.0, 90.0];
const SNOW: [f32; 3] = [245.0, 245.0, 250.0];

/// Color stops keyed by radial distance, in ascending order.
fn color_stops(config: &PlanetConfig) -> [(f32, [f32; 3]); 6] {
    let rock_level = (config.vegetation_level + config.mountain_level) * 0.5;
    [
        (config.sea_level, DEEP_WATER),
        (config.beach_level, SHALLOW_WATER),
        (config.beach_level, SAND),
        (config.vegetation_level, GRASS),
        (rock_level, ROCK),
        (config.mountain_level, SNOW),
    ]
}

/// Color of the ramp at elevation coordinate `u`. Values outside `[0, 1]`
/// take the end colors.
pub fn ramp_color(u: f32, config: &PlanetConfig) -> [u8; 3] {
    let radius = lerp(config.sea_level, config.mountain_level, u);
    let stops = color_stops(config);

    let color = if radius <= stops[0].0 {
        stops[0].1
    } else if radius >= stops[stops.len() - 1].0 {
        stops[stops.len() - 1].1
    } else {
        // Last stop whose level is <= radius; equal levels make a hard edge.
        let hi = stops.iter().position(|&(level, _)| level > radius).unwrap_or(stops.len() - 1);
        let (lo_level, lo_color) = stops[hi - 1];
        let (hi_level, hi_color) = stops[hi];
        let t = inverse_lerp(lo_level, hi_level, radius).clamp(0.0, 1.0);
        [
            lerp(lo_color[0], hi_color[0], t),
            lerp(lo_color[1], hi_color[1], t),
            lerp(lo_color[2], hi_color[2], t),
        ]
    };

    color.map(|c| c.round().clamp(0.0, 255.0) as u8)
}

/// Writes the ramp as an 8-bit RGB PNG. Column `x` samples `u = x / (width - 1)`.
pub fn export_ramp_png(path: &Path, config: &PlanetConfig, options: &RampOptions) -> Result<(), RampExportError> {
    if options.width < 2 || options.height == 0 {
        return Err(RampExportError::InvalidSize(options.width, options.height));
    }

    let mut img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(options.width, options.height);
    for x in 0..options.width {
        let u = x as f32 / (options.width - 1) as f32;
        let color = Rgb(ramp_color(u, config));
        for y in 0..options.height {
            img.put_pixel(x, y, color);
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(
        img.as_raw(),
        options.width,
        options.height,
        image::ExtendedColorType::Rgb8,
    )?;

    Ok(())
}
