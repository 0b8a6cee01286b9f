//! Sculpting parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by [`PlanetConfig::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Parameter '{0}' must be finite, got {1}")]
    NotFinite(&'static str, f32),
    #[error("Parameter '{0}' must be >= 0, got {1}")]
    Negative(&'static str, f32),
    #[error("Sea level ({0}) must be below mountain level ({1})")]
    InvertedElevationRange(f32, f32),
    #[error("Level '{name}' ({value}) must lie between {min} and {max}")]
    LevelOutOfOrder {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("Instance scale range is inverted: min ({0}) > max ({1})")]
    InvertedScaleRange(f32, f32),
    #[error("Instance scale divisor must be > 0, got {0}")]
    InvalidScaleDivisor(f32),
}

/// Parameters for one planet sculpting run.
///
/// Levels are radial distances from the planet center; the source sphere is
/// expected to have unit radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    /// Number of erosion iterations.
    pub iterations: u32,
    /// Logistic steepness of the push/pull decision.
    pub sharpness: f32,
    /// Maximum displacement along the normal per iteration.
    pub displacement_step: f32,

    /// Radius mapped to elevation UV 0.
    pub sea_level: f32,
    /// Vertices at or below this radius never receive vegetation.
    pub beach_level: f32,
    /// Radius where vegetation acceptance peaks.
    pub vegetation_level: f32,
    /// Radius mapped to elevation UV 1.
    pub mountain_level: f32,

    /// Multiplier applied to `|dist - vegetation_level|` before squaring.
    pub vegetation_falloff: f32,
    /// Weight of the squared distance term in the acceptance curve.
    pub vegetation_falloff_weight: f32,

    /// Lower bound of the raw instance scale draw.
    pub instance_scale_min: f32,
    /// Upper bound of the raw instance scale draw.
    pub instance_scale_max: f32,
    /// The raw scale draw is divided by this.
    pub instance_scale_divisor: f32,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            iterations: 145,
            sharpness: 50.0,
            displacement_step: 0.01,

            sea_level: 0.9,
            beach_level: 1.0,
            vegetation_level: 1.02,
            mountain_level: 1.1,

            vegetation_falloff: 10.0,
            vegetation_falloff_weight: 10_000.0,

            instance_scale_min: 0.01,
            instance_scale_max: 0.03,
            instance_scale_divisor: 2.0,
        }
    }
}

impl PlanetConfig {
    /// Earth-like continents on a unit sphere.
    pub fn earth_like() -> Self {
        Self::default()
    }

    /// Fewer, coarser erosion iterations for fast previews.
    ///
    /// The step is scaled so the total displacement budget
    /// (`iterations * displacement_step`) is half that of the default.
    pub fn preview() -> Self {
        let base = Self::default();
        let iterations = 30;
        Self {
            iterations,
            displacement_step: base.displacement_step * base.iterations as f32 / iterations as f32 * 0.5,
            ..base
        }
    }

    /// Returns the `[min, max)` range of the final uniform instance scale.
    pub fn instance_scale_range(&self) -> (f32, f32) {
        (
            self.instance_scale_min / self.instance_scale_divisor,
            self.instance_scale_max / self.instance_scale_divisor,
        )
    }

    /// Checks that every parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("sharpness", self.sharpness),
            ("displacement_step", self.displacement_step),
            ("sea_level", self.sea_level),
            ("beach_level", self.beach_level),
            ("vegetation_level", self.vegetation_level),
            ("mountain_level", self.mountain_level),
            ("vegetation_falloff", self.vegetation_falloff),
            ("vegetation_falloff_weight", self.vegetation_falloff_weight),
            ("instance_scale_min", self.instance_scale_min),
            ("instance_scale_max", self.instance_scale_max),
            ("instance_scale_divisor", self.instance_scale_divisor),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(name, value));
            }
        }

        let non_negative = [
            ("sharpness", self.sharpness),
            ("displacement_step", self.displacement_step),
            ("vegetation_falloff", self.vegetation_falloff),
            ("vegetation_falloff_weight", self.vegetation_falloff_weight),
            ("instance_scale_min", self.instance_scale_min),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative(name, value));
            }
        }

        if self.sea_level >= self.mountain_level {
            return Err(ConfigError::InvertedElevationRange(self.sea_level, self.mountain_level));
        }
        // sea <= beach <= vegetation <= mountain
        let ordered = [
            ("beach_level", self.beach_level, self.sea_level, self.mountain_level),
            ("vegetation_level", self.vegetation_level, self.beach_level, self.mountain_level),
        ];
        for (name, value, min, max) in ordered {
            if value < min || value > max {
                return Err(ConfigError::LevelOutOfOrder { name, value, min, max });
            }
        }

        if self.instance_scale_min > self.instance_scale_max {
            return Err(ConfigError::InvertedScaleRange(
                self.instance_scale_min,
                self.instance_scale_max,
            ));
        }
        if self.instance_scale_divisor <= 0.0 {
            return Err(ConfigError::InvalidScaleDivisor(self.instance_scale_divisor));
        }

        Ok(())
    }
}
