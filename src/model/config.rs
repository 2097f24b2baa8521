use std::f64::consts::PI;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{WarmingError, WarmingResult};

/// Empirical non-local regression coefficients, per ring.
pub const HALO_COEFF_1: f64 = 3.08;
pub const HALO_COEFF_2: f64 = 1.18;
pub const HALO_COEFF_4: f64 = 0.72;
pub const HALO_COEFF_6: f64 = 0.62;
/// Fitted value for the outermost ring. Only applied under [`OutermostCoefficient::Fitted`].
pub const HALO_COEFF_8: f64 = 0.44;

/// Uniform scale applied to the composed field for fragmented loss.
pub const FRAGMENTED_FACTOR: f64 = 0.5;

/// One distance band of the halo decomposition.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ring {
    /// Outer radius in cells, inclusive.
    pub outer: u32,
    /// Inner radius in cells, exclusive. Zero keeps the whole disk except the centre.
    pub inner: u32,
    /// Regression multiplier for warming attributed to this band.
    pub coefficient: f64,
}

/// Which coefficient the outermost ring is weighted with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutermostCoefficient {
    /// Weight the outermost ring with the next-inner ring's coefficient.
    #[default]
    ReuseInner,
    /// Weight the outermost ring with its own listed coefficient.
    Fitted,
}

/// Ring set and coefficient policy for the non-local contribution.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HaloConfig {
    /// Rings in priority order (strictly increasing outer radius).
    pub rings: Vec<Ring>,
    pub outermost: OutermostCoefficient,
}

impl Default for HaloConfig {
    fn default() -> Self {
        Self {
            rings: vec![
                Ring {
                    outer: 1,
                    inner: 0,
                    coefficient: HALO_COEFF_1,
                },
                Ring {
                    outer: 2,
                    inner: 1,
                    coefficient: HALO_COEFF_2,
                },
                Ring {
                    outer: 4,
                    inner: 2,
                    coefficient: HALO_COEFF_4,
                },
                Ring {
                    outer: 6,
                    inner: 4,
                    coefficient: HALO_COEFF_6,
                },
                Ring {
                    outer: 8,
                    inner: 6,
                    coefficient: HALO_COEFF_8,
                },
            ],
            outermost: OutermostCoefficient::ReuseInner,
        }
    }
}

impl HaloConfig {
    /// Coefficients actually applied to each ring, after the outermost policy.
    pub fn effective_coefficients(&self) -> Vec<f64> {
        let mut out: Vec<f64> = self.rings.iter().map(|r| r.coefficient).collect();
        let n = out.len();
        if self.outermost == OutermostCoefficient::ReuseInner && n >= 2 {
            out[n - 1] = out[n - 2];
        }
        out
    }

    pub fn validate(&self) -> WarmingResult<()> {
        if self.rings.is_empty() {
            return Err(WarmingError::validation("halo ring set must be non-empty"));
        }
        if self.outermost == OutermostCoefficient::ReuseInner && self.rings.len() < 2 {
            return Err(WarmingError::validation(
                "outermost coefficient 'reuse-inner' needs at least two rings",
            ));
        }
        for (i, ring) in self.rings.iter().enumerate() {
            if ring.outer < 1 || ring.inner >= ring.outer {
                return Err(WarmingError::invalid_radius(format!(
                    "ring {i} has inner {} / outer {}",
                    ring.inner, ring.outer
                )));
            }
            if !ring.coefficient.is_finite() {
                return Err(WarmingError::validation(format!(
                    "ring {i} coefficient must be finite"
                )));
            }
            if i > 0 && ring.outer <= self.rings[i - 1].outer {
                return Err(WarmingError::validation(
                    "ring outer radii must be strictly increasing",
                ));
            }
        }
        Ok(())
    }
}

/// One regression tier of the local estimator.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LocalTier {
    /// Tier applies when the affected area is strictly below this value.
    pub area_threshold: f64,
    /// Warming per unit of averaged loss fraction.
    pub slope: f64,
    /// Radius of the full-disk averaging kernel.
    pub kernel_radius: u32,
}

/// Default local tiers: thresholds 1, 2π, 4π, 6π, 8π (map units squared).
pub fn default_local_tiers() -> Vec<LocalTier> {
    [
        (1.0, 1.93, 1),
        (2.0 * PI, 3.94, 2),
        (4.0 * PI, 4.23, 4),
        (6.0 * PI, 4.97, 6),
        (8.0 * PI, 5.1, 8),
    ]
    .into_iter()
    .map(|(area_threshold, slope, kernel_radius)| LocalTier {
        area_threshold,
        slope,
        kernel_radius,
    })
    .collect()
}

pub(crate) fn validate_local_tiers(tiers: &[LocalTier]) -> WarmingResult<()> {
    if tiers.is_empty() {
        return Err(WarmingError::validation("local tier table must be non-empty"));
    }
    for (i, t) in tiers.iter().enumerate() {
        if !t.area_threshold.is_finite() || t.area_threshold <= 0.0 {
            return Err(WarmingError::validation(format!(
                "local tier {i} area_threshold must be finite and > 0"
            )));
        }
        if !t.slope.is_finite() {
            return Err(WarmingError::validation(format!(
                "local tier {i} slope must be finite"
            )));
        }
        if t.kernel_radius < 1 {
            return Err(WarmingError::invalid_radius(format!(
                "local tier {i} kernel_radius must be >= 1"
            )));
        }
        if i > 0 && t.area_threshold <= tiers[i - 1].area_threshold {
            return Err(WarmingError::validation(
                "local tier area thresholds must be strictly increasing",
            ));
        }
    }
    Ok(())
}

/// Ring-level parallelism.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Threading {
    /// Convolve rings on a rayon pool.
    pub parallel: bool,
    /// Override rayon worker threads (parallel mode only).
    pub threads: Option<usize>,
}

/// Admission bounds checked before any convolution runs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Largest accepted grid, in cells.
    pub max_cells: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_cells: 4096 * 4096,
        }
    }
}

/// Output raster presentation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Named colour ramp attached to the byte grid.
    pub colormap: String,
    /// Byte value marking nodata in the artifact: 0 or 255, so data cells keep the rest.
    pub nodata: u8,
    /// Rows per compressed block in the GeoTIFF.
    pub block_rows: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            colormap: "ylorrd".to_owned(),
            nodata: 0,
            block_rows: 256,
        }
    }
}

/// Process-wide engine configuration, loaded and validated once before serving.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub halo: HaloConfig,
    pub local: Vec<LocalTier>,
    pub fragmented_factor: f64,
    pub threading: Threading,
    pub limits: Limits,
    pub render: RenderConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            halo: HaloConfig::default(),
            local: default_local_tiers(),
            fragmented_factor: FRAGMENTED_FACTOR,
            threading: Threading::default(),
            limits: Limits::default(),
            render: RenderConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> WarmingResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| WarmingError::serde(format!("parse engine config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> WarmingResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open engine config '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> WarmingResult<()> {
        self.halo.validate()?;
        validate_local_tiers(&self.local)?;
        if !self.fragmented_factor.is_finite() || self.fragmented_factor < 0.0 {
            return Err(WarmingError::validation(
                "fragmented_factor must be finite and >= 0",
            ));
        }
        if let Some(n) = self.threading.threads
            && n == 0
        {
            return Err(WarmingError::validation(
                "threading 'threads' must be >= 1 when set",
            ));
        }
        if self.limits.max_cells == 0 {
            return Err(WarmingError::validation("limits.max_cells must be > 0"));
        }
        if self.render.nodata != 0 && self.render.nodata != 255 {
            return Err(WarmingError::validation(format!(
                "render.nodata must be 0 or 255, got {}",
                self.render.nodata
            )));
        }
        if self.render.block_rows == 0 {
            return Err(WarmingError::validation("render.block_rows must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/config.rs"]
mod tests;
