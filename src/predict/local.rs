use crate::foundation::core::{Grid, PixelSize, WarmingField};
use crate::foundation::error::WarmingResult;
use crate::kernel::annulus::{Kernel, generate_kernel};
use crate::kernel::convolve::convolve_zero_padded;
use crate::model::config::{LocalTier, default_local_tiers, validate_local_tiers};

/// Direct-loss warming together with the tier that produced it.
#[derive(Clone, Debug)]
pub struct LocalEstimate {
    pub field: WarmingField,
    pub tier: LocalTier,
    pub tier_index: usize,
    /// Total affected area in squared map units.
    pub area: f64,
}

/// Local warming estimator with one precomputed full-disk kernel per tier.
#[derive(Clone, Debug)]
pub struct LocalEstimator {
    tiers: Vec<LocalTier>,
    kernels: Vec<Kernel>,
}

impl LocalEstimator {
    pub fn new(tiers: Vec<LocalTier>) -> WarmingResult<Self> {
        validate_local_tiers(&tiers)?;
        let kernels = tiers
            .iter()
            .map(|t| generate_kernel(t.kernel_radius, 0))
            .collect::<WarmingResult<Vec<_>>>()?;
        Ok(Self { tiers, kernels })
    }

    pub fn tiers(&self) -> &[LocalTier] {
        &self.tiers
    }

    /// Average `loss` over the tier kernel, scale by the tier slope, and keep only cells with
    /// direct loss.
    pub fn estimate(&self, loss: &Grid<f64>, pixel: PixelSize) -> LocalEstimate {
        let area = affected_area(loss, pixel);
        let tier_index = select_tier(&self.tiers, area);
        let tier = self.tiers[tier_index];
        tracing::debug!(
            area,
            tier_index,
            slope = tier.slope,
            kernel_radius = tier.kernel_radius,
            "selected local tier"
        );

        let mut field = convolve_zero_padded(loss, &self.kernels[tier_index]);
        for (v, &direct) in field.data_mut().iter_mut().zip(loss.data()) {
            *v = if direct == 0.0 { 0.0 } else { *v * tier.slope };
        }
        LocalEstimate {
            field,
            tier,
            tier_index,
            area,
        }
    }
}

impl Default for LocalEstimator {
    fn default() -> Self {
        Self::new(default_local_tiers()).expect("default local tiers are valid")
    }
}

/// Local warming using the default tier table.
pub fn estimate_local(
    loss: &Grid<f64>,
    pixel_width: f64,
    pixel_height: f64,
) -> WarmingResult<(WarmingField, LocalTier)> {
    let pixel = PixelSize::new(pixel_width, pixel_height)?;
    let est = LocalEstimator::default().estimate(loss, pixel);
    Ok((est.field, est.tier))
}

/// Sum of positive loss fractions times the cell area.
pub fn affected_area(loss: &Grid<f64>, pixel: PixelSize) -> f64 {
    let total: f64 = loss.data().iter().filter(|&&v| v > 0.0).sum();
    total * pixel.area()
}

/// Index of the first tier whose threshold is strictly above `area`; the last tier otherwise.
pub fn select_tier(tiers: &[LocalTier], area: f64) -> usize {
    tiers
        .iter()
        .position(|t| area < t.area_threshold)
        .unwrap_or(tiers.len().saturating_sub(1))
}

#[cfg(test)]
#[path = "../../tests/unit/predict/local.rs"]
mod tests;
