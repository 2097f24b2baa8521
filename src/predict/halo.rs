use rayon::prelude::*;

use crate::foundation::core::Grid;
use crate::foundation::error::{WarmingError, WarmingResult};
use crate::kernel::annulus::{Kernel, generate_kernel};
use crate::kernel::convolve::convolve_zero_padded;

/// Annular kernels in priority order: nearer rings claim cells before farther ones.
#[derive(Clone, Debug)]
pub struct RingSet {
    kernels: Vec<Kernel>,
}

impl RingSet {
    /// Build kernels for `(outer, inner)` pairs. Outer radii must be strictly increasing.
    pub fn new(rings: &[(u32, u32)]) -> WarmingResult<Self> {
        if rings.is_empty() {
            return Err(WarmingError::validation("ring set must be non-empty"));
        }
        let mut kernels = Vec::with_capacity(rings.len());
        for (i, &(outer, inner)) in rings.iter().enumerate() {
            if i > 0 && outer <= rings[i - 1].0 {
                return Err(WarmingError::validation(format!(
                    "ring outer radii must be strictly increasing ({} then {outer})",
                    rings[i - 1].0
                )));
            }
            kernels.push(generate_kernel(outer, inner)?);
        }
        Ok(Self { kernels })
    }

    pub fn kernels(&self) -> &[Kernel] {
        &self.kernels
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}

/// Split the halo of `loss` into one field per ring.
///
/// Each ring's convolution is zeroed on directly deforested cells and on every cell an earlier
/// ring already claimed, so a cell's halo is attributed to exactly one ring.
pub fn decompose(loss: &Grid<f64>, rings: &RingSet) -> Vec<Grid<f64>> {
    let raw = rings
        .kernels()
        .iter()
        .map(|k| convolve_zero_padded(loss, k))
        .collect();
    claim_in_priority_order(loss, raw)
}

/// [`decompose`] with the per-ring convolutions run on `pool`.
///
/// Masking still runs in ring order afterwards, so the result is identical to the sequential
/// path.
pub fn decompose_on(loss: &Grid<f64>, rings: &RingSet, pool: &rayon::ThreadPool) -> Vec<Grid<f64>> {
    let raw = pool.install(|| {
        rings
            .kernels()
            .par_iter()
            .map(|k| convolve_zero_padded(loss, k))
            .collect::<Vec<_>>()
    });
    claim_in_priority_order(loss, raw)
}

fn claim_in_priority_order(loss: &Grid<f64>, mut raw: Vec<Grid<f64>>) -> Vec<Grid<f64>> {
    let direct = loss.data();
    let mut claimed = vec![false; direct.len()];
    for field in &mut raw {
        for (i, v) in field.data_mut().iter_mut().enumerate() {
            if direct[i] != 0.0 || claimed[i] {
                *v = 0.0;
            } else if *v != 0.0 {
                claimed[i] = true;
            }
        }
    }
    raw
}

#[cfg(test)]
#[path = "../../tests/unit/predict/halo.rs"]
mod tests;
