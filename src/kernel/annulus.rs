use crate::foundation::error::{WarmingError, WarmingResult};

/// Normalized annular averaging kernel.
///
/// The kernel is a `(2 * outer + 1)` square. Cells whose squared distance from the centre is at
/// most `outer²` are active, the centre cell never is, and with `inner > 0` every cell within
/// `inner²` is dropped as well. Active cells share equal weight so the kernel sums to 1.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Kernel {
    outer_radius: u32,
    inner_radius: u32,
    size: usize,
    weights: Vec<f64>,
    #[serde(skip)]
    taps: Vec<Tap>,
}

/// One non-zero kernel cell, as an offset from the centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tap {
    pub dx: isize,
    pub dy: isize,
    pub weight: f64,
}

/// Build the annulus between `inner_radius` (exclusive) and `outer_radius` (inclusive).
pub fn generate_kernel(outer_radius: u32, inner_radius: u32) -> WarmingResult<Kernel> {
    if outer_radius < 1 {
        return Err(WarmingError::invalid_radius(format!(
            "outer radius must be >= 1, got {outer_radius}"
        )));
    }
    if inner_radius >= outer_radius {
        return Err(WarmingError::invalid_radius(format!(
            "inner radius {inner_radius} must be < outer radius {outer_radius}"
        )));
    }

    let r = outer_radius as i64;
    let outer_sq = r * r;
    let inner_sq = i64::from(inner_radius) * i64::from(inner_radius);
    let size = (2 * r + 1) as usize;

    let mut active = vec![false; size * size];
    let mut count = 0usize;
    for y in -r..=r {
        for x in -r..=r {
            let d2 = x * x + y * y;
            let on = d2 <= outer_sq && d2 != 0 && !(inner_radius > 0 && d2 <= inner_sq);
            if on {
                active[((y + r) as usize) * size + (x + r) as usize] = true;
                count += 1;
            }
        }
    }
    if count == 0 {
        return Err(WarmingError::invalid_radius(format!(
            "annulus ({inner_radius}, {outer_radius}] has no active cells"
        )));
    }

    let w = 1.0 / count as f64;
    let weights: Vec<f64> = active.iter().map(|&on| if on { w } else { 0.0 }).collect();
    let taps = active
        .iter()
        .enumerate()
        .filter(|(_, on)| **on)
        .map(|(i, _)| Tap {
            dx: (i % size) as isize - r as isize,
            dy: (i / size) as isize - r as isize,
            weight: w,
        })
        .collect();

    Ok(Kernel {
        outer_radius,
        inner_radius,
        size,
        weights,
        taps,
    })
}

impl Kernel {
    pub fn outer_radius(&self) -> u32 {
        self.outer_radius
    }

    pub fn inner_radius(&self) -> u32 {
        self.inner_radius
    }

    /// Side length of the square kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Dense row-major weights, `size * size` long.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight at offset `(dx, dy)` from the centre; zero outside the kernel.
    pub fn weight(&self, dx: isize, dy: isize) -> f64 {
        let r = self.outer_radius as isize;
        if dx.abs() > r || dy.abs() > r {
            return 0.0;
        }
        self.weights[((dy + r) as usize) * self.size + (dx + r) as usize]
    }

    pub fn taps(&self) -> &[Tap] {
        &self.taps
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/annulus.rs"]
mod tests;
