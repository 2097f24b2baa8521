use crate::foundation::error::{WarmingError, WarmingResult};

/// Row-major 2D array with explicit dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

/// Predicted temperature anomaly per cell, same shape as the input grid.
pub type WarmingField = Grid<f64>;

impl<T: Copy> Grid<T> {
    /// Wrap `data` as a `width x height` grid. `data.len()` must equal `width * height`.
    pub fn new(width: usize, height: usize, data: Vec<T>) -> WarmingResult<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or_else(|| WarmingError::validation("grid size overflow"))?;
        if data.len() != expected {
            return Err(WarmingError::validation(format!(
                "grid data has {} cells, expected {width}x{height}={expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A `width x height` grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Cell at column `x`, row `y`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) -> WarmingResult<()> {
        if x >= self.width || y >= self.height {
            return Err(WarmingError::validation(format!(
                "cell ({x},{y}) outside {}x{} grid",
                self.width, self.height
            )));
        }
        self.data[y * self.width + x] = value;
        Ok(())
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

/// Ground size of one cell in the grid's map units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PixelSize {
    pub width: f64,
    pub height: f64,
}

impl PixelSize {
    pub fn new(width: f64, height: f64) -> WarmingResult<Self> {
        if !width.is_finite() || width <= 0.0 || !height.is_finite() || height <= 0.0 {
            return Err(WarmingError::validation(
                "pixel width/height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn area(self) -> f64 {
        self.width * self.height
    }
}

/// Clipped forest-loss raster handed to the engine.
///
/// Valid cells hold the fraction of the cell affected by the event, in `[0, 1]`. Cells equal to
/// `nodata` lie outside the area of interest: they contribute no loss and are written as nodata
/// in the output artifact.
#[derive(Clone, Debug)]
pub struct LossGrid {
    values: Grid<f64>,
    pixel: PixelSize,
    nodata: Option<f64>,
    origin: [f64; 2],
}

impl LossGrid {
    pub fn new(values: Grid<f64>, pixel: PixelSize, nodata: Option<f64>) -> WarmingResult<Self> {
        if values.is_empty() {
            return Err(WarmingError::empty_grid("grid has zero cells"));
        }
        let mut valid = 0usize;
        for (i, &v) in values.data().iter().enumerate() {
            if is_nodata(nodata, v) {
                continue;
            }
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(WarmingError::validation(format!(
                    "cell {i} has value {v}, expected a fraction in [0, 1]"
                )));
            }
            valid += 1;
        }
        if valid == 0 {
            return Err(WarmingError::empty_grid("every cell is nodata"));
        }
        Ok(Self {
            values,
            pixel,
            nodata,
            origin: [0.0, 0.0],
        })
    }

    /// Set the map coordinate of the grid's upper-left corner.
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = [x, y];
        self
    }

    pub fn values(&self) -> &Grid<f64> {
        &self.values
    }

    pub fn pixel(&self) -> PixelSize {
        self.pixel
    }

    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    pub fn origin(&self) -> [f64; 2] {
        self.origin
    }

    pub fn width(&self) -> usize {
        self.values.width()
    }

    pub fn height(&self) -> usize {
        self.values.height()
    }

    /// `true` for cells inside the area of interest.
    pub fn valid_mask(&self) -> Grid<bool> {
        self.values.map(|v| !is_nodata(self.nodata, v))
    }

    /// Per-cell loss fraction for an event removing `amount_pct` percent of the cover.
    pub fn loss_fractions(&self, amount_pct: f64) -> Grid<f64> {
        let scale = amount_pct / 100.0;
        self.values.map(|v| {
            if is_nodata(self.nodata, v) {
                0.0
            } else {
                v * scale
            }
        })
    }
}

fn is_nodata(nodata: Option<f64>, v: f64) -> bool {
    match nodata {
        Some(nd) if nd.is_nan() => v.is_nan(),
        Some(nd) => v == nd,
        None => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
