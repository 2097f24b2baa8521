use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Grid, LossGrid, PixelSize};
use crate::foundation::error::{WarmingError, WarmingResult};

/// JSON shape of a clipped loss grid. `values` is row-major.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct GridDoc {
    pub width: usize,
    pub height: usize,
    pub pixel_width: f64,
    pub pixel_height: f64,
    #[serde(default)]
    pub nodata: Option<f64>,
    /// Upper-left corner in map coordinates.
    #[serde(default)]
    pub origin: Option<[f64; 2]>,
    pub values: Vec<f64>,
}

impl GridDoc {
    pub fn into_loss_grid(self) -> WarmingResult<LossGrid> {
        let values = Grid::new(self.width, self.height, self.values)?;
        let pixel = PixelSize::new(self.pixel_width, self.pixel_height)?;
        let grid = LossGrid::new(values, pixel, self.nodata)?;
        Ok(match self.origin {
            Some([x, y]) => grid.with_origin(x, y),
            None => grid,
        })
    }
}

pub fn from_reader<R: std::io::Read>(r: R) -> WarmingResult<LossGrid> {
    let doc: GridDoc = serde_json::from_reader(r)
        .map_err(|e| WarmingError::serde(format!("parse loss grid JSON: {e}")))?;
    doc.into_loss_grid()
}

pub fn from_path(path: impl AsRef<Path>) -> WarmingResult<LossGrid> {
    let path = path.as_ref();
    let f = File::open(path)
        .with_context(|| format!("open loss grid '{}'", path.display()))?;
    from_reader(BufReader::new(f))
}

#[cfg(test)]
#[path = "../../tests/unit/input/json.rs"]
mod tests;
