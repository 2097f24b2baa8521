//! Loading clipped loss grids from disk.
//!
//! Clipping to an area of interest happens upstream; these readers accept its output either as
//! a JSON document or as a single-band TIFF.

pub mod json;
pub mod tiff_grid;

use std::path::Path;

use crate::foundation::core::LossGrid;
use crate::foundation::error::WarmingResult;

/// Load a loss grid, choosing the reader from the file extension (`.tif`/`.tiff`, else JSON).
pub fn load_loss_grid(path: impl AsRef<Path>) -> WarmingResult<LossGrid> {
    let path = path.as_ref();
    let is_tiff = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tif") || e.eq_ignore_ascii_case("tiff"));
    if is_tiff {
        tiff_grid::from_path(path)
    } else {
        json::from_path(path)
    }
}
