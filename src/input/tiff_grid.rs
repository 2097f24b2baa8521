use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use anyhow::Context as _;
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

use crate::foundation::core::{Grid, LossGrid, PixelSize};
use crate::foundation::error::{WarmingError, WarmingResult};
use crate::render::geotiff::{TAG_GDAL_NODATA, TAG_MODEL_PIXEL_SCALE, TAG_MODEL_TIEPOINT};

/// Read a single-band TIFF as a loss grid.
///
/// 8-bit samples are cover percentages on a 0..=255 scale and are divided by 255; float samples
/// are taken as fractions. Georeferencing and nodata come from the GeoTIFF and GDAL tags when
/// present; without a pixel-scale tag every cell is one unit square.
pub fn from_reader<R: Read + Seek>(r: R) -> WarmingResult<LossGrid> {
    let mut dec = Decoder::new(r).context("open TIFF decoder")?;
    let (w, h) = dec.dimensions().context("read TIFF dimensions")?;
    let colortype = dec.colortype().context("read TIFF colour type")?;

    let scale = match colortype {
        ColorType::Gray(8) => 1.0 / 255.0,
        ColorType::Gray(32) | ColorType::Gray(64) => 1.0,
        other => {
            return Err(WarmingError::validation(format!(
                "loss grid TIFF must be single-band u8/f32/f64, got {other:?}"
            )));
        }
    };

    let pixel_scale = find_f64_vec(&mut dec, TAG_MODEL_PIXEL_SCALE)?;
    let tiepoint = find_f64_vec(&mut dec, TAG_MODEL_TIEPOINT)?;
    let nodata = match dec
        .find_tag(Tag::from_u16_exhaustive(TAG_GDAL_NODATA))
        .context("read GDAL nodata tag")?
    {
        Some(v) => {
            let s = v.into_string().context("GDAL nodata tag is not ASCII")?;
            let s = s.trim_end_matches('\0').trim();
            let nd: f64 = s.parse().map_err(|_| {
                WarmingError::validation(format!("GDAL nodata tag \"{s}\" is not a number"))
            })?;
            Some(nd * scale)
        }
        None => None,
    };

    let values: Vec<f64> = match dec.read_image().context("read TIFF pixels")? {
        DecodingResult::U8(px) => px.into_iter().map(|v| f64::from(v) * scale).collect(),
        DecodingResult::F32(px) => px.into_iter().map(f64::from).collect(),
        DecodingResult::F64(px) => px,
        _ => {
            return Err(WarmingError::validation(
                "loss grid TIFF sample format is not u8/f32/f64",
            ));
        }
    };

    let pixel = match pixel_scale.as_deref() {
        Some([sx, sy, ..]) => PixelSize::new(*sx, *sy)?,
        _ => PixelSize::new(1.0, 1.0)?,
    };
    let grid = LossGrid::new(Grid::new(w as usize, h as usize, values)?, pixel, nodata)?;
    Ok(match tiepoint.as_deref() {
        Some([_, _, _, x, y, ..]) => grid.with_origin(*x, *y),
        _ => grid,
    })
}

pub fn from_path(path: impl AsRef<Path>) -> WarmingResult<LossGrid> {
    let path = path.as_ref();
    let f = File::open(path)
        .with_context(|| format!("open loss grid '{}'", path.display()))?;
    from_reader(BufReader::new(f))
}

fn find_f64_vec<R: Read + Seek>(dec: &mut Decoder<R>, code: u16) -> WarmingResult<Option<Vec<f64>>> {
    let tag = Tag::from_u16_exhaustive(code);
    match dec.find_tag(tag).context("read GeoTIFF tag")? {
        Some(v) => Ok(Some(v.into_f64_vec().context("GeoTIFF tag is not numeric")?)),
        None => Ok(None),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/tiff_grid.rs"]
mod tests;
