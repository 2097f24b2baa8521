use std::io::Cursor;

use anyhow::Context as _;
use tiff::encoder::{TiffEncoder, colortype, compression::Deflate};
use tiff::tags::{PhotometricInterpretation, Tag};

use crate::foundation::core::{Grid, PixelSize};
use crate::foundation::error::{WarmingError, WarmingResult};
use crate::render::colormap::Colormap;

pub(crate) const TAG_MODEL_PIXEL_SCALE: u16 = 33550;
pub(crate) const TAG_MODEL_TIEPOINT: u16 = 33922;
pub(crate) const TAG_GEO_KEY_DIRECTORY: u16 = 34735;
pub(crate) const TAG_GDAL_NODATA: u16 = 42113;

/// GeoKey directory for a geographic (EPSG:4326) raster with pixel-is-area semantics.
const GEO_KEYS_EPSG_4326: [u16; 16] = [
    1, 1, 0, 3, // header: version 1.1.0, three keys
    1024, 0, 1, 2, // GTModelType = geographic
    1025, 0, 1, 1, // GTRasterType = pixel is area
    2048, 0, 1, 4326, // GeographicType = WGS 84
];

/// Placement of the raster's upper-left corner and cell size, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoReference {
    pub origin: [f64; 2],
    pub pixel: PixelSize,
}

/// Encoding options for the output artifact.
#[derive(Clone, Debug)]
pub struct GeoTiffOptions {
    /// Byte value written to cells outside the area of interest.
    pub nodata: u8,
    /// Rows per deflate-compressed block.
    pub block_rows: u32,
    /// Palette attached to the band; `None` writes a plain greyscale band.
    pub colormap: Option<Colormap>,
}

/// Encode `bytes` as a single-band 8-bit GeoTIFF and return the file contents.
///
/// The raster is stored as deflate strips of `block_rows` rows, not as tiles, and carries no
/// overviews. Readers can fetch whole row bands but not arbitrary windows, so this is not a
/// Cloud Optimized GeoTIFF.
pub fn encode_geotiff(
    bytes: &Grid<u8>,
    georef: &GeoReference,
    opts: &GeoTiffOptions,
) -> WarmingResult<Vec<u8>> {
    if bytes.is_empty() {
        return Err(WarmingError::empty_grid("cannot encode a zero-size raster"));
    }
    if opts.block_rows == 0 {
        return Err(WarmingError::validation("block_rows must be > 0"));
    }
    let width = u32::try_from(bytes.width())
        .map_err(|_| WarmingError::validation("raster too wide for TIFF"))?;
    let height = u32::try_from(bytes.height())
        .map_err(|_| WarmingError::validation("raster too tall for TIFF"))?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut buf).context("create TIFF encoder")?;
        let mut image = encoder
            .new_image_with_compression::<colortype::Gray8, _>(width, height, Deflate::default())
            .context("start TIFF image")?;
        image
            .rows_per_strip(opts.block_rows.min(height))
            .context("set TIFF block size")?;

        let [ox, oy] = georef.origin;
        let dir = image.encoder();
        if let Some(cm) = &opts.colormap {
            dir.write_tag(
                Tag::PhotometricInterpretation,
                PhotometricInterpretation::RGBPalette.to_u16(),
            )
            .context("write photometric tag")?;
            dir.write_tag(Tag::ColorMap, &cm.to_tiff_colormap()[..])
                .context("write colour map")?;
        }
        dir.write_tag(
            Tag::Unknown(TAG_MODEL_PIXEL_SCALE),
            &[georef.pixel.width, georef.pixel.height, 0.0][..],
        )
        .context("write pixel scale")?;
        dir.write_tag(
            Tag::Unknown(TAG_MODEL_TIEPOINT),
            &[0.0, 0.0, 0.0, ox, oy, 0.0][..],
        )
        .context("write tiepoint")?;
        dir.write_tag(Tag::Unknown(TAG_GEO_KEY_DIRECTORY), &GEO_KEYS_EPSG_4326[..])
            .context("write geokeys")?;
        dir.write_tag(Tag::Unknown(TAG_GDAL_NODATA), opts.nodata.to_string().as_str())
            .context("write nodata")?;

        image.write_data(bytes.data()).context("write TIFF pixels")?;
    }
    tracing::debug!(
        width,
        height,
        size = buf.get_ref().len(),
        "encoded GeoTIFF"
    );
    Ok(buf.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/render/geotiff.rs"]
mod tests;
