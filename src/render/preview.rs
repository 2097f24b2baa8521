use std::io::Cursor;

use anyhow::Context as _;

use crate::foundation::core::Grid;
use crate::foundation::error::{WarmingError, WarmingResult};
use crate::render::colormap::Colormap;

/// Colour the byte grid through `colormap`. Cells outside `valid` become fully transparent.
pub fn render_preview(
    bytes: &Grid<u8>,
    colormap: &Colormap,
    valid: Option<&Grid<bool>>,
) -> WarmingResult<image::RgbaImage> {
    if let Some(mask) = valid
        && !mask.same_shape(bytes)
    {
        return Err(WarmingError::validation("preview mask shape differs from raster"));
    }
    let width = u32::try_from(bytes.width())
        .map_err(|_| WarmingError::validation("raster too wide for preview"))?;
    let height = u32::try_from(bytes.height())
        .map_err(|_| WarmingError::validation("raster too tall for preview"))?;

    let mut rgba = Vec::with_capacity(bytes.len() * 4);
    for (i, &b) in bytes.data().iter().enumerate() {
        let [r, g, bl] = colormap.color(b);
        let a = match valid {
            Some(mask) if !mask.data()[i] => 0,
            _ => 255,
        };
        rgba.extend_from_slice(&[r, g, bl, a]);
    }
    image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| WarmingError::evaluation("preview buffer size mismatch"))
}

/// Encode a preview as PNG bytes.
pub fn encode_preview_png(img: &image::RgbaImage) -> WarmingResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .context("encode preview png")?;
    Ok(buf.into_inner())
}
