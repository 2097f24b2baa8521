use crate::foundation::core::{Grid, WarmingField};
use crate::foundation::error::{WarmingError, WarmingResult};
use std::ops::RangeInclusive;

use crate::foundation::math::{finite_min_max, rescale_to_bytes, rescale_to_u8};

/// Byte-quantized warming field with the range it was stretched from.
#[derive(Clone, Debug, PartialEq)]
pub struct Quantized {
    pub bytes: Grid<u8>,
    /// Smallest value of the source field; maps to 0.
    pub min: f64,
    /// Largest value of the source field; maps to 255.
    pub max: f64,
}

impl Quantized {
    /// Whether the source field was constant, leaving no range to stretch.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }
}

/// Stretch `field` linearly from its own `[min, max]` onto `0..=255`.
///
/// A constant field has no range to stretch: it quantizes to all zeros and reports
/// `min == max ==` the constant (so an all-zero field gives `min = max = 0`).
pub fn rescale_and_quantize(field: &WarmingField) -> WarmingResult<Quantized> {
    if field.is_empty() {
        return Err(WarmingError::empty_grid("cannot quantize a zero-size field"));
    }
    let (min, max) = finite_min_max(field.data())
        .ok_or_else(|| WarmingError::evaluation("cannot quantize a non-finite field"))?;

    let bytes = if max > min {
        field.map(|v| rescale_to_u8(v, min, max))
    } else {
        tracing::debug!(value = min, "constant field, emitting all-zero bytes");
        Grid::filled(field.width(), field.height(), 0u8)
    };
    Ok(Quantized { bytes, min, max })
}

/// Byte values left for data cells once `nodata` is reserved.
///
/// Only the two end bytes can be reserved without splitting the ramp.
pub fn data_byte_range(nodata: u8) -> WarmingResult<RangeInclusive<u8>> {
    match nodata {
        0 => Ok(1..=255),
        255 => Ok(0..=254),
        other => Err(WarmingError::validation(format!(
            "nodata byte must be 0 or 255, got {other}"
        ))),
    }
}

/// Stretch only the cells inside `valid` and write `nodata` everywhere else.
///
/// `min` and `max` come from valid cells alone, and valid cells use [`data_byte_range`], so no
/// drawn cell shares the nodata byte. A constant area maps to the lowest data byte.
pub fn rescale_and_quantize_masked(
    field: &WarmingField,
    valid: &Grid<bool>,
    nodata: u8,
) -> WarmingResult<Quantized> {
    if !field.same_shape(valid) {
        return Err(WarmingError::validation("nodata mask shape differs from field"));
    }
    let range = data_byte_range(nodata)?;
    let inside: Vec<f64> = field
        .data()
        .iter()
        .zip(valid.data())
        .filter(|&(_, &ok)| ok)
        .map(|(&v, _)| v)
        .collect();
    if inside.is_empty() {
        return Err(WarmingError::empty_grid("no cell inside the area of interest"));
    }
    let (min, max) = finite_min_max(&inside)
        .ok_or_else(|| WarmingError::evaluation("cannot quantize a non-finite field"))?;

    let lowest = *range.start();
    let mut bytes = Grid::filled(field.width(), field.height(), nodata);
    for ((b, &v), &ok) in bytes.data_mut().iter_mut().zip(field.data()).zip(valid.data()) {
        if !ok {
            continue;
        }
        *b = if max > min {
            rescale_to_bytes(v, min, max, range.clone())
        } else {
            lowest
        };
    }
    tracing::debug!(min, max, nodata, "quantized area of interest");
    Ok(Quantized { bytes, min, max })
}

/// Stretch `field` from an explicit `[min, max]`, clamping values outside it.
pub fn rescale_with_range(field: &WarmingField, min: f64, max: f64) -> WarmingResult<Grid<u8>> {
    if !min.is_finite() || !max.is_finite() {
        return Err(WarmingError::degenerate_range(format!(
            "range bounds must be finite, got [{min}, {max}]"
        )));
    }
    if max <= min {
        return Err(WarmingError::degenerate_range(format!(
            "range max must exceed min, got [{min}, {max}]"
        )));
    }
    if field.data().iter().any(|v| !v.is_finite()) {
        return Err(WarmingError::evaluation("cannot quantize a non-finite field"));
    }
    Ok(field.map(|v| rescale_to_u8(v, min, max)))
}

#[cfg(test)]
#[path = "../../tests/unit/render/quantize.rs"]
mod tests;
