use crate::foundation::core::Grid;
use crate::foundation::error::{WarmingError, WarmingResult};

/// Weighted sum of ring fields: `Σ coefficients[i] * ring_fields[i]`.
pub fn aggregate(ring_fields: &[Grid<f64>], coefficients: &[f64]) -> WarmingResult<Grid<f64>> {
    let Some(first) = ring_fields.first() else {
        return Err(WarmingError::validation("aggregate needs at least one ring field"));
    };
    if ring_fields.len() != coefficients.len() {
        return Err(WarmingError::validation(format!(
            "{} ring fields but {} coefficients",
            ring_fields.len(),
            coefficients.len()
        )));
    }

    let mut out = Grid::filled(first.width(), first.height(), 0.0);
    for (field, &m) in ring_fields.iter().zip(coefficients) {
        if !field.same_shape(first) {
            return Err(WarmingError::validation("ring fields differ in shape"));
        }
        for (acc, &v) in out.data_mut().iter_mut().zip(field.data()) {
            *acc += v * m;
        }
    }
    Ok(out)
}
