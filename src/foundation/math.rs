use std::ops::RangeInclusive;

/// Minimum and maximum over `values`, or `None` when empty or any value is non-finite.
pub(crate) fn finite_min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut it = values.iter().copied();
    let first = it.next()?;
    if !first.is_finite() {
        return None;
    }
    let mut lo = first;
    let mut hi = first;
    for v in it {
        if !v.is_finite() {
            return None;
        }
        lo = lo.min(v);
        hi = hi.max(v);
    }
    Some((lo, hi))
}

/// Linear map of `v` from `[lo, hi]` onto `0..=255`, rounded half away from zero and clamped.
///
/// Callers guarantee `hi > lo`.
pub(crate) fn rescale_to_u8(v: f64, lo: f64, hi: f64) -> u8 {
    rescale_to_bytes(v, lo, hi, 0..=255)
}

/// Linear map of `v` from `[lo, hi]` onto `bytes`, rounded half away from zero and clamped.
///
/// Callers guarantee `hi > lo`.
pub(crate) fn rescale_to_bytes(v: f64, lo: f64, hi: f64, bytes: RangeInclusive<u8>) -> u8 {
    let first = f64::from(*bytes.start());
    let last = f64::from(*bytes.end());
    let t = first + (v - lo) / (hi - lo) * (last - first);
    t.round().clamp(first, last) as u8
}
