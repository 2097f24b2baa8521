use crate::foundation::core::WarmingField;
use crate::foundation::error::{WarmingError, WarmingResult};
use crate::model::config::FRAGMENTED_FACTOR;
use crate::model::event::EventType;

/// Sum local and non-local warming, halving it for fragmented loss.
pub fn compose(
    local: &WarmingField,
    nonlocal: &WarmingField,
    event_type: EventType,
) -> WarmingResult<WarmingField> {
    compose_with_factor(local, nonlocal, event_type, FRAGMENTED_FACTOR)
}

/// [`compose`] with an explicit fragmented attenuation factor.
///
/// The field is not clamped: negative values from pathological inputs pass through.
pub fn compose_with_factor(
    local: &WarmingField,
    nonlocal: &WarmingField,
    event_type: EventType,
    fragmented_factor: f64,
) -> WarmingResult<WarmingField> {
    if !local.same_shape(nonlocal) {
        return Err(WarmingError::validation(format!(
            "local field is {}x{} but non-local field is {}x{}",
            local.width(),
            local.height(),
            nonlocal.width(),
            nonlocal.height()
        )));
    }
    let scale = match event_type {
        EventType::ClearFell => 1.0,
        EventType::Fragmented => fragmented_factor,
    };
    let mut out = local.clone();
    for (acc, &v) in out.data_mut().iter_mut().zip(nonlocal.data()) {
        *acc = (*acc + v) * scale;
    }
    Ok(out)
}
