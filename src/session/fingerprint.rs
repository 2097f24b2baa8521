use xxhash_rust::xxh3::Xxh3;

use crate::foundation::core::LossGrid;
use crate::foundation::error::{WarmingError, WarmingResult};
use crate::model::config::EngineConfig;
use crate::model::event::DeforestationEvent;

/// Stable 64-bit hash of everything that determines a prediction's output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestFingerprint(pub u64);

impl RequestFingerprint {
    /// Artifact name derived from the fingerprint.
    pub fn blob_name(self) -> String {
        format!("warming-{:016x}.tif", self.0)
    }
}

pub fn fingerprint_request(
    grid: &LossGrid,
    event: &DeforestationEvent,
    config: &EngineConfig,
) -> WarmingResult<RequestFingerprint> {
    let mut h = Xxh3::new();
    h.update(&(grid.width() as u64).to_le_bytes());
    h.update(&(grid.height() as u64).to_le_bytes());
    for v in grid.values().data() {
        h.update(&v.to_bits().to_le_bytes());
    }
    let px = grid.pixel();
    h.update(&px.width.to_bits().to_le_bytes());
    h.update(&px.height.to_bits().to_le_bytes());
    match grid.nodata() {
        Some(nd) => {
            h.update(&[1]);
            h.update(&nd.to_bits().to_le_bytes());
        }
        None => h.update(&[0]),
    }
    for c in grid.origin() {
        h.update(&c.to_bits().to_le_bytes());
    }
    h.update(&event.amount().to_bits().to_le_bytes());
    h.update(event.event_type().as_str().as_bytes());
    let cfg = serde_json::to_vec(config)
        .map_err(|e| WarmingError::serde(format!("serialize engine config: {e}")))?;
    h.update(&cfg);
    Ok(RequestFingerprint(h.digest()))
}
