use crate::artifact::sink::ArtifactRef;
use crate::foundation::error::WarmingResult;
use crate::model::config::LocalTier;
use crate::model::event::{DeforestationEvent, EventType};

/// Container used when a request names none.
pub const DEFAULT_CONTAINER: &str = "predictions";

/// Storage keys for one caller's artifact.
///
/// Owned by the caller: returned in every response and passed back for cleanup.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionKeys {
    pub container: String,
    pub blob: String,
}

/// Incoming prediction request, as marshalled by the HTTP layer.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PredictionRequest {
    /// Percentage of cover removed, in `(0, 100]`.
    pub amount: f64,
    /// `"clear-fell"` or `"fragmented"`.
    pub event_type: String,
    #[serde(default)]
    pub container_nm: Option<String>,
    #[serde(default)]
    pub blob_nm: Option<String>,
}

impl PredictionRequest {
    pub fn event(&self) -> WarmingResult<DeforestationEvent> {
        let event_type: EventType = self.event_type.parse()?;
        DeforestationEvent::new(self.amount, event_type)
    }

    /// Caller-supplied keys, falling back to [`DEFAULT_CONTAINER`] and `default_blob`.
    pub fn session_keys(&self, default_blob: impl FnOnce() -> String) -> SessionKeys {
        SessionKeys {
            container: self
                .container_nm
                .clone()
                .unwrap_or_else(|| DEFAULT_CONTAINER.to_owned()),
            blob: self.blob_nm.clone().unwrap_or_else(default_blob),
        }
    }
}

/// Result returned to the caller: legend range plus where the artifact lives.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PredictionResponse {
    /// Smallest predicted warming; colour index 0.
    pub min: f64,
    /// Largest predicted warming; colour index 255.
    pub max: f64,
    pub artifact: ArtifactRef,
    pub session: SessionKeys,
    pub local_tier: LocalTier,
    pub affected_area: f64,
}
