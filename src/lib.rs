//! Surface warming prediction for forest-loss events.
//!
//! Given a clipped forest-loss raster and a deforestation scenario, the engine predicts the
//! local warming on deforested cells and the non-local warming in the halo around them, then
//! quantizes the result into a colour-mapped GeoTIFF for map display.
//!
//! # Pipeline overview
//!
//! 1. **Kernels**: `generate_kernel(outer, inner) -> Kernel` (normalized annuli)
//! 2. **Halo**: `decompose(loss, rings) -> Vec<Grid>` (one mutually exclusive field per ring)
//! 3. **Non-local**: `aggregate(ring_fields, coefficients) -> Grid`
//! 4. **Local**: `LocalEstimator::estimate(loss, pixel)` (area-dependent regression tier)
//! 5. **Compose**: `compose(local, nonlocal, event_type) -> Grid`
//! 6. **Quantize**: `rescale_and_quantize(field) -> Quantized`, or the masked variant for an
//!    area of interest, then `encode_geotiff`
//!
//! [`Predictor`] runs steps 1–5 from a validated [`EngineConfig`]; [`PredictionService`] adds
//! quantization, packaging and storage behind an [`ArtifactSink`].
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure core**: prediction has no side effects and no shared mutable state.
//! - **Zero padding**: cells outside the grid contribute nothing to any convolution.
#![forbid(unsafe_code)]

mod artifact;
mod foundation;
mod input;
mod kernel;
mod model;
mod predict;
mod render;
mod session;

pub use artifact::sink::{ArtifactRef, ArtifactSink, FileSink, InMemorySink};
pub use foundation::core::{Grid, LossGrid, PixelSize, WarmingField};
pub use foundation::error::{WarmingError, WarmingResult};
pub use input::json::GridDoc;
pub use input::load_loss_grid;
pub use kernel::annulus::{Kernel, Tap, generate_kernel};
pub use kernel::convolve::convolve_zero_padded;
pub use model::config::{
    EngineConfig, FRAGMENTED_FACTOR, HaloConfig, Limits, LocalTier, OutermostCoefficient,
    RenderConfig, Ring, Threading, default_local_tiers,
};
pub use model::event::{DeforestationEvent, EventType};
pub use predict::compose::{compose, compose_with_factor};
pub use predict::engine::{Prediction, Predictor};
pub use predict::halo::{RingSet, decompose, decompose_on};
pub use predict::local::{
    LocalEstimate, LocalEstimator, affected_area, estimate_local, select_tier,
};
pub use predict::nonlocal::aggregate;
pub use render::colormap::{Colormap, NAMED_RAMPS};
pub use render::geotiff::{GeoReference, GeoTiffOptions, encode_geotiff};
pub use render::preview::{encode_preview_png, render_preview};
pub use render::quantize::{
    Quantized, data_byte_range, rescale_and_quantize, rescale_and_quantize_masked,
    rescale_with_range,
};
pub use session::fingerprint::{RequestFingerprint, fingerprint_request};
pub use session::request::{
    DEFAULT_CONTAINER, PredictionRequest, PredictionResponse, SessionKeys,
};
pub use session::service::{Outcome, PredictionService};

/// Loss-grid readers for individual formats.
pub mod readers {
    pub use crate::input::json::{from_path as json_from_path, from_reader as json_from_reader};
    pub use crate::input::tiff_grid::{
        from_path as tiff_from_path, from_reader as tiff_from_reader,
    };
}
