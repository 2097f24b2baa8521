use crate::foundation::core::{LossGrid, WarmingField};
use crate::foundation::error::{WarmingError, WarmingResult};
use crate::model::config::{EngineConfig, LocalTier};
use crate::model::event::DeforestationEvent;
use crate::predict::compose::compose_with_factor;
use crate::predict::halo::{RingSet, decompose, decompose_on};
use crate::predict::local::LocalEstimator;
use crate::predict::nonlocal::aggregate;
use crate::render::quantize::{Quantized, rescale_and_quantize};

/// Output of one prediction, before quantization.
#[derive(Clone, Debug)]
pub struct Prediction {
    /// Composed warming field.
    pub field: WarmingField,
    /// Local regression tier chosen from the affected area.
    pub local_tier: LocalTier,
    /// Total affected area in squared map units.
    pub affected_area: f64,
}

impl Prediction {
    /// Rescale the field into bytes for display.
    pub fn quantize(&self) -> WarmingResult<Quantized> {
        rescale_and_quantize(&self.field)
    }
}

/// Warming prediction engine.
///
/// Holds a validated [`EngineConfig`] and every kernel it needs. A predictor is immutable after
/// construction and can be shared across threads; each [`Predictor::predict`] call is
/// independent.
#[derive(Debug)]
pub struct Predictor {
    config: EngineConfig,
    rings: RingSet,
    coefficients: Vec<f64>,
    local: LocalEstimator,
    pool: Option<rayon::ThreadPool>,
}

impl Predictor {
    pub fn new(config: EngineConfig) -> WarmingResult<Self> {
        config.validate()?;
        let ring_radii: Vec<(u32, u32)> = config
            .halo
            .rings
            .iter()
            .map(|r| (r.outer, r.inner))
            .collect();
        let rings = RingSet::new(&ring_radii)?;
        let coefficients = config.halo.effective_coefficients();
        let local = LocalEstimator::new(config.local.clone())?;
        let pool = if config.threading.parallel {
            Some(build_thread_pool(config.threading.threads)?)
        } else {
            None
        };
        Ok(Self {
            config,
            rings,
            coefficients,
            local,
            pool,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Predict warming for `event` over `grid`.
    ///
    /// Fails before producing any output if the grid exceeds the admission limit or the
    /// composed field contains a non-finite value.
    #[tracing::instrument(
        skip_all,
        fields(
            width = grid.width(),
            height = grid.height(),
            amount = event.amount(),
            event_type = %event.event_type()
        )
    )]
    pub fn predict(
        &self,
        grid: &LossGrid,
        event: &DeforestationEvent,
    ) -> WarmingResult<Prediction> {
        let cells = grid.values().len();
        if cells > self.config.limits.max_cells {
            return Err(WarmingError::validation(format!(
                "grid has {cells} cells, limit is {}",
                self.config.limits.max_cells
            )));
        }

        let loss = grid.loss_fractions(event.amount());

        let ring_fields = match &self.pool {
            Some(pool) => decompose_on(&loss, &self.rings, pool),
            None => decompose(&loss, &self.rings),
        };
        let nonlocal = aggregate(&ring_fields, &self.coefficients)?;
        let local = self.local.estimate(&loss, grid.pixel());

        let field = compose_with_factor(
            &local.field,
            &nonlocal,
            event.event_type(),
            self.config.fragmented_factor,
        )?;
        if let Some(i) = field.data().iter().position(|v| !v.is_finite()) {
            return Err(WarmingError::evaluation(format!(
                "warming field is non-finite at cell {i}"
            )));
        }

        tracing::debug!(
            area = local.area,
            tier = local.tier_index,
            "prediction complete"
        );
        Ok(Prediction {
            field,
            local_tier: local.tier,
            affected_area: local.area,
        })
    }
}

fn build_thread_pool(threads: Option<usize>) -> WarmingResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(WarmingError::validation(
            "threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| WarmingError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/predict/engine.rs"]
mod tests;
