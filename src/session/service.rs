use crate::artifact::sink::ArtifactSink;
use crate::foundation::core::{Grid, LossGrid};
use crate::foundation::error::WarmingResult;
use crate::model::config::EngineConfig;
use crate::predict::engine::Predictor;
use crate::render::colormap::Colormap;
use crate::render::geotiff::{GeoReference, GeoTiffOptions, encode_geotiff};
use crate::render::quantize::{Quantized, rescale_and_quantize_masked};
use crate::session::fingerprint::fingerprint_request;
use crate::session::request::{PredictionRequest, PredictionResponse, SessionKeys};

/// Everything produced while handling one request.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub response: PredictionResponse,
    /// Byte grid as written: nodata outside the area, the data byte range inside it.
    pub quantized: Quantized,
    /// Cells inside the area of interest.
    pub valid: Grid<bool>,
}

/// Request handler: predict, quantize, package, store.
///
/// Owns no per-caller state. Session keys travel in the request and come back in the
/// response; [`PredictionService::cleanup`] takes them back explicitly.
pub struct PredictionService<S: ArtifactSink> {
    predictor: Predictor,
    colormap: Colormap,
    sink: S,
}

impl<S: ArtifactSink> PredictionService<S> {
    pub fn new(config: EngineConfig, sink: S) -> WarmingResult<Self> {
        let colormap = Colormap::parse(&config.render.colormap)?;
        let predictor = Predictor::new(config)?;
        Ok(Self {
            predictor,
            colormap,
            sink,
        })
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    pub fn colormap(&self) -> &Colormap {
        &self.colormap
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run the full pipeline for `req` over `grid` and store the artifact.
    ///
    /// Nothing is stored unless every stage succeeds.
    #[tracing::instrument(skip_all, fields(amount = req.amount, event_type = %req.event_type))]
    pub fn handle(&mut self, grid: &LossGrid, req: &PredictionRequest) -> WarmingResult<Outcome> {
        let event = req.event()?;
        let config = self.predictor.config();

        let prediction = self.predictor.predict(grid, &event)?;
        let valid = grid.valid_mask();
        let quantized =
            rescale_and_quantize_masked(&prediction.field, &valid, config.render.nodata)?;

        let georef = GeoReference {
            origin: grid.origin(),
            pixel: grid.pixel(),
        };
        let opts = GeoTiffOptions {
            nodata: config.render.nodata,
            block_rows: config.render.block_rows,
            colormap: Some(self.colormap.clone()),
        };
        let file = encode_geotiff(&quantized.bytes, &georef, &opts)?;

        let keys = match &req.blob_nm {
            Some(_) => req.session_keys(String::new),
            None => {
                let fp = fingerprint_request(grid, &event, config)?;
                req.session_keys(|| fp.blob_name())
            }
        };
        let artifact = self.sink.put(&keys.container, &keys.blob, &file)?;
        tracing::info!(
            min = quantized.min,
            max = quantized.max,
            uri = %artifact.uri,
            "prediction stored"
        );

        Ok(Outcome {
            response: PredictionResponse {
                min: quantized.min,
                max: quantized.max,
                artifact,
                session: keys,
                local_tier: prediction.local_tier,
                affected_area: prediction.affected_area,
            },
            quantized,
            valid,
        })
    }

    /// Delete the artifact stored for `keys`.
    pub fn cleanup(&mut self, keys: &SessionKeys) -> WarmingResult<()> {
        self.sink.remove(&keys.container, &keys.blob)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/service.rs"]
mod tests;
