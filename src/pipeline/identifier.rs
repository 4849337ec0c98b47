//! The plant identifier pipeline.
//!
//! Ties together model loading, preprocessing, inference, and decoding
//! behind a fire-and-forget `classify` API. Classification runs on a
//! dedicated worker thread owned by the pipeline so a UI event loop is never
//! blocked by the forward pass; every classify call delivers exactly one
//! outcome through the callback supplied at construction.

use crate::core::errors::ClassifyError;
use crate::core::inference::OrtEngine;
use crate::core::predictions::ClassifyOutcome;
use crate::pipeline::{CancelToken, PlantIdentifierConfig};
use crate::processors::{Preprocessor, ScoreDecoder};
use image::DynamicImage;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use tracing::{Level, debug, error, span};

/// State of a pipeline instance, resolved once at construction.
///
/// A half-initialized pipeline is unrepresentable: construction either
/// yields a `Ready` state with a live engine or a terminal `Failed` state
/// carrying the load failure reason. The state never changes afterwards.
enum PipelineState {
    /// Model loaded; classify calls run the full pipeline.
    Ready {
        engine: OrtEngine,
        preprocessor: Preprocessor,
        decoder: ScoreDecoder,
    },
    /// Model load failed; every classify call reports the stored reason.
    Failed { reason: String },
}

/// One queued classification request.
struct Job {
    image: DynamicImage,
    cancel: CancelToken,
}

/// The classification pipeline facade.
///
/// Construction immediately attempts to load the model asset. Classify calls
/// are queued to a single worker thread, which serializes forward passes on
/// one engine instance and delivers outcomes in submission order. Separate
/// `PlantIdentifier` instances are fully independent and may run
/// concurrently.
///
/// Dropping the identifier closes the queue and joins the worker, so the
/// engine and the mapped model memory are released only after the in-flight
/// call (if any) has finished and every queued call has received its outcome.
pub struct PlantIdentifier {
    state: Arc<PipelineState>,
    jobs: Option<mpsc::Sender<Job>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl std::fmt::Debug for PlantIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlantIdentifier")
            .field("ready", &self.is_ready())
            .finish()
    }
}

impl PlantIdentifier {
    /// Constructs a pipeline for the packaged plant model and immediately
    /// attempts to load it.
    ///
    /// `on_result` is the sole output channel back to the caller; it is
    /// invoked on the pipeline's worker thread, once per classify call.
    pub fn new(
        model_path: impl AsRef<Path>,
        on_result: impl Fn(ClassifyOutcome) + Send + 'static,
    ) -> Self {
        Self::with_config(model_path, PlantIdentifierConfig::default(), on_result)
    }

    /// Constructs a pipeline with an explicit configuration.
    pub fn with_config(
        model_path: impl AsRef<Path>,
        config: PlantIdentifierConfig,
        on_result: impl Fn(ClassifyOutcome) + Send + 'static,
    ) -> Self {
        let state = match Self::initialize(model_path.as_ref(), &config) {
            Ok(state) => state,
            Err(e) => {
                error!(error = %e, "pipeline initialization failed");
                PipelineState::Failed {
                    reason: e.to_string(),
                }
            }
        };
        let state = Arc::new(state);

        let (jobs, queue) = mpsc::channel::<Job>();
        let worker_state = Arc::clone(&state);
        let worker = thread::spawn(move || {
            for job in queue {
                on_result(run_job(&worker_state, job));
            }
        });

        Self {
            state,
            jobs: Some(jobs),
            worker: Some(worker),
        }
    }

    fn initialize(
        model_path: &Path,
        config: &PlantIdentifierConfig,
    ) -> Result<PipelineState, ClassifyError> {
        config.validate()?;

        let engine = OrtEngine::load(model_path)?;

        // Reject a model whose declared static input shape disagrees with the
        // configured contract, rather than failing on the first forward pass.
        if let Some(shape) = engine.input_shape() {
            let side = config.input_size as i64;
            let expected = [1_i64, side, side, 3];
            let matches = shape.len() == 4
                && shape
                    .iter()
                    .zip(expected)
                    .all(|(&declared, want)| declared <= 0 || declared == want);
            if !matches {
                let actual: Vec<usize> = shape.iter().map(|&d| d.max(0) as usize).collect();
                return Err(ClassifyError::shape(
                    "model_input_validation",
                    &[1, side as usize, side as usize, 3],
                    &actual,
                ));
            }
        }

        let preprocessor = Preprocessor::new(config.input_size)?;
        let decoder = match &config.labels {
            Some(labels) => ScoreDecoder::with_labels(labels.clone())?,
            None => ScoreDecoder::new(config.num_classes)?,
        };

        debug!(
            model = engine.model_name(),
            input_size = config.input_size,
            num_classes = config.num_classes,
            "pipeline ready"
        );
        Ok(PipelineState::Ready {
            engine,
            preprocessor,
            decoder,
        })
    }

    /// Returns true if the model loaded and the pipeline services classify
    /// calls.
    pub fn is_ready(&self) -> bool {
        matches!(&*self.state, PipelineState::Ready { .. })
    }

    /// Returns the stored load failure reason, if the pipeline failed to
    /// initialize.
    pub fn failure_reason(&self) -> Option<&str> {
        match &*self.state {
            PipelineState::Failed { reason } => Some(reason),
            PipelineState::Ready { .. } => None,
        }
    }

    /// Queues an image for classification. Fire-and-forget: the outcome
    /// arrives through the `on_result` callback.
    pub fn classify(&self, image: DynamicImage) {
        self.classify_with_cancel(image, CancelToken::new());
    }

    /// Queues an image for classification with a caller-supplied cancellation
    /// token.
    ///
    /// The token is checked before preprocessing and again before the
    /// forward pass; a cancelled call still delivers exactly one outcome
    /// (`ClassifyError::Cancelled`).
    pub fn classify_with_cancel(&self, image: DynamicImage, cancel: CancelToken) {
        if let Some(jobs) = &self.jobs {
            if jobs.send(Job { image, cancel }).is_err() {
                error!("classification worker is gone; dropping classify request");
            }
        }
    }
}

impl Drop for PlantIdentifier {
    fn drop(&mut self) {
        // Closing the queue lets the worker drain remaining jobs and exit;
        // joining it guarantees the engine is released only after no
        // classification is in flight.
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Runs one classification job against the pipeline state.
fn run_job(state: &PipelineState, job: Job) -> ClassifyOutcome {
    // First mandated cancellation point: before preprocessing begins. A job
    // cancelled while queued never touches the pipeline state.
    if job.cancel.is_cancelled() {
        return Err(ClassifyError::Cancelled);
    }

    let (engine, preprocessor, decoder) = match state {
        PipelineState::Failed { reason } => {
            return Err(ClassifyError::Unavailable {
                reason: reason.clone(),
            });
        }
        PipelineState::Ready {
            engine,
            preprocessor,
            decoder,
        } => (engine, preprocessor, decoder),
    };

    let span = span!(Level::DEBUG, "classify", model = engine.model_name());
    let _guard = span.enter();

    let input = preprocessor.process(&job.image)?;

    // Second mandated cancellation point: before the forward pass, which is
    // not preemptible once it starts.
    if job.cancel.is_cancelled() {
        return Err(ClassifyError::Cancelled);
    }
    let output = engine.infer(&input)?;

    let scores = first_scores(&output)?;
    let prediction = decoder.decode(&scores)?;
    debug!(
        class_id = prediction.class_id,
        confidence = prediction.confidence_percent,
        "classification completed"
    );
    Ok(prediction)
}

/// Extracts the single score row from the engine output as a value, never a
/// panic: an empty output tensor is reported as a shape error on the result
/// channel like every other contract violation.
fn first_scores(output: &crate::core::Tensor2D) -> Result<Vec<f32>, ClassifyError> {
    match output.rows().into_iter().next() {
        Some(row) => Ok(row.to_vec()),
        None => Err(ClassifyError::shape(
            "score_extraction",
            &[1, output.ncols()],
            &[output.nrows(), output.ncols()],
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::time::Duration;

    fn test_image() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(500, 500, image::Rgb([0, 255, 0])))
    }

    fn outcome_channel() -> (
        impl Fn(ClassifyOutcome) + Send + 'static,
        mpsc::Receiver<ClassifyOutcome>,
    ) {
        let (tx, rx) = mpsc::channel();
        (move |outcome| drop(tx.send(outcome)), rx)
    }

    #[test]
    fn test_missing_asset_fails_pipeline() {
        let (on_result, _rx) = outcome_channel();
        let identifier = PlantIdentifier::new("does/not/exist/plant_model.onnx", on_result);
        assert!(!identifier.is_ready());
        assert!(identifier.failure_reason().is_some());
    }

    #[test]
    fn test_failed_pipeline_reports_stored_reason_per_call() {
        let (on_result, rx) = outcome_channel();
        let identifier = PlantIdentifier::new("does/not/exist/plant_model.onnx", on_result);
        let reason = identifier.failure_reason().unwrap().to_string();

        identifier.classify(test_image());
        identifier.classify(test_image());

        for _ in 0..2 {
            let outcome = rx.recv_timeout(Duration::from_secs(10)).unwrap();
            match outcome {
                Err(ClassifyError::Unavailable { reason: delivered }) => {
                    assert_eq!(delivered, reason);
                }
                other => panic!("expected Unavailable, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_drop_drains_queued_calls() {
        let (on_result, rx) = outcome_channel();
        let identifier = PlantIdentifier::new("does/not/exist/plant_model.onnx", on_result);

        identifier.classify(test_image());
        identifier.classify(test_image());
        drop(identifier);

        // Both queued calls must have received an outcome by the time drop
        // returns, and no extra outcome may appear.
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_invalid_config_fails_pipeline() {
        let (on_result, _rx) = outcome_channel();
        let config = PlantIdentifierConfig {
            input_size: 0,
            ..PlantIdentifierConfig::default()
        };
        let identifier =
            PlantIdentifier::with_config("does/not/exist/plant_model.onnx", config, on_result);
        assert!(!identifier.is_ready());
        assert!(
            identifier
                .failure_reason()
                .unwrap()
                .contains("input_size")
        );
    }

    #[test]
    fn test_pre_cancelled_job_delivers_cancelled() {
        // Cancellation is observed before any pipeline state is touched, so
        // a job cancelled while queued never runs preprocessing or inference.
        let state = PipelineState::Failed {
            reason: "model load failed".to_string(),
        };
        let cancel = CancelToken::new();
        cancel.cancel();
        let outcome = run_job(
            &state,
            Job {
                image: test_image(),
                cancel,
            },
        );
        assert!(matches!(outcome, Err(ClassifyError::Cancelled)));
    }

    #[test]
    fn test_cancelled_classify_call_delivers_outcome() {
        let (on_result, rx) = outcome_channel();
        let identifier = PlantIdentifier::new("does/not/exist/plant_model.onnx", on_result);

        let cancel = CancelToken::new();
        cancel.cancel();
        identifier.classify_with_cancel(test_image(), cancel);

        let outcome = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert!(matches!(outcome, Err(ClassifyError::Cancelled)));
    }

    #[test]
    fn test_empty_engine_output_is_shape_error() {
        let empty = crate::core::Tensor2D::from_shape_vec((0, 30), Vec::new()).unwrap();
        let err = first_scores(&empty).unwrap_err();
        assert!(matches!(err, ClassifyError::Shape { .. }));

        let single = crate::core::Tensor2D::from_shape_vec((1, 3), vec![0.1, 0.7, 0.2]).unwrap();
        assert_eq!(first_scores(&single).unwrap(), vec![0.1, 0.7, 0.2]);
    }
}
