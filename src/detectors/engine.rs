//! Detector execution engine with parallel support
//!
//! The DetectorEngine runs every registered detector against one shared
//! [`AnalysisContext`]:
//! - Fans detectors out on a rayon pool (or runs them inline with one worker)
//! - Isolates failures and panics, substituting fallback evidence
//! - Returns outcomes in registration order, independent of scheduling
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    DetectorEngine                       │
//! ├─────────────────────────────────────────────────────────┤
//! │  1. Register detectors (canonical cipher order)         │
//! │  2. Run each detector under catch_unwind (rayon)        │
//! │  3. Err / panic -> fallback evidence, marked failed     │
//! │  4. Collect outcomes in registration order              │
//! └─────────────────────────────────────────────────────────┘
//! ```

use crate::detectors::base::{AnalysisContext, DetectionSummary, Detector, DetectorOutcome};
use crate::error::AnalysisError;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Default evidence for a detector that failed
pub const DEFAULT_FALLBACK_EVIDENCE: f64 = 0.05;

/// Orchestrates cipher detection across all registered detectors
pub struct DetectorEngine {
    /// Registered detectors
    detectors: Vec<Arc<dyn Detector>>,
    /// Number of worker threads for parallel execution
    workers: usize,
    /// Evidence substituted for failed detectors
    fallback_evidence: f64,
}

impl DetectorEngine {
    /// Create a new detector engine
    ///
    /// # Arguments
    /// * `workers` - Number of worker threads (0 = auto-detect, 1 = sequential)
    pub fn new(workers: usize) -> Self {
        let actual_workers = if workers == 0 {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
                .min(8)
        } else {
            workers
        };

        Self {
            detectors: Vec::new(),
            workers: actual_workers,
            fallback_evidence: DEFAULT_FALLBACK_EVIDENCE,
        }
    }

    /// Set the evidence used for failed detectors
    pub fn with_fallback_evidence(mut self, evidence: f64) -> Self {
        self.fallback_evidence = evidence;
        self
    }

    /// Register a detector
    pub fn register(&mut self, detector: Arc<dyn Detector>) {
        debug!("Registering detector: {}", detector.name());
        self.detectors.push(detector);
    }

    /// Register multiple detectors at once
    pub fn register_all(&mut self, detectors: impl IntoIterator<Item = Arc<dyn Detector>>) {
        for detector in detectors {
            self.register(detector);
        }
    }

    /// Get the number of registered detectors
    pub fn detector_count(&self) -> usize {
        self.detectors.len()
    }

    /// Get names of all registered detectors
    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run all detectors
    ///
    /// Outcomes come back in registration order. A detector that returns an
    /// error or panics yields a failed outcome with the fallback evidence.
    pub fn run(
        &self,
        ctx: &AnalysisContext<'_>,
    ) -> Result<(Vec<DetectorOutcome>, DetectionSummary), AnalysisError> {
        let start = Instant::now();
        info!(
            "Starting detection with {} detectors on {} workers",
            self.detectors.len(),
            self.workers
        );

        let outcomes: Vec<DetectorOutcome> = if self.workers <= 1 {
            self.detectors
                .iter()
                .map(|detector| self.run_single_detector(detector, ctx))
                .collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.workers)
                .build()
                .map_err(|e| AnalysisError::Engine(e.to_string()))?;
            pool.install(|| {
                self.detectors
                    .par_iter()
                    .map(|detector| self.run_single_detector(detector, ctx))
                    .collect()
            })
        };

        let mut summary = DetectionSummary::default();
        for outcome in &outcomes {
            summary.add_outcome(outcome);
            if let Some(err) = &outcome.error {
                warn!(
                    "Detector {} failed, using fallback evidence {}: {}",
                    outcome.detector, self.fallback_evidence, err
                );
            }
        }

        info!(
            "Detection complete: {}/{} succeeded in {:?}",
            summary.detectors_succeeded,
            summary.detectors_run,
            start.elapsed()
        );
        Ok((outcomes, summary))
    }

    /// Run a single detector with error handling and timing
    fn run_single_detector(
        &self,
        detector: &Arc<dyn Detector>,
        ctx: &AnalysisContext<'_>,
    ) -> DetectorOutcome {
        let name = detector.name();
        let start = Instant::now();

        debug!("Running detector: {}", name);

        // Wrap in catch_unwind to handle panics
        let detect_result =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| detector.detect(ctx)));
        let duration = start.elapsed().as_micros() as u64;

        match detect_result {
            Ok(Ok(result)) => {
                debug!(
                    "Detector {} evidence {:.4} in {}us",
                    name, result.evidence, duration
                );
                DetectorOutcome::success(name, result, duration)
            }
            Ok(Err(e)) => DetectorOutcome::failure(
                name,
                detector.cipher(),
                e.to_string(),
                self.fallback_evidence,
                duration,
            ),
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                error!("Detector {} panicked: {}", name, panic_msg);
                DetectorOutcome::failure(
                    name,
                    detector.cipher(),
                    format!("Panic: {}", panic_msg),
                    self.fallback_evidence,
                    duration,
                )
            }
        }
    }
}

impl Default for DetectorEngine {
    fn default() -> Self {
        Self::new(0)
    }
}
