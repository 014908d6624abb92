//! CountingPipeline for combining detection with tracking.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{DetectionFilter, DetectionSource, IntoDetections};
use crate::error::TrackerError;
use crate::tracker::{CentroidTracker, Rect, TrackId, TrackerConfig};

/// Settings for one video run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub tracker: TrackerConfig,
    pub filter: DetectionFilter,
    /// Log progress every N frames. 0 disables progress logging.
    pub progress_interval: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            filter: DetectionFilter::default(),
            progress_interval: 30,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), TrackerError> {
        self.tracker.validate()?;
        if !self.filter.min_confidence.is_finite() {
            return Err(TrackerError::InvalidConfig(format!(
                "min_confidence must be finite, got {}",
                self.filter.min_confidence
            )));
        }
        Ok(())
    }

    /// Load and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TrackerError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}

/// What the overlay needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    /// 0-based frame number
    pub frame_index: u64,
    /// Number of live tracks, shown as "Unique Persons"
    pub unique_count: usize,
    pub track_ids: Vec<TrackId>,
    /// Boxes that passed the filter, drawn on the frame
    pub detections: Vec<Rect>,
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub total_tracks_created: u64,
    pub peak_unique: usize,
}

/// Runs a detector and a centroid tracker over the frames of one video.
///
/// The pipeline owns its tracker exclusively, so frames are always applied in
/// the order they are submitted.
pub struct CountingPipeline<D: DetectionSource> {
    detector: D,
    tracker: CentroidTracker,
    filter: DetectionFilter,
    progress_interval: u64,
    frames: u64,
    peak_unique: usize,
}

impl<D: DetectionSource> CountingPipeline<D> {
    /// Create a new counting pipeline with the given detector and config.
    ///
    /// The config is taken as is; use [`CountingPipeline::try_new`] to validate it.
    pub fn new(detector: D, config: PipelineConfig) -> Self {
        Self {
            detector,
            tracker: CentroidTracker::new(config.tracker),
            filter: config.filter,
            progress_interval: config.progress_interval,
            frames: 0,
            peak_unique: 0,
        }
    }

    /// Like [`CountingPipeline::new`], but rejects an invalid configuration.
    pub fn try_new(detector: D, config: PipelineConfig) -> Result<Self, TrackerError> {
        config.validate()?;
        Ok(Self::new(detector, config))
    }

    /// Create a new counting pipeline with default configuration.
    pub fn with_default_config(detector: D) -> Self {
        Self::new(detector, PipelineConfig::default())
    }

    /// Process a single frame: detect, keep persons, update the tracker.
    ///
    /// A detector error leaves the tracker and the frame counter untouched.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameReport, D::Error> {
        let detections = self.detector.detect(input, width, height)?;
        Ok(self.process_detections(detections))
    }

    /// Same as [`CountingPipeline::process_frame`] for detections produced elsewhere.
    pub fn process_detections(&mut self, detections: impl IntoDetections) -> FrameReport {
        let detections = detections.into_detections();
        let total = detections.len();
        let persons = self.filter.apply(detections);
        let boxes: Vec<Rect> = persons.iter().map(|d| d.bbox).collect();

        let track_ids = self.tracker.update(&boxes);
        let report = FrameReport {
            frame_index: self.frames,
            unique_count: track_ids.len(),
            track_ids,
            detections: boxes,
        };

        debug!(
            frame = report.frame_index,
            detections = total,
            persons = report.detections.len(),
            unique = report.unique_count,
            "frame processed"
        );

        self.frames += 1;
        self.peak_unique = self.peak_unique.max(report.unique_count);
        if self.progress_interval > 0 && self.frames % self.progress_interval == 0 {
            info!("processed {} frames", self.frames);
        }

        report
    }

    /// Number of frames processed so far.
    pub fn frames_processed(&self) -> u64 {
        self.frames
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    /// End the run. The tracker state is dropped with the pipeline.
    pub fn finish(self) -> RunSummary {
        let summary = RunSummary {
            frames: self.frames,
            total_tracks_created: self.tracker.total_created(),
            peak_unique: self.peak_unique,
        };
        info!(
            frames = summary.frames,
            tracks = summary.total_tracks_created,
            peak = summary.peak_unique,
            "video processing complete"
        );
        summary
    }
}
