//! Unique person counting across video frames.
//!
//! The core is [`CentroidTracker`], a greedy nearest-centroid multi-object
//! tracker. [`CountingPipeline`] wraps it with a pluggable detector and the
//! person filter to produce a per-frame unique-person count.

pub mod error;
pub mod integration;
pub mod tracker;

pub use error::TrackerError;
pub use integration::{
    CountingPipeline, DetectionBuilder, DetectionFilter, DetectionSource, FrameReport,
    IntoDetections, PipelineConfig, ReplaySource, RunSummary,
};
pub use tracker::{
    Centroid, CentroidTracker, Detection, Rect, Track, TrackId, TrackState, TrackerConfig,
};
