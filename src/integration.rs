//! Integration module for driving the tracker from a detection backend.
//!
//! This module provides the detector trait, the person filter and the
//! per-video pipeline that turns frames into unique-person counts.

mod builder;
mod detector;
mod filter;
mod pipeline;
mod replay;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections};
pub use filter::DetectionFilter;
pub use pipeline::{CountingPipeline, FrameReport, PipelineConfig, RunSummary};
pub use replay::{RecordedDetection, ReplaySource};
