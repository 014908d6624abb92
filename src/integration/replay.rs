//! Detector stand-in that serves detections recorded ahead of time.
//!
//! Recordings are JSON: an array of frames, each frame an array of
//! `{"bbox": [x1, y1, x2, y2], "class_id": 0, "score": 0.87}` objects.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DetectionBuilder, DetectionSource, IntoDetections};
use crate::error::TrackerError;
use crate::tracker::Detection;

/// One detection as stored in a recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedDetection {
    /// TLBR box
    pub bbox: [f32; 4],
    #[serde(default)]
    pub class_id: u32,
    pub score: f32,
}

impl From<RecordedDetection> for Detection {
    fn from(r: RecordedDetection) -> Self {
        let [x1, y1, x2, y2] = r.bbox;
        DetectionBuilder::new()
            .tlbr(x1, y1, x2, y2)
            .class_id(r.class_id)
            .score(r.score)
            .build()
    }
}

impl IntoDetections for Vec<RecordedDetection> {
    fn into_detections(self) -> Vec<Detection> {
        self.into_iter().map(Detection::from).collect()
    }
}

/// Replays recorded frames in order, ignoring the image bytes it is given.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    frames: VecDeque<Vec<Detection>>,
    served: usize,
}

impl ReplaySource {
    pub fn from_frames(frames: Vec<Vec<Detection>>) -> Self {
        Self {
            frames: frames.into(),
            served: 0,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, TrackerError> {
        let recorded: Vec<Vec<RecordedDetection>> = serde_json::from_str(json)?;
        Ok(Self::from_frames(
            recorded.into_iter().map(IntoDetections::into_detections).collect(),
        ))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TrackerError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Frames not yet served.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.frames.is_empty()
    }
}

impl DetectionSource for ReplaySource {
    type Error = TrackerError;

    fn detect(
        &mut self,
        _input: &[u8],
        _width: u32,
        _height: u32,
    ) -> Result<Vec<Detection>, Self::Error> {
        let frame = self.frames.pop_front().ok_or(TrackerError::ReplayExhausted {
            frames: self.served,
        })?;
        self.served += 1;
        Ok(frame)
    }
}
