use serde::{Deserialize, Serialize};

use crate::tracker::Detection;

/// Keeps the detections of a single class above a confidence floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionFilter {
    /// Class to keep (COCO person = 0)
    pub class_id: u32,
    /// Scores must be strictly greater than this
    pub min_confidence: f32,
}

impl Default for DetectionFilter {
    fn default() -> Self {
        Self {
            class_id: 0,
            min_confidence: 0.5,
        }
    }
}

impl DetectionFilter {
    pub fn accepts(&self, detection: &Detection) -> bool {
        detection.class_id == self.class_id && detection.score > self.min_confidence
    }

    pub fn apply(&self, detections: Vec<Detection>) -> Vec<Detection> {
        detections.into_iter().filter(|d| self.accepts(d)).collect()
    }
}
