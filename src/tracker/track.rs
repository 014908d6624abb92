//! Single persistent identity followed by the centroid tracker.

use crate::tracker::rect::Centroid;
use crate::tracker::track_state::TrackState;

/// Track identifier. Issued from 1 upward, never reused within a run.
pub type TrackId = u64;

/// Single tracked object.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    id: TrackId,
    centroid: Centroid,
    disappeared: u32,
}

impl Track {
    pub(crate) fn new(id: TrackId, centroid: Centroid) -> Self {
        Self {
            id,
            centroid,
            disappeared: 0,
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    /// Last known position, taken from the most recent matched detection.
    pub fn centroid(&self) -> Centroid {
        self.centroid
    }

    /// Consecutive frames since the track was last matched.
    pub fn disappeared(&self) -> u32 {
        self.disappeared
    }

    pub fn state(&self) -> TrackState {
        if self.disappeared == 0 {
            TrackState::Tracked
        } else {
            TrackState::Lost
        }
    }

    /// Move the track to a freshly matched centroid.
    pub(crate) fn refresh(&mut self, centroid: Centroid) {
        self.centroid = centroid;
        self.disappeared = 0;
    }

    /// Age the track by one unmatched frame.
    pub(crate) fn mark_missed(&mut self) {
        self.disappeared = self.disappeared.saturating_add(1);
    }
}
