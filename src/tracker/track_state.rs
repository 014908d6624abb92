use serde::Serialize;

/// Where a live track stands in the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TrackState {
    /// Matched to a detection in the most recent frame
    #[default]
    Tracked,
    /// Still alive but unmatched for one or more consecutive frames
    Lost,
}
