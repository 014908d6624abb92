//! Greedy nearest-centroid tracker with disappearance handling.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TrackerError;
use crate::tracker::matching::{self, AssignmentResult};
use crate::tracker::rect::{Centroid, Rect};
use crate::tracker::track::{Track, TrackId};

/// Configuration for the CentroidTracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Distance gate in pixels. A match needs a centroid distance strictly below this.
    pub max_distance: f64,
    /// A track is dropped once it goes unmatched for more than this many frames.
    pub max_disappeared: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_distance: 100.0,
            max_disappeared: 10,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), TrackerError> {
        if !self.max_distance.is_finite() || self.max_distance <= 0.0 {
            return Err(TrackerError::InvalidConfig(format!(
                "max_distance must be a positive finite number, got {}",
                self.max_distance
            )));
        }
        Ok(())
    }
}

/// Multi-object tracker that follows tracks by centroid proximity.
///
/// `update` must be called once per frame, in frame order. Tracks are kept in
/// ascending ID order, which is also the scan order used to break distance ties.
#[derive(Debug, Clone)]
pub struct CentroidTracker {
    tracks: BTreeMap<TrackId, Track>,
    next_id: TrackId,
    config: TrackerConfig,
}

impl Default for CentroidTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl CentroidTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            tracks: BTreeMap::new(),
            next_id: 1,
            config,
        }
    }

    /// Like [`CentroidTracker::new`], but rejects an invalid configuration.
    pub fn try_new(config: TrackerConfig) -> Result<Self, TrackerError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Feed one frame of detections and return the IDs of all live tracks.
    ///
    /// Detections with a non-finite coordinate are dropped before matching.
    /// The returned IDs are in ascending order.
    pub fn update(&mut self, detections: &[Rect]) -> Vec<TrackId> {
        let centroids: Vec<Centroid> = detections
            .iter()
            .filter(|rect| {
                if rect.is_finite() {
                    true
                } else {
                    warn!(?rect, "dropping detection with non-finite coordinates");
                    false
                }
            })
            .map(Rect::centroid)
            .collect();

        // Nothing seen this frame: age everything
        if centroids.is_empty() {
            for track in self.tracks.values_mut() {
                track.mark_missed();
            }
            self.remove_stale();
            return self.live_ids();
        }

        if self.tracks.is_empty() {
            for centroid in centroids {
                self.register(centroid);
            }
            debug!(created = self.tracks.len(), "initialized tracks");
            return self.live_ids();
        }

        let track_centroids: Vec<Centroid> = self.tracks.values().map(Track::centroid).collect();
        let dists = matching::centroid_distance(&track_centroids, &centroids);

        let AssignmentResult {
            matches,
            unmatched_tracks,
            unmatched_detections,
        } = matching::greedy_assignment(&dists, self.config.max_distance);

        let mut assigned: Vec<Option<usize>> = vec![None; track_centroids.len()];
        for &(itrack, idet) in &matches {
            assigned[itrack] = Some(idet);
        }

        for (track, det) in self.tracks.values_mut().zip(assigned) {
            match det {
                Some(idet) => track.refresh(centroids[idet]),
                None => track.mark_missed(),
            }
        }

        for &idet in &unmatched_detections {
            self.register(centroids[idet]);
        }

        let removed = self.remove_stale();
        debug!(
            matched = matches.len(),
            missed = unmatched_tracks.len(),
            created = unmatched_detections.len(),
            removed,
            live = self.tracks.len(),
            "tracker updated"
        );

        self.live_ids()
    }

    /// Live tracks in ascending ID order.
    pub fn tracks(&self) -> impl Iterator<Item = (TrackId, &Track)> {
        self.tracks.iter().map(|(&id, track)| (id, track))
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// ID the next new track will receive.
    pub fn next_id(&self) -> TrackId {
        self.next_id
    }

    /// Number of IDs issued so far, including tracks already removed.
    pub fn total_created(&self) -> u64 {
        self.next_id - 1
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn register(&mut self, centroid: Centroid) {
        let id = self.next_id;
        self.next_id += 1;
        self.tracks.insert(id, Track::new(id, centroid));
    }

    /// Drop tracks unmatched for longer than the threshold. Returns how many went.
    fn remove_stale(&mut self) -> usize {
        let before = self.tracks.len();
        let max_disappeared = self.config.max_disappeared;
        self.tracks.retain(|_, track| track.disappeared() <= max_disappeared);
        let removed = before - self.tracks.len();
        if removed > 0 {
            debug!(removed, "removed stale tracks");
        }
        removed
    }

    fn live_ids(&self) -> Vec<TrackId> {
        self.tracks.keys().copied().collect()
    }
}
