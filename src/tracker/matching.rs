//! Matching utilities for the centroid tracker.

use crate::tracker::rect::{Centroid, Rect};
use nalgebra::Vector2;
use ndarray::Array2;

/// Detection input for the counting pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Bounding box in TLBR format (x1, y1, x2, y2)
    pub bbox: Rect,
    /// Detector class label (COCO: 0 = person)
    pub class_id: u32,
    /// Detection confidence score
    pub score: f32,
}

impl Detection {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, class_id: u32, score: f32) -> Self {
        Self {
            bbox: Rect::from_tlbr(x1, y1, x2, y2),
            class_id,
            score,
        }
    }

    pub fn from_rect(bbox: Rect, class_id: u32, score: f32) -> Self {
        Self {
            bbox,
            class_id,
            score,
        }
    }
}

/// Euclidean distance between two centroids in pixels.
#[inline]
pub fn euclidean_distance(a: &Centroid, b: &Centroid) -> f64 {
    Vector2::new(a.x as f64 - b.x as f64, a.y as f64 - b.y as f64).norm()
}

/// Compute the distance matrix between track centroids and detection centroids.
///
/// Returns a matrix of shape (M, N) where M is the number of tracks and N the
/// number of detections.
pub fn centroid_distance(track_centroids: &[Centroid], det_centroids: &[Centroid]) -> Array2<f64> {
    let mut dists = Array2::zeros((track_centroids.len(), det_centroids.len()));
    for (i, t) in track_centroids.iter().enumerate() {
        for (j, d) in det_centroids.iter().enumerate() {
            dists[[i, j]] = euclidean_distance(t, d);
        }
    }
    dists
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentResult {
    /// (track index, detection index) pairs
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

/// Greedy single-pass assignment over a (tracks x detections) cost matrix.
///
/// Detections are visited in column order. Each one claims the nearest track
/// not yet claimed in this pass, provided its cost is strictly below `gate`.
/// Ties go to the lowest row index. Earlier detections win contested tracks,
/// so the result is not a minimum-cost matching.
pub fn greedy_assignment(cost_matrix: &Array2<f64>, gate: f64) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    let mut claimed = vec![false; num_rows];
    let mut matches = Vec::new();
    let mut unmatched_detections = Vec::new();

    for col in 0..num_cols {
        let mut best: Option<(usize, f64)> = None;
        for row in 0..num_rows {
            if claimed[row] {
                continue;
            }
            let dist = cost_matrix[[row, col]];
            if dist < gate && best.is_none_or(|(_, min_dist)| dist < min_dist) {
                best = Some((row, dist));
            }
        }

        match best {
            Some((row, _)) => {
                claimed[row] = true;
                matches.push((row, col));
            }
            None => unmatched_detections.push(col),
        }
    }

    let unmatched_tracks = claimed
        .iter()
        .enumerate()
        .filter_map(|(i, &c)| if c { None } else { Some(i) })
        .collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_detections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_euclidean_distance() {
        let a = Centroid::new(0, 0);
        let b = Centroid::new(3, 4);
        assert!((euclidean_distance(&a, &b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_distance_shape() {
        let tracks = [Centroid::new(0, 0), Centroid::new(100, 0)];
        let dets = [Centroid::new(0, 0), Centroid::new(50, 0), Centroid::new(100, 0)];
        let dists = centroid_distance(&tracks, &dets);
        assert_eq!(dists.dim(), (2, 3));
        assert_eq!(dists[[0, 1]], 50.0);
        assert_eq!(dists[[1, 0]], 100.0);
    }

    #[test]
    fn test_greedy_picks_nearest_under_gate() {
        let cost = array![[5.0, 300.0], [300.0, 20.0]];
        let result = greedy_assignment(&cost, 100.0);
        assert_eq!(result.matches, vec![(0, 0), (1, 1)]);
        assert!(result.unmatched_tracks.is_empty());
        assert!(result.unmatched_detections.is_empty());
    }

    #[test]
    fn test_gate_is_strict() {
        let cost = array![[100.0]];
        let result = greedy_assignment(&cost, 100.0);
        assert!(result.matches.is_empty());
        assert_eq!(result.unmatched_tracks, vec![0]);
        assert_eq!(result.unmatched_detections, vec![0]);
    }

    #[test]
    fn test_earlier_detection_wins_contested_track() {
        // Detection 1 is the better fit for track 0, but detection 0 comes first.
        let cost = array![[40.0, 1.0]];
        let result = greedy_assignment(&cost, 100.0);
        assert_eq!(result.matches, vec![(0, 0)]);
        assert_eq!(result.unmatched_detections, vec![1]);
    }

    #[test]
    fn test_tie_goes_to_first_row() {
        let cost = array![[10.0], [10.0]];
        let result = greedy_assignment(&cost, 100.0);
        assert_eq!(result.matches, vec![(0, 0)]);
        assert_eq!(result.unmatched_tracks, vec![1]);
    }

    #[test]
    fn test_empty_inputs() {
        let no_tracks = Array2::<f64>::zeros((0, 2));
        let result = greedy_assignment(&no_tracks, 100.0);
        assert_eq!(result.unmatched_detections, vec![0, 1]);

        let no_dets = Array2::<f64>::zeros((2, 0));
        let result = greedy_assignment(&no_dets, 100.0);
        assert_eq!(result.unmatched_tracks, vec![0, 1]);
    }
}
