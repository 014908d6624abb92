use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Integer pixel position used as the spatial identity of a track.
pub type Centroid = Point2<i32>;

/// Axis-aligned bounding box stored as corners.
///
/// Detectors hand out TLBR boxes (x1, y1, x2, y2), so that is the native layout.
/// Conversions from the other common formats are provided:
/// - TLWH: Top-Left X, Top-Left Y, Width, Height
/// - XYWH: Center X, Center Y, Width, Height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left x coordinate
    pub x1: f32,
    /// Top-left y coordinate
    pub y1: f32,
    /// Bottom-right x coordinate
    pub x2: f32,
    /// Bottom-right y coordinate
    pub y2: f32,
}

impl Rect {
    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn from_tlwh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    /// Create a Rect from its center and dimensions (XYWH format).
    #[inline]
    pub fn from_xywh(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self {
            x1: cx - width / 2.0,
            y1: cy - height / 2.0,
            x2: cx + width / 2.0,
            y2: cy + height / 2.0,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.x1, self.y1, self.width(), self.height()]
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Integer midpoint of the box, truncated toward zero.
    ///
    /// Corner order does not matter: a box with reversed corners yields the
    /// same centroid as its normalized form.
    #[inline]
    pub fn centroid(&self) -> Centroid {
        let (cx, cy) = self.center();
        Centroid::new(cx as i32, cy as i32)
    }

    /// True when every coordinate is a finite number.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_conversions() {
        let rect = Rect::from_tlwh(10.0, 20.0, 30.0, 40.0);

        assert_eq!(rect.to_tlbr(), [10.0, 20.0, 40.0, 60.0]);
        assert_eq!(rect.to_tlwh(), [10.0, 20.0, 30.0, 40.0]);
        assert_eq!(rect.center(), (25.0, 40.0));
    }

    #[test]
    fn test_from_xywh() {
        let rect = Rect::from_xywh(25.0, 40.0, 30.0, 40.0);
        assert_eq!(rect.to_tlbr(), [10.0, 20.0, 40.0, 60.0]);
    }

    #[test]
    fn test_centroid_truncates() {
        // (10 + 21) / 2 = 15.5, (0 + 3) / 2 = 1.5
        let rect = Rect::from_tlbr(10.0, 0.0, 21.0, 3.0);
        assert_eq!(rect.centroid(), Centroid::new(15, 1));

        // Truncation is toward zero, not floor
        let negative = Rect::from_tlbr(-11.0, -3.0, 0.0, 0.0);
        assert_eq!(negative.centroid(), Centroid::new(-5, -1));
    }

    #[test]
    fn test_reversed_corners_same_centroid() {
        let a = Rect::from_tlbr(10.0, 20.0, 50.0, 80.0);
        let b = Rect::from_tlbr(50.0, 80.0, 10.0, 20.0);
        assert_eq!(a.centroid(), b.centroid());
        assert_eq!(b.width(), -40.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(Rect::from_tlbr(0.0, 0.0, 1.0, 1.0).is_finite());
        assert!(!Rect::from_tlbr(f32::NAN, 0.0, 1.0, 1.0).is_finite());
        assert!(!Rect::from_tlbr(0.0, 0.0, f32::INFINITY, 1.0).is_finite());
    }
}
