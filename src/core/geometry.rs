use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in the input's coordinate space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).max(0.0)
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Intersection over union. Boxes that merely touch along an edge
    /// have zero-area overlap and score 0.0; a pair of degenerate
    /// zero-area boxes also scores 0.0. The result is always in
    /// [0.0, 1.0].
    pub fn iou(&self, other: &Self) -> f64 {
        let x_left = self.x0.max(other.x0);
        let y_top = self.y0.max(other.y0);
        let x_right = self.x1.min(other.x1);
        let y_bottom = self.y1.min(other.y1);

        if x_right <= x_left || y_bottom <= y_top {
            return 0.0;
        }

        let intersection = (x_right - x_left) * (y_bottom - y_top);
        let union = self.area() + other.area() - intersection;
        if union == 0.0 {
            0.0
        } else {
            intersection / union
        }
    }
}
