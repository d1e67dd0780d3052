mod circle;
mod square;
mod zigzag;

pub use circle::CircleConfig;
pub use square::SquareConfig;
pub use zigzag::ZigZagConfig;

use crate::stroke::StrokeWindow;
use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A recognized gesture shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureKind {
    Circle,
    Square,
    ZigZag,
}

/// Per-detector results for one window snapshot, for diagnostic display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureDetections {
    pub circle: bool,
    pub square: bool,
    pub zigzag: bool,
}

/// Tuning for the three gesture detectors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub circle: CircleConfig,
    pub square: SquareConfig,
    pub zigzag: ZigZagConfig,
}

/// Run all three detectors over the current window snapshot.
///
/// Each detector is a pure function of the snapshot and fails closed on
/// insufficient data. No detector keeps memory of past windows; debouncing
/// belongs to the mode resolver.
pub fn detect(window: &StrokeWindow, config: &GestureConfig) -> GestureDetections {
    let points = window.positions();
    GestureDetections {
        circle: circle::detect(&points, &config.circle),
        square: square::detect(&points, &config.square),
        zigzag: zigzag::detect(&points, &config.zigzag),
    }
}

/// Classify the window, resolving disagreement between detectors
pub fn classify(window: &StrokeWindow, config: &GestureConfig) -> Option<GestureKind> {
    classify_detections(detect(window, config))
}

/// Precedence when several detectors fire on the same window:
/// zig-zag over circle over square. Zig-zag is the least likely accidental
/// pattern; circle carries the stricter closure and radius requirements, so
/// it wins over square at small scales where the two blur together.
pub fn classify_detections(detections: GestureDetections) -> Option<GestureKind> {
    if detections.zigzag {
        Some(GestureKind::ZigZag)
    } else if detections.circle {
        Some(GestureKind::Circle)
    } else if detections.square {
        Some(GestureKind::Square)
    } else {
        None
    }
}

/// Axis-aligned bounding box of a point path; `None` for an empty path
pub(crate) fn bounding_box(points: &[Pos2]) -> Option<Rect> {
    let first = *points.first()?;
    let mut min = first;
    let mut max = first;
    for point in &points[1..] {
        min.x = min.x.min(point.x);
        min.y = min.y.min(point.y);
        max.x = max.x.max(point.x);
        max.y = max.y.max(point.y);
    }
    Some(Rect::from_min_max(min, max))
}

/// Sum of consecutive point distances along the path
pub(crate) fn path_length(points: &[Pos2]) -> f32 {
    points
        .windows(2)
        .map(|pair| pair[0].distance(pair[1]))
        .sum()
}

/// Signed angle in radians turned from `incoming` to `outgoing`
pub(crate) fn turn_angle(incoming: Vec2, outgoing: Vec2) -> f32 {
    let cross = incoming.x * outgoing.y - incoming.y * outgoing.x;
    let dot = incoming.dot(outgoing);
    cross.atan2(dot)
}
