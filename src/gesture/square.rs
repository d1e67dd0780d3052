use super::{bounding_box, turn_angle};
use egui::Pos2;
use serde::{Deserialize, Serialize};

/// Tuning for the square detector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SquareConfig {
    /// Fewest samples worth inspecting
    pub min_samples: usize,
    /// Minimum bounding-box dimension (canvas units)
    pub min_size: f32,
    /// Maximum bounding-box aspect ratio; loose enough to accept rectangles
    pub max_aspect: f32,
    /// Absolute floor on the allowed start-to-end gap
    pub closure_distance: f32,
    /// Start-to-end gap allowance as a fraction of the mean box dimension
    pub closure_fraction: f32,
    /// Samples spanned by each direction chord
    pub chord_stride: usize,
    /// Chords shorter than this carry no usable direction (canvas units)
    pub min_chord_length: f32,
    /// Angle (degrees) between chords above which a sample counts as a corner
    pub corner_angle_degrees: f32,
    /// Fewest samples between two counted corners
    pub min_corner_spacing: usize,
    /// Fewest corners for a square
    pub min_corners: usize,
    /// Most corners for a square; more reads as scribble
    pub max_corners: usize,
}

impl Default for SquareConfig {
    fn default() -> Self {
        Self {
            min_samples: 12,
            min_size: 24.0,
            max_aspect: 2.6,
            closure_distance: 14.0,
            closure_fraction: 0.32,
            chord_stride: 3,
            min_chord_length: 6.0,
            corner_angle_degrees: 55.0,
            min_corner_spacing: 3,
            min_corners: 3,
            max_corners: 8,
        }
    }
}

/// Square test: a closed path of the right size whose interior holds a small
/// number of sharp corners. Rectangles count; the aspect gate only rejects
/// shapes too elongated to be a deliberate box.
pub(crate) fn detect(points: &[Pos2], config: &SquareConfig) -> bool {
    if points.len() < config.min_samples {
        return false;
    }
    let Some(bounds) = bounding_box(points) else {
        return false;
    };
    let width = bounds.width();
    let height = bounds.height();
    if width < config.min_size || height < config.min_size {
        return false;
    }
    let aspect = width.max(height) / width.min(height).max(f32::EPSILON);
    if aspect > config.max_aspect {
        return false;
    }

    let mean_dim = (width + height) / 2.0;
    let closure_allowed = config.closure_distance.max(config.closure_fraction * mean_dim);
    let first = points[0];
    let last = points[points.len() - 1];
    if first.distance(last) > closure_allowed {
        return false;
    }

    let corners = count_corners(points, config);
    corners >= config.min_corners && corners <= config.max_corners
}

/// Count sharp turns between the fixed-stride chords before and after each
/// interior sample. Short chords are skipped (no meaningful direction), and
/// corners closer together than the spacing minimum collapse into one so a
/// single physical turn is not counted twice.
fn count_corners(points: &[Pos2], config: &SquareConfig) -> usize {
    let stride = config.chord_stride;
    if stride == 0 || points.len() < 2 * stride + 1 {
        return 0;
    }
    let threshold = config.corner_angle_degrees.to_radians();
    let mut corners = 0;
    let mut last_corner: Option<usize> = None;
    for i in stride..points.len() - stride {
        let incoming = points[i] - points[i - stride];
        let outgoing = points[i + stride] - points[i];
        if incoming.length() < config.min_chord_length
            || outgoing.length() < config.min_chord_length
        {
            continue;
        }
        if turn_angle(incoming, outgoing).abs() < threshold {
            continue;
        }
        if let Some(prev) = last_corner {
            if i - prev < config.min_corner_spacing {
                continue;
            }
        }
        corners += 1;
        last_corner = Some(i);
    }
    corners
}
