use super::{bounding_box, turn_angle};
use egui::Pos2;
use serde::{Deserialize, Serialize};

/// Tuning for the circle detector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleConfig {
    /// Fewest samples worth inspecting
    pub min_samples: usize,
    /// Minimum bounding-box dimension (canvas units)
    pub min_size: f32,
    /// Maximum bounding-box aspect ratio (longer dimension over shorter)
    pub max_aspect: f32,
    /// Absolute floor on the allowed start-to-end gap
    pub closure_distance: f32,
    /// Start-to-end gap allowance as a fraction of the mean box dimension
    pub closure_fraction: f32,
    /// Minimum mean distance of samples from their centroid (canvas units)
    pub min_mean_radius: f32,
    /// Maximum mean absolute radius deviation, as a fraction of mean radius
    pub max_radius_deviation: f32,
    /// Smallest per-step turn (degrees) that counts toward arc consistency
    pub moderate_turn_min_degrees: f32,
    /// Largest per-step turn (degrees) that counts toward arc consistency
    pub moderate_turn_max_degrees: f32,
    /// Minimum fraction of steps turning moderately in one direction
    pub min_turn_fraction: f32,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self {
            min_samples: 12,
            min_size: 20.0,
            max_aspect: 1.45,
            closure_distance: 10.0,
            closure_fraction: 0.22,
            min_mean_radius: 8.0,
            max_radius_deviation: 0.12,
            moderate_turn_min_degrees: 2.0,
            moderate_turn_max_degrees: 40.0,
            min_turn_fraction: 0.5,
        }
    }
}

/// Circle test: a closed, roughly equal-sided path whose samples sit at a
/// near-constant distance from their centroid and that keeps turning gently
/// in one direction. The turn-consistency gate is what separates a circle
/// from a cleanly traced square, whose radius deviation is already under 10%.
pub(crate) fn detect(points: &[Pos2], config: &CircleConfig) -> bool {
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

    let centroid = centroid(points);
    let mean_radius =
        points.iter().map(|p| p.distance(centroid)).sum::<f32>() / points.len() as f32;
    if mean_radius < config.min_mean_radius {
        return false;
    }
    let deviation = points
        .iter()
        .map(|p| (p.distance(centroid) - mean_radius).abs())
        .sum::<f32>()
        / points.len() as f32;
    if deviation > config.max_radius_deviation * mean_radius {
        return false;
    }

    moderate_turn_fraction(points, config) >= config.min_turn_fraction
}

fn centroid(points: &[Pos2]) -> Pos2 {
    let mut sum = egui::Vec2::ZERO;
    for point in points {
        sum += point.to_vec2();
    }
    (sum / points.len() as f32).to_pos2()
}

/// Fraction of interior triplets turning moderately in the dominant
/// direction. A circle traced from a few dozen samples turns a few degrees
/// per step, always the same way; straight runs turn near zero and corners
/// spike past the moderate band, so both drive the fraction down.
fn moderate_turn_fraction(points: &[Pos2], config: &CircleConfig) -> f32 {
    let min_turn = config.moderate_turn_min_degrees.to_radians();
    let max_turn = config.moderate_turn_max_degrees.to_radians();
    let mut clockwise = 0usize;
    let mut counter = 0usize;
    let mut total = 0usize;
    for i in 1..points.len() - 1 {
        let incoming = points[i] - points[i - 1];
        let outgoing = points[i + 1] - points[i];
        if incoming.length() < f32::EPSILON || outgoing.length() < f32::EPSILON {
            continue;
        }
        total += 1;
        let turn = turn_angle(incoming, outgoing);
        let magnitude = turn.abs();
        if magnitude >= min_turn && magnitude <= max_turn {
            if turn > 0.0 {
                clockwise += 1;
            } else {
                counter += 1;
            }
        }
    }
    if total == 0 {
        return 0.0;
    }
    clockwise.max(counter) as f32 / total as f32
}
