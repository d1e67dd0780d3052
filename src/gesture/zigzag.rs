use super::{path_length, turn_angle};
use egui::Pos2;
use serde::{Deserialize, Serialize};

/// Tuning for the zig-zag detector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZigZagConfig {
    /// Fewest samples worth inspecting
    pub min_samples: usize,
    /// Minimum cumulative path length; rejects in-place jitter (canvas units)
    pub min_path_length: f32,
    /// Samples spanned by each direction chord
    pub chord_stride: usize,
    /// Chords shorter than this carry no usable direction (canvas units)
    pub min_chord_length: f32,
    /// Smallest chord angle (degrees) that counts as a direction change
    pub min_turn_degrees: f32,
    /// Largest chord angle (degrees); beyond this the pen is backtracking
    pub max_turn_degrees: f32,
    /// Fewest samples between two counted direction changes
    pub min_change_spacing: usize,
    /// Fewest direction changes for a zig-zag
    pub min_changes: usize,
    /// Most direction changes; more reads as scribble
    pub max_changes: usize,
    /// Minimum fraction of successive change pairs with opposite turn sign
    pub min_alternation: f32,
}

impl Default for ZigZagConfig {
    fn default() -> Self {
        Self {
            min_samples: 8,
            min_path_length: 60.0,
            chord_stride: 2,
            min_chord_length: 4.0,
            min_turn_degrees: 45.0,
            max_turn_degrees: 155.0,
            min_change_spacing: 2,
            min_changes: 2,
            max_changes: 10,
            min_alternation: 0.6,
        }
    }
}

/// Zig-zag test: an open path long enough to be deliberate, carrying at
/// least two sharp direction changes whose turn directions alternate. The
/// alternation gate is what keeps a box traced clockwise (several sharp
/// turns, all the same way) from reading as a zig-zag.
pub(crate) fn detect(points: &[Pos2], config: &ZigZagConfig) -> bool {
    if points.len() < config.min_samples {
        return false;
    }
    if path_length(points) < config.min_path_length {
        return false;
    }
    let turns = counted_turns(points, config);
    if turns.len() < config.min_changes || turns.len() > config.max_changes {
        return false;
    }
    alternation_score(&turns) >= config.min_alternation
}

/// Signed turns at each counted direction change, in path order.
/// The band excludes near-zero turns (straight motion) and near-reversals
/// (backtracking over the same line), and spacing keeps one physical turn
/// from being counted at several adjacent samples.
fn counted_turns(points: &[Pos2], config: &ZigZagConfig) -> Vec<f32> {
    let stride = config.chord_stride;
    if stride == 0 || points.len() < 2 * stride + 1 {
        return Vec::new();
    }
    let min_turn = config.min_turn_degrees.to_radians();
    let max_turn = config.max_turn_degrees.to_radians();
    let mut turns = Vec::new();
    let mut last_change: Option<usize> = None;
    for i in stride..points.len() - stride {
        let incoming = points[i] - points[i - stride];
        let outgoing = points[i + stride] - points[i];
        if incoming.length() < config.min_chord_length
            || outgoing.length() < config.min_chord_length
        {
            continue;
        }
        let turn = turn_angle(incoming, outgoing);
        let magnitude = turn.abs();
        if magnitude < min_turn || magnitude > max_turn {
            continue;
        }
        if let Some(prev) = last_change {
            if i - prev < config.min_change_spacing {
                continue;
            }
        }
        turns.push(turn);
        last_change = Some(i);
    }
    turns
}

/// Fraction of successive change pairs turning in opposite directions
fn alternation_score(turns: &[f32]) -> f32 {
    if turns.len() < 2 {
        return 0.0;
    }
    let alternating = turns
        .windows(2)
        .filter(|pair| pair[0].signum() != pair[1].signum())
        .count();
    alternating as f32 / (turns.len() - 1) as f32
}
