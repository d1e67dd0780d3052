use crate::stroke::Sample;
use crate::tool::ToolMode;
use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

/// The device class that produced a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

/// Pointer events delivered by the host, in capture order.
///
/// Positions are in host screen coordinates; the engine maps them into
/// canvas space against the configured surface rect. A `Leave` is handled
/// exactly like an `Up`: both finalize the stroke, so a pointer wandering
/// off the surface never leaves a stroke dangling.
#[derive(Debug, Clone)]
pub enum PointerEvent {
    /// Pointer made contact; a stroke begins
    Down {
        position: Pos2,
        kind: PointerKind,
        /// Contact pressure in [0, 1]; `None` when the device reports none
        pressure: Option<f32>,
        /// Stylus barrel twist in degrees, when the device reports it
        twist: Option<f32>,
        time: f64,
    },
    /// Pointer moved while in contact
    Move {
        position: Pos2,
        pressure: Option<f32>,
        time: f64,
    },
    /// Pointer lifted; the stroke ends
    Up,
    /// Pointer left the surface; the stroke ends
    Leave,
}

/// Tuning for pointer-to-sample conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Pressure assumed when the device reports none
    pub default_pressure: f32,
    /// Twist angle (degrees) beyond which a stylus counts as flipped
    /// and forces the Eraser for that stroke
    pub eraser_twist_degrees: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            default_pressure: 0.5,
            eraser_twist_degrees: 90.0,
        }
    }
}

/// Converts raw pointer positions into canvas-space samples
#[derive(Debug, Clone)]
pub struct SampleStream {
    config: InputConfig,
    surface_rect: Option<Rect>,
}

impl SampleStream {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            surface_rect: None,
        }
    }

    /// Update the drawing-surface rectangle used for normalization
    pub fn set_surface_rect(&mut self, rect: Rect) {
        self.surface_rect = Some(rect);
    }

    /// Map a host position into canvas space. Until a surface rect is
    /// provided, host coordinates pass through unchanged.
    pub fn normalize(&self, position: Pos2) -> Pos2 {
        match self.surface_rect {
            Some(rect) => (position - rect.min).to_pos2(),
            None => position,
        }
    }

    /// True when the position lies on the drawing surface
    pub fn contains(&self, position: Pos2) -> bool {
        self.surface_rect.is_none_or(|rect| rect.contains(position))
    }

    /// Effective pressure for a possibly pressure-less device
    pub fn effective_pressure(&self, pressure: Option<f32>) -> f32 {
        pressure
            .unwrap_or(self.config.default_pressure)
            .clamp(0.0, 1.0)
    }

    /// Tool override for a flipped stylus; `None` leaves the tool alone
    pub fn twist_override(&self, kind: PointerKind, twist: Option<f32>) -> Option<ToolMode> {
        if kind != PointerKind::Pen {
            return None;
        }
        let twist = twist?;
        if twist.abs() >= self.config.eraser_twist_degrees {
            Some(ToolMode::Eraser)
        } else {
            None
        }
    }

    /// Build a canvas-space sample from a host position
    pub fn make_sample(&self, position: Pos2, time: f64) -> Sample {
        Sample::new(self.normalize(position), time)
    }
}
