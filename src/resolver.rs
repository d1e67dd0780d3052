use crate::gesture::GestureKind;
use crate::tool::{Category, ToolMode};
use log::info;
use serde::{Deserialize, Serialize};

/// Persisted category bias of the Magic tool.
///
/// Survives across strokes while the Magic tool is in use: the tool
/// "remembers" its last resolved category until pressure or a gesture
/// overrides it. Mutated only by [`ModeResolver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MagicState {
    #[default]
    Idle,
    High,
    Medium,
    Low,
}

impl MagicState {
    /// Category recorded when a stroke ends in this state
    pub fn category(&self) -> Category {
        match self {
            MagicState::Idle => Category::Neutral,
            MagicState::High => Category::High,
            MagicState::Medium => Category::Medium,
            MagicState::Low => Category::Low,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, MagicState::Idle)
    }

    fn from_gesture(kind: GestureKind) -> Self {
        match kind {
            GestureKind::Circle => MagicState::High,
            GestureKind::Square => MagicState::Medium,
            GestureKind::ZigZag => MagicState::Low,
        }
    }
}

/// Tuning for the mode resolver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Stroke-start pressure at or above this begins the stroke in High
    pub high_pressure_threshold: f32,
    /// Seconds after a gesture transition during which further gesture
    /// transitions are ignored
    pub cooldown_secs: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            high_pressure_threshold: 0.67,
            cooldown_secs: 0.5,
        }
    }
}

/// A state change applied by the resolver in response to a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: MagicState,
    pub to: MagicState,
    pub trigger: GestureKind,
}

/// State machine combining the active tool, stroke-start pressure, and
/// gesture classifications into a single persisted category.
///
/// Only the Magic tool drives it; for every other tool the resolver is a
/// pass-through and the category is the tool's own. The cooldown is a
/// deadline on the sample clock rather than a background timer, so it is
/// trivially cancelled when a stroke starts or ends and can never leak a
/// suppression window into a later stroke.
#[derive(Debug, Clone)]
pub struct ModeResolver {
    config: ResolverConfig,
    state: MagicState,
    cooldown_until: Option<f64>,
}

impl ModeResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            state: MagicState::Idle,
            cooldown_until: None,
        }
    }

    pub fn state(&self) -> MagicState {
        self.state
    }

    /// Stroke-start rule for the Magic tool: a hard press starts the stroke
    /// in High; a fresh resolver starts in Medium; otherwise the persisted
    /// state stands. Pressure is consulted only here, never mid-stroke.
    /// Any pending cooldown is cancelled.
    pub fn begin_stroke(&mut self, tool: ToolMode, pressure: f32) {
        self.cooldown_until = None;
        if tool != ToolMode::Magic {
            return;
        }
        let previous = self.state;
        if pressure >= self.config.high_pressure_threshold {
            self.state = MagicState::High;
        } else if self.state.is_idle() {
            self.state = MagicState::Medium;
        }
        if self.state != previous {
            info!(
                "Magic state {:?} -> {:?} (stroke start, pressure {:.2})",
                previous, self.state, pressure
            );
        }
    }

    /// Feed one classification result taken at `time` seconds.
    ///
    /// Returns the applied transition, if any. After a transition the caller
    /// must reset the stroke window so the same gesture cannot re-trigger
    /// from leftover samples; the resolver meanwhile ignores further results
    /// until the cooldown deadline passes.
    pub fn observe(
        &mut self,
        tool: ToolMode,
        gesture: Option<GestureKind>,
        time: f64,
    ) -> Option<Transition> {
        if tool != ToolMode::Magic {
            return None;
        }
        if let Some(until) = self.cooldown_until {
            if time < until {
                return None;
            }
            self.cooldown_until = None;
        }
        let kind = gesture?;
        let target = MagicState::from_gesture(kind);
        if target == self.state {
            return None;
        }
        let from = self.state;
        self.state = target;
        self.cooldown_until = Some(time + self.config.cooldown_secs);
        info!("Magic state {:?} -> {:?} ({:?} gesture)", from, target, kind);
        Some(Transition {
            from,
            to: target,
            trigger: kind,
        })
    }

    /// Stroke-end rule: the category for the finished stroke. Idle maps to
    /// Neutral. The state itself persists into the next stroke; only the
    /// cooldown is cancelled.
    pub fn end_stroke(&mut self, tool: ToolMode) -> Category {
        self.cooldown_until = None;
        match tool.fixed_category() {
            Some(category) => category,
            None => self.state.category(),
        }
    }
}
