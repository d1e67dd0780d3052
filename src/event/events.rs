use crate::resolver::MagicState;
use crate::tool::{Category, ToolMode};

/// Notifications broadcast by the engine to registered handlers.
///
/// The annotations-changed observer on the recorder carries the full set;
/// these are the lighter companion notifications for hosts that only need
/// to know that something happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    ToolChanged {
        old: ToolMode,
        new: ToolMode,
    },
    MagicStateChanged {
        old: MagicState,
        new: MagicState,
    },
    StrokeCompleted {
        category: Category,
    },
    AnnotationsChanged {
        count: usize,
    },
}
