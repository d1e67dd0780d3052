use serde::{Deserialize, Serialize};

/// Relevance category attached to a completed stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    High,
    Medium,
    Low,
    Neutral,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::High => "High",
            Category::Medium => "Medium",
            Category::Low => "Low",
            Category::Neutral => "Neutral",
        }
    }
}

/// The active annotation tool. Selected externally; read-only to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolMode {
    /// Category resolved from pressure and mid-stroke gestures
    Magic,
    /// Always tags High
    High,
    /// Always tags Medium
    Medium,
    /// Always tags Low
    Low,
    /// Always tags Neutral
    Neutral,
    /// Removes ink; never records an annotation
    Eraser,
    /// Scrolls the surface; never records an annotation
    Pan,
}

impl ToolMode {
    pub fn name(&self) -> &'static str {
        match self {
            ToolMode::Magic => "Magic",
            ToolMode::High => "High",
            ToolMode::Medium => "Medium",
            ToolMode::Low => "Low",
            ToolMode::Neutral => "Neutral",
            ToolMode::Eraser => "Eraser",
            ToolMode::Pan => "Pan",
        }
    }

    /// Fixed category for the direct tools; `None` for Magic, Eraser and Pan
    pub fn fixed_category(&self) -> Option<Category> {
        match self {
            ToolMode::High => Some(Category::High),
            ToolMode::Medium => Some(Category::Medium),
            ToolMode::Low => Some(Category::Low),
            ToolMode::Neutral => Some(Category::Neutral),
            _ => None,
        }
    }

    /// True for tools whose strokes never produce an annotation
    pub fn is_non_recording(&self) -> bool {
        matches!(self, ToolMode::Eraser | ToolMode::Pan)
    }
}
