use crate::tool::{Category, ToolMode};
use crate::util::time;
use egui::Pos2;
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded relevance tag. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    id: Uuid,
    category: Category,
    pressure: f32,
    created_at: f64,
    anchor: Pos2,
}

impl Annotation {
    fn new(category: Category, pressure: f32, anchor: Pos2) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            pressure,
            created_at: time::current_time_secs(),
            anchor,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Pressure sampled at stroke end, in [0, 1]
    pub fn pressure(&self) -> f32 {
        self.pressure
    }

    /// Recording time in seconds, on the `util::time` clock
    pub fn created_at(&self) -> f64 {
        self.created_at
    }

    /// Last known stroke position, in canvas space
    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }
}

/// Maintains the append-only, ordered set of recorded annotations and
/// notifies a single external observer with the full set on every change.
///
/// The set only ever grows or is cleared whole; nothing removes individual
/// entries.
pub struct AnnotationRecorder {
    annotations: Vec<Annotation>,
    on_change: Option<Box<dyn FnMut(&[Annotation])>>,
}

impl std::fmt::Debug for AnnotationRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationRecorder")
            .field("annotations", &self.annotations.len())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl Default for AnnotationRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationRecorder {
    pub fn new() -> Self {
        Self {
            annotations: Vec::new(),
            on_change: None,
        }
    }

    /// Replace the annotations-changed observer. The observer always
    /// receives the complete current set, never a delta.
    pub fn set_on_change(&mut self, callback: impl FnMut(&[Annotation]) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Finalize a completed stroke into an annotation.
    /// Eraser and Pan strokes record nothing and return `None`.
    pub fn record_stroke(
        &mut self,
        tool: ToolMode,
        category: Category,
        pressure: f32,
        anchor: Pos2,
    ) -> Option<Annotation> {
        if tool.is_non_recording() {
            return None;
        }
        let annotation = Annotation::new(category, pressure, anchor);
        self.annotations.push(annotation.clone());
        info!(
            "Recorded {} annotation ({} total)",
            category.name(),
            self.annotations.len()
        );
        self.notify();
        Some(annotation)
    }

    /// Clear every annotation. Fires the observer with the empty set.
    pub fn clear_all(&mut self) {
        self.annotations.clear();
        info!("Cleared all annotations");
        self.notify();
    }

    /// Recorded annotations in recording order
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Pretty-printed JSON export of the current set
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.annotations)
    }

    fn notify(&mut self) {
        if let Some(callback) = &mut self.on_change {
            callback(&self.annotations);
        }
    }
}
