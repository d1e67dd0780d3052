use crate::annotation::{Annotation, AnnotationRecorder};
use crate::config::EngineConfig;
use crate::event::{EngineEvent, EngineEventHandler, EventBus};
use crate::gesture;
use crate::input::{PointerEvent, PointerKind, SampleStream};
use crate::resolver::{MagicState, ModeResolver};
use crate::stroke::StrokeWindow;
use crate::tool::ToolMode;
use egui::{Pos2, Rect};
use log::{debug, info};

/// Per-sample introspection snapshot for diagnostic overlays.
/// Observational only; nothing in the engine reads it back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Samples the classifier saw on the last pass
    pub window_size: usize,
    pub circle_detected: bool,
    pub square_detected: bool,
    pub zigzag_detected: bool,
    pub magic_state: MagicState,
}

/// Bookkeeping for the stroke currently in progress
#[derive(Debug, Clone, Copy)]
struct ActiveStroke {
    /// Tool pinned at stroke start; a twist override lasts one stroke
    tool: ToolMode,
    last_position: Pos2,
    last_pressure: f32,
}

/// Facade wiring the sample stream, stroke window, gesture detectors, mode
/// resolver, and annotation recorder behind a single pointer-event entry
/// point.
///
/// Events are handled to completion, one at a time, on one thread; the
/// stroke lifecycle (start, samples, end) is atomic with respect to every
/// state reset the engine performs.
pub struct MarkerEngine {
    config: EngineConfig,
    stream: SampleStream,
    window: StrokeWindow,
    resolver: ModeResolver,
    recorder: AnnotationRecorder,
    bus: EventBus,
    tool: ToolMode,
    stroke: Option<ActiveStroke>,
    diagnostics: Diagnostics,
    pending_events: Vec<EngineEvent>,
}

impl Default for MarkerEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl MarkerEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            stream: SampleStream::new(config.input.clone()),
            window: StrokeWindow::new(config.window.capacity),
            resolver: ModeResolver::new(config.resolver.clone()),
            recorder: AnnotationRecorder::new(),
            bus: EventBus::new(),
            tool: ToolMode::Magic,
            stroke: None,
            diagnostics: Diagnostics::default(),
            pending_events: Vec::new(),
            config,
        }
    }

    /// Update the drawing-surface rectangle used to map host positions
    /// into canvas space
    pub fn set_surface_rect(&mut self, rect: Rect) {
        self.stream.set_surface_rect(rect);
    }

    /// Select the active tool. A stroke already in progress keeps the tool
    /// it started with.
    pub fn set_tool(&mut self, tool: ToolMode) {
        if tool == self.tool {
            return;
        }
        let old = self.tool;
        self.tool = tool;
        info!("Tool changed: {} -> {}", old.name(), tool.name());
        self.publish(EngineEvent::ToolChanged { old, new: tool });
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn magic_state(&self) -> MagicState {
        self.resolver.state()
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.recorder.annotations()
    }

    pub fn is_stroke_active(&self) -> bool {
        self.stroke.is_some()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the annotations-changed observer on the recorder
    pub fn set_on_annotations_change(&mut self, callback: impl FnMut(&[Annotation]) + 'static) {
        self.recorder.set_on_change(callback);
    }

    /// Subscribe a handler to engine events
    pub fn subscribe(&self, handler: Box<dyn EngineEventHandler>) {
        self.bus.subscribe(handler);
    }

    /// Drain the events accumulated since the last call, for hosts that
    /// poll once per frame instead of subscribing
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Empty the annotation set. Fires the recorder observer with the
    /// empty set.
    pub fn clear_annotations(&mut self) {
        self.recorder.clear_all();
        self.publish(EngineEvent::AnnotationsChanged { count: 0 });
    }

    /// Handle one pointer event. Events are expected in capture order.
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                kind,
                pressure,
                twist,
                time,
            } => self.begin_stroke(position, kind, pressure, twist, time),
            PointerEvent::Move {
                position,
                pressure,
                time,
            } => self.continue_stroke(position, pressure, time),
            PointerEvent::Up | PointerEvent::Leave => self.end_stroke(),
        }
    }

    fn begin_stroke(
        &mut self,
        position: Pos2,
        kind: PointerKind,
        pressure: Option<f32>,
        twist: Option<f32>,
        time: f64,
    ) {
        if self.stroke.is_some() {
            // A down without a matching up; finish the dangling stroke first
            self.end_stroke();
        }
        if !self.stream.contains(position) {
            return;
        }
        let tool = self.stream.twist_override(kind, twist).unwrap_or(self.tool);
        let pressure = self.stream.effective_pressure(pressure);
        let sample = self.stream.make_sample(position, time);

        self.window.reset();
        self.window.append(sample);

        let old_state = self.resolver.state();
        self.resolver.begin_stroke(tool, pressure);
        let new_state = self.resolver.state();
        if new_state != old_state {
            self.publish(EngineEvent::MagicStateChanged {
                old: old_state,
                new: new_state,
            });
        }

        self.stroke = Some(ActiveStroke {
            tool,
            last_position: sample.position,
            last_pressure: pressure,
        });
        debug!(
            "Stroke started with {} at {:?} (pressure {:.2})",
            tool.name(),
            sample.position,
            pressure
        );
        self.reclassify(time);
    }

    fn continue_stroke(&mut self, position: Pos2, pressure: Option<f32>, time: f64) {
        if self.stroke.is_none() {
            // Hover movement; nothing in progress
            return;
        }
        let sample = self.stream.make_sample(position, time);
        let pressure = self.stream.effective_pressure(pressure);
        if let Some(stroke) = &mut self.stroke {
            stroke.last_position = sample.position;
            stroke.last_pressure = pressure;
        }
        self.window.append(sample);
        self.reclassify(time);
    }

    fn end_stroke(&mut self) {
        let Some(stroke) = self.stroke.take() else {
            return;
        };
        let category = self.resolver.end_stroke(stroke.tool);
        let recorded = self.recorder.record_stroke(
            stroke.tool,
            category,
            stroke.last_pressure,
            stroke.last_position,
        );
        self.window.reset();
        if recorded.is_some() {
            self.publish(EngineEvent::StrokeCompleted { category });
            self.publish(EngineEvent::AnnotationsChanged {
                count: self.recorder.len(),
            });
        } else {
            debug!("Stroke completed with {} (no annotation)", stroke.tool.name());
        }
    }

    /// Re-run the three detectors over the current window and feed the
    /// result to the resolver. A transition resets the window so the same
    /// gesture cannot re-trigger from leftover samples.
    fn reclassify(&mut self, time: f64) {
        let Some(stroke) = self.stroke else {
            return;
        };
        let detections = gesture::detect(&self.window, &self.config.gesture);
        let window_size = self.window.len();
        let classified = gesture::classify_detections(detections);
        if let Some(transition) = self.resolver.observe(stroke.tool, classified, time) {
            self.window.reset();
            self.publish(EngineEvent::MagicStateChanged {
                old: transition.from,
                new: transition.to,
            });
        }
        self.diagnostics = Diagnostics {
            window_size,
            circle_detected: detections.circle,
            square_detected: detections.square,
            zigzag_detected: detections.zigzag,
            magic_state: self.resolver.state(),
        };
    }

    fn publish(&mut self, event: EngineEvent) {
        self.bus.emit(event);
        self.pending_events.push(event);
    }
}
