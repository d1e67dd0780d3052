#![warn(clippy::all, rust_2018_idioms)]

pub mod annotation;
pub mod config;
pub mod engine;
pub mod event;
pub mod gesture;
pub mod input;
pub mod resolver;
pub mod stroke;
pub mod tool;
pub mod util;

pub use annotation::{Annotation, AnnotationRecorder};
pub use config::{ConfigError, EngineConfig};
pub use engine::{Diagnostics, MarkerEngine};
pub use event::{EngineEvent, EngineEventHandler, EventBus};
pub use gesture::{GestureConfig, GestureDetections, GestureKind};
pub use input::{InputConfig, PointerEvent, PointerKind, SampleStream};
pub use resolver::{MagicState, ModeResolver, ResolverConfig};
pub use stroke::{Sample, StrokeWindow};
pub use tool::{Category, ToolMode};
