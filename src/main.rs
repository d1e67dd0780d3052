#[cfg(not(target_arch = "wasm32"))]
use egui::{Pos2, Rect, pos2, vec2};
#[cfg(not(target_arch = "wasm32"))]
use magic_marker::{EngineConfig, MarkerEngine, PointerEvent, PointerKind};

/// Headless replay of a few scripted pointer traces through the engine.
/// Run with `RUST_LOG=info` to watch the resolver work.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init(); // Log to stderr (run with `RUST_LOG=info`).

    let mut engine = MarkerEngine::new(EngineConfig::default());
    engine.set_surface_rect(Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0)));
    engine.set_on_annotations_change(|annotations| {
        log::info!("Annotation set now holds {} entries", annotations.len());
    });

    // A firm press: the Magic tool starts the stroke in High
    let mut time = 0.0;
    time = replay_stroke(
        &mut engine,
        PointerKind::Pen,
        &line_path(pos2(80.0, 300.0), pos2(420.0, 310.0), 24),
        0.9,
        None,
        time,
    );

    // A light stroke carrying a zig-zag: the gesture redirects it to Low
    time = replay_stroke(
        &mut engine,
        PointerKind::Pen,
        &sawtooth_path(pos2(100.0, 400.0), 5, 50.0, 40.0, 5),
        0.3,
        None,
        time + 1.0,
    );

    // A flipped stylus erases; no annotation is recorded
    replay_stroke(
        &mut engine,
        PointerKind::Pen,
        &line_path(pos2(120.0, 200.0), pos2(300.0, 200.0), 16),
        0.5,
        Some(175.0),
        time + 1.0,
    );

    for event in engine.take_events() {
        log::info!("Event: {:?}", event);
    }
    match serde_json::to_string_pretty(engine.annotations()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Export failed: {err}"),
    }
    engine.clear_annotations();
}

/// The engine is consumed as a library on web; nothing to demo here
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Feed one stroke through the engine at ~125 Hz, returning the end time
#[cfg(not(target_arch = "wasm32"))]
fn replay_stroke(
    engine: &mut MarkerEngine,
    kind: PointerKind,
    path: &[Pos2],
    pressure: f32,
    twist: Option<f32>,
    start_time: f64,
) -> f64 {
    let mut time = start_time;
    for (i, position) in path.iter().enumerate() {
        let event = if i == 0 {
            PointerEvent::Down {
                position: *position,
                kind,
                pressure: Some(pressure),
                twist,
                time,
            }
        } else {
            PointerEvent::Move {
                position: *position,
                pressure: Some(pressure),
                time,
            }
        };
        engine.handle_event(event);
        time += 0.008;
    }
    engine.handle_event(PointerEvent::Up);
    time
}

#[cfg(not(target_arch = "wasm32"))]
fn line_path(from: Pos2, to: Pos2, count: usize) -> Vec<Pos2> {
    (0..count)
        .map(|i| {
            let t = i as f32 / (count - 1) as f32;
            pos2(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
        })
        .collect()
}

/// Alternating up/down legs of consistent amplitude, left to right
#[cfg(not(target_arch = "wasm32"))]
fn sawtooth_path(origin: Pos2, legs: usize, leg_width: f32, amplitude: f32, per_leg: usize) -> Vec<Pos2> {
    let mut points = vec![origin];
    let mut up = true;
    for _ in 0..legs {
        let start = points[points.len() - 1];
        let target_y = if up { origin.y - amplitude } else { origin.y };
        for step in 1..=per_leg {
            let t = step as f32 / per_leg as f32;
            points.push(pos2(
                start.x + leg_width * t,
                start.y + (target_y - start.y) * t,
            ));
        }
        up = !up;
    }
    points
}
