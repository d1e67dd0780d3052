use egui::{Pos2, pos2};
use magic_marker::resolver::{MagicState, ModeResolver, ResolverConfig};
use magic_marker::stroke::{Sample, StrokeWindow};
use magic_marker::{
    Category, EngineConfig, EngineEvent, EngineEventHandler, GestureKind, MarkerEngine,
    PointerEvent, PointerKind, ToolMode,
};
use std::f32::consts::TAU;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn circle_path(center: Pos2, radius: f32, count: usize) -> Vec<Pos2> {
    (0..count)
        .map(|i| {
            let angle = i as f32 * TAU / (count - 1) as f32;
            pos2(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

fn rectangle_path(origin: Pos2, width: f32, height: f32, per_edge: usize) -> Vec<Pos2> {
    let corners = [
        origin,
        pos2(origin.x + width, origin.y),
        pos2(origin.x + width, origin.y + height),
        pos2(origin.x, origin.y + height),
    ];
    let mut points = Vec::new();
    for i in 0..4 {
        let start = corners[i];
        let end = corners[(i + 1) % 4];
        for step in 0..per_edge {
            let t = step as f32 / per_edge as f32;
            points.push(pos2(
                start.x + (end.x - start.x) * t,
                start.y + (end.y - start.y) * t,
            ));
        }
    }
    points.push(origin);
    points
}

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

fn line_path(from: Pos2, to: Pos2, count: usize) -> Vec<Pos2> {
    (0..count)
        .map(|i| {
            let t = i as f32 / (count - 1) as f32;
            pos2(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
        })
        .collect()
}

/// Feed a pointer-down and the remaining path as moves, leaving the stroke
/// open. Returns the time after the last sample.
fn replay_stroke(
    engine: &mut MarkerEngine,
    path: &[Pos2],
    pressure: f32,
    start_time: f64,
    step: f64,
) -> f64 {
    engine.handle_event(PointerEvent::Down {
        position: path[0],
        kind: PointerKind::Pen,
        pressure: Some(pressure),
        twist: None,
        time: start_time,
    });
    feed_moves(engine, &path[1..], pressure, start_time + step, step)
}

fn feed_moves(
    engine: &mut MarkerEngine,
    path: &[Pos2],
    pressure: f32,
    start_time: f64,
    step: f64,
) -> f64 {
    let mut time = start_time;
    for position in path {
        engine.handle_event(PointerEvent::Move {
            position: *position,
            pressure: Some(pressure),
            time,
        });
        time += step;
    }
    time
}

fn count_state_changes(events: &[EngineEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, EngineEvent::MagicStateChanged { .. }))
        .count()
}

#[test]
fn test_window_never_exceeds_capacity() {
    let mut window = StrokeWindow::new(40);
    for i in 0..100 {
        window.append(Sample::new(pos2(i as f32, 0.0), i as f64 * 0.008));
        assert!(window.len() <= 40);
    }
    assert_eq!(window.len(), 40);

    // The oldest samples were evicted; sample 60 is now the front
    let positions = window.positions();
    assert_eq!(positions[0], pos2(60.0, 0.0));
    assert_eq!(positions[39], pos2(99.0, 0.0));
}

#[test]
fn test_window_reset_empties() {
    let mut window = StrokeWindow::new(40);
    for i in 0..10 {
        window.append(Sample::new(pos2(i as f32, 0.0), 0.0));
    }
    window.reset();
    assert!(window.is_empty());
    assert_eq!(window.len(), 0);
    assert_eq!(window.capacity(), 40);
}

#[test]
fn test_hard_press_starts_high() {
    let mut resolver = ModeResolver::new(ResolverConfig::default());
    assert_eq!(resolver.state(), MagicState::Idle);

    resolver.begin_stroke(ToolMode::Magic, 0.9);
    assert_eq!(resolver.state(), MagicState::High);
}

#[test]
fn test_light_press_starts_medium_when_fresh() {
    let mut resolver = ModeResolver::new(ResolverConfig::default());
    resolver.begin_stroke(ToolMode::Magic, 0.3);
    assert_eq!(resolver.state(), MagicState::Medium);
}

#[test]
fn test_state_persists_across_strokes() {
    let mut resolver = ModeResolver::new(ResolverConfig::default());
    resolver.begin_stroke(ToolMode::Magic, 0.3);

    let transition = resolver.observe(ToolMode::Magic, Some(GestureKind::ZigZag), 1.0);
    assert!(transition.is_some());
    assert_eq!(resolver.end_stroke(ToolMode::Magic), Category::Low);

    // The next light stroke keeps the earned Low instead of reverting
    resolver.begin_stroke(ToolMode::Magic, 0.3);
    assert_eq!(resolver.state(), MagicState::Low);
    resolver.end_stroke(ToolMode::Magic);

    // A hard press still overrides the persisted state
    resolver.begin_stroke(ToolMode::Magic, 0.95);
    assert_eq!(resolver.state(), MagicState::High);
}

#[test]
fn test_cooldown_suppresses_second_gesture() {
    let mut resolver = ModeResolver::new(ResolverConfig::default());
    resolver.begin_stroke(ToolMode::Magic, 0.3);

    let first = resolver.observe(ToolMode::Magic, Some(GestureKind::Circle), 1.0);
    assert_eq!(first.map(|t| t.to), Some(MagicState::High));

    // Inside the 0.5 s cooldown nothing gets through
    assert!(resolver.observe(ToolMode::Magic, Some(GestureKind::Square), 1.2).is_none());
    assert!(resolver.observe(ToolMode::Magic, Some(GestureKind::Square), 1.45).is_none());
    assert_eq!(resolver.state(), MagicState::High);

    // Past the deadline the next gesture applies again
    let second = resolver.observe(ToolMode::Magic, Some(GestureKind::Square), 1.6);
    assert_eq!(second.map(|t| t.to), Some(MagicState::Medium));
}

#[test]
fn test_stroke_boundaries_cancel_cooldown() {
    let mut resolver = ModeResolver::new(ResolverConfig::default());
    resolver.begin_stroke(ToolMode::Magic, 0.3);
    assert!(resolver.observe(ToolMode::Magic, Some(GestureKind::Circle), 1.0).is_some());
    resolver.end_stroke(ToolMode::Magic);

    // The new stroke starts inside what would have been the old cooldown
    resolver.begin_stroke(ToolMode::Magic, 0.3);
    let transition = resolver.observe(ToolMode::Magic, Some(GestureKind::ZigZag), 1.1);
    assert_eq!(transition.map(|t| t.to), Some(MagicState::Low));
}

#[test]
fn test_matching_gesture_does_not_retrigger() {
    let mut resolver = ModeResolver::new(ResolverConfig::default());
    resolver.begin_stroke(ToolMode::Magic, 0.9);
    assert_eq!(resolver.state(), MagicState::High);

    // Circle maps to High, which is already the state
    assert!(resolver.observe(ToolMode::Magic, Some(GestureKind::Circle), 1.0).is_none());
    assert_eq!(resolver.state(), MagicState::High);
}

#[test]
fn test_non_magic_tools_pass_through() {
    let mut resolver = ModeResolver::new(ResolverConfig::default());

    resolver.begin_stroke(ToolMode::High, 0.9);
    assert_eq!(resolver.state(), MagicState::Idle);

    assert!(resolver.observe(ToolMode::High, Some(GestureKind::Circle), 1.0).is_none());
    assert_eq!(resolver.state(), MagicState::Idle);

    assert_eq!(resolver.end_stroke(ToolMode::High), Category::High);
    assert_eq!(resolver.end_stroke(ToolMode::Neutral), Category::Neutral);
}

#[test]
fn test_idle_maps_to_neutral() {
    let mut resolver = ModeResolver::new(ResolverConfig::default());
    assert_eq!(resolver.end_stroke(ToolMode::Magic), Category::Neutral);
}

#[test]
fn test_mid_stroke_circle_promotes_light_stroke_to_high() {
    let mut engine = MarkerEngine::new(EngineConfig::default());
    let circle = circle_path(pos2(200.0, 200.0), 50.0, 40);

    replay_stroke(&mut engine, &circle, 0.2, 0.0, 0.008);
    engine.handle_event(PointerEvent::Up);

    // The annotation carries the state at stroke end, not at stroke start
    assert_eq!(engine.annotations().len(), 1);
    assert_eq!(engine.annotations()[0].category(), Category::High);
    assert_eq!(engine.magic_state(), MagicState::High);

    let events = engine.take_events();
    assert!(events.contains(&EngineEvent::MagicStateChanged {
        old: MagicState::Medium,
        new: MagicState::High,
    }));
}

#[test]
fn test_square_gesture_demotes_hard_press_to_medium() {
    let mut engine = MarkerEngine::new(EngineConfig::default());
    let rectangle = rectangle_path(pos2(100.0, 100.0), 160.0, 100.0, 9);

    replay_stroke(&mut engine, &rectangle, 0.9, 0.0, 0.008);
    engine.handle_event(PointerEvent::Up);

    assert_eq!(engine.annotations().len(), 1);
    assert_eq!(engine.annotations()[0].category(), Category::Medium);

    let events = engine.take_events();
    assert!(events.contains(&EngineEvent::MagicStateChanged {
        old: MagicState::High,
        new: MagicState::Medium,
    }));
}

#[test]
fn test_cooldown_blocks_second_gesture_in_one_stroke() {
    let mut engine = MarkerEngine::new(EngineConfig::default());
    let circle = circle_path(pos2(200.0, 200.0), 50.0, 40);
    // The sawtooth continues from the circle's end point
    let sawtooth = sawtooth_path(pos2(250.0, 200.0), 5, 50.0, 40.0, 5);

    let time = replay_stroke(&mut engine, &circle, 0.2, 0.0, 0.008);
    // Drawn immediately, the whole sawtooth falls inside the cooldown
    feed_moves(&mut engine, &sawtooth[1..], 0.2, time, 0.008);
    engine.handle_event(PointerEvent::Up);

    assert_eq!(engine.annotations().len(), 1);
    assert_eq!(engine.annotations()[0].category(), Category::High);

    // Stroke start Idle -> Medium plus the circle transition; nothing more
    let events = engine.take_events();
    assert_eq!(count_state_changes(&events), 2);
}

#[test]
fn test_gesture_applies_again_after_cooldown_expires() {
    let mut engine = MarkerEngine::new(EngineConfig::default());
    let circle = circle_path(pos2(200.0, 200.0), 50.0, 40);
    let sawtooth = sawtooth_path(pos2(250.0, 200.0), 5, 50.0, 40.0, 5);

    let time = replay_stroke(&mut engine, &circle, 0.2, 0.0, 0.008);
    // Slow sawtooth: its direction changes accumulate after the deadline
    feed_moves(&mut engine, &sawtooth[1..], 0.2, time, 0.1);
    engine.handle_event(PointerEvent::Up);

    assert_eq!(engine.annotations().len(), 1);
    assert_eq!(engine.annotations()[0].category(), Category::Low);
    assert_eq!(engine.magic_state(), MagicState::Low);

    // Idle -> Medium, Medium -> High (circle), High -> Low (zig-zag)
    let events = engine.take_events();
    assert_eq!(count_state_changes(&events), 3);
}

#[test]
fn test_magic_state_biases_next_stroke() {
    let mut engine = MarkerEngine::new(EngineConfig::default());

    // A firm straight stroke resolves High
    replay_stroke(
        &mut engine,
        &line_path(pos2(50.0, 300.0), pos2(400.0, 310.0), 24),
        0.9,
        0.0,
        0.008,
    );
    engine.handle_event(PointerEvent::Up);
    engine.take_events();

    // A light follow-up stroke keeps the persisted High
    replay_stroke(
        &mut engine,
        &line_path(pos2(50.0, 350.0), pos2(400.0, 360.0), 24),
        0.2,
        10.0,
        0.008,
    );
    engine.handle_event(PointerEvent::Up);

    assert_eq!(engine.annotations().len(), 2);
    assert_eq!(engine.annotations()[1].category(), Category::High);

    // No state change happened during the second stroke
    assert_eq!(count_state_changes(&engine.take_events()), 0);
}

#[test]
fn test_long_stroke_keeps_window_capped() {
    let mut engine = MarkerEngine::new(EngineConfig::default());
    let line = line_path(pos2(50.0, 300.0), pos2(700.0, 320.0), 100);

    replay_stroke(&mut engine, &line, 0.5, 0.0, 0.008);
    let diagnostics = engine.diagnostics();
    assert_eq!(diagnostics.window_size, 40);
    assert!(!diagnostics.circle_detected);
    assert!(!diagnostics.square_detected);
    assert!(!diagnostics.zigzag_detected);

    engine.handle_event(PointerEvent::Up);
}

struct CountingHandler {
    seen: Arc<AtomicUsize>,
}

impl EngineEventHandler for CountingHandler {
    fn handle_event(&mut self, _event: &EngineEvent) {
        self.seen.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_subscribed_handler_receives_every_event() {
    let seen = Arc::new(AtomicUsize::new(0));
    let mut engine = MarkerEngine::new(EngineConfig::default());
    engine.subscribe(Box::new(CountingHandler { seen: seen.clone() }));

    replay_stroke(
        &mut engine,
        &line_path(pos2(50.0, 300.0), pos2(400.0, 310.0), 24),
        0.9,
        0.0,
        0.008,
    );
    engine.handle_event(PointerEvent::Up);

    // Idle -> High at stroke start, then StrokeCompleted and
    // AnnotationsChanged at stroke end
    assert_eq!(seen.load(Ordering::SeqCst), 3);
    // The polling drain sees the same events as the subscriber
    assert_eq!(engine.take_events().len(), 3);
}

#[test]
fn test_leave_finalizes_like_up() {
    let mut engine = MarkerEngine::new(EngineConfig::default());

    replay_stroke(
        &mut engine,
        &line_path(pos2(50.0, 300.0), pos2(400.0, 310.0), 24),
        0.9,
        0.0,
        0.008,
    );
    engine.handle_event(PointerEvent::Leave);

    assert!(!engine.is_stroke_active());
    assert_eq!(engine.annotations().len(), 1);
    assert_eq!(engine.annotations()[0].category(), Category::High);
}
