//! End-to-end runs through the headless host

use glam::DVec2;

use hoppy_bunny::Tuning;
use hoppy_bunny::consts::FIXED_DELTA;
use hoppy_bunny::host::{ACTOR_START, Headless};
use hoppy_bunny::sim::{ButtonState, GameEvent, GamePhase, LayerKind, Node};

fn run_frames(game: &mut Headless, frames: u32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..frames {
        events.extend(game.update(FIXED_DELTA));
    }
    events
}

#[test]
fn test_untouched_actor_falls_and_crashes() {
    let mut game = Headless::new(Tuning::default(), 3);
    let events = run_frames(&mut game, 120);

    assert_eq!(game.state.phase, GamePhase::GameOver);
    assert_eq!(game.state.restart_button, ButtonState::Active);
    assert!(events.contains(&GameEvent::ShakeScene));
    assert!(events.contains(&GameEvent::RestartButton(ButtonState::Active)));
    assert!(events.contains(&GameEvent::GameOver { points: 0 }));
    assert!(!game.body.collision_enabled);

    // Frozen from here on
    let ticks = game.state.time_ticks;
    assert!(run_frames(&mut game, 30).is_empty());
    assert_eq!(game.state.time_ticks, ticks);
}

#[test]
fn test_collecting_an_item() {
    let mut game = Headless::new(Tuning::default(), 3);
    let id = game.state.next_entity_id();
    game.state.items.nodes.push(Node {
        id,
        pos: ACTOR_START.as_dvec2(),
        width: game.state.tuning.items.width,
    });

    let events = game.update(FIXED_DELTA);

    assert_eq!(game.state.points, 1);
    assert_eq!(game.state.phase, GamePhase::Active);
    assert!(game.state.items.nodes.is_empty());
    assert!(events.contains(&GameEvent::ScoreChanged(1)));
    assert!(events.contains(&GameEvent::Despawned {
        layer: LayerKind::Items,
        id,
    }));
}

#[test]
fn test_passing_a_gap_scores_once() {
    let mut game = Headless::new(Tuning::default(), 3);
    let id = game.state.next_entity_id();
    game.state.obstacles.nodes.push(Node {
        id,
        pos: ACTOR_START.as_dvec2() + DVec2::new(1.0, 0.0),
        width: game.state.tuning.obstacles.width,
    });

    game.update(FIXED_DELTA);
    assert_eq!(game.state.points, 1);

    run_frames(&mut game, 5);
    assert_eq!(game.state.points, 1);
    assert_eq!(game.state.phase, GamePhase::Active);
}

#[test]
fn test_hitting_an_obstacle_ends_the_run() {
    let mut game = Headless::new(Tuning::default(), 3);
    let id = game.state.next_entity_id();
    game.state.obstacles.nodes.push(Node {
        id,
        pos: ACTOR_START.as_dvec2() + DVec2::new(20.0, 150.0),
        width: game.state.tuning.obstacles.width,
    });

    game.update(FIXED_DELTA);

    assert_eq!(game.state.phase, GamePhase::GameOver);
    assert_eq!(game.state.points, 0);
    assert_eq!(game.body.rotation, (-90f32).to_radians());
}

#[test]
fn test_restart_after_crash() {
    let mut game = Headless::new(Tuning::default(), 3);
    run_frames(&mut game, 120);
    assert_eq!(game.state.phase, GamePhase::GameOver);

    game.restart();

    assert_eq!(game.state.phase, GamePhase::Active);
    assert_eq!(game.state.points, 0);
    assert_eq!(game.state.runs, 1);
    assert_eq!(game.body.pos, ACTOR_START);
    assert!(game.body.collision_enabled);

    let events = game.update(FIXED_DELTA);
    assert!(events.contains(&GameEvent::ScoreChanged(0)));
    assert_eq!(game.state.time_ticks, 1);
}

#[test]
fn test_autopilot_runs_are_reproducible() {
    let play = |seed| {
        let mut game = Headless::new(Tuning::default(), seed);
        for _ in 0..3000 {
            if game.autopilot_wants_tap() {
                game.tap();
            }
            game.update(FIXED_DELTA);
            if !game.state.is_active() {
                break;
            }
        }
        (game.state.points, game.state.time_ticks, game.body.pos)
    };

    assert_eq!(play(77), play(77));
}

#[test]
fn test_tuning_changes_the_run() {
    let tuning = Tuning::from_json(r#"{ "start_scroll_speed": 300.0 }"#).unwrap();
    let mut game = Headless::new(tuning, 3);
    game.update(FIXED_DELTA);
    assert!((game.state.ground.pos.x + 300.1 * FIXED_DELTA).abs() < 1e-4);
}
