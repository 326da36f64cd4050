//! Fixed timestep simulation tick
//!
//! The three entry points the host drives: [`on_tap`], [`tick`] and
//! [`on_contact`]. All of them are no-ops once the run is over.

use glam::{DVec2, Vec2};
use rand::Rng;

use super::contact::{EntityKind, Participant};
use super::scene::{ActorBody, SceneTransform};
use super::state::{
    ButtonState, GameEvent, GamePhase, GameState, Layer, Node, SoundEffect, SpawnKind,
};
use crate::clamp_degrees;

/// Tap input: kill the current vertical motion and hop
pub fn on_tap(state: &mut GameState, actor: &mut impl ActorBody) {
    if !state.is_active() {
        return;
    }

    // Reset vertical velocity so hops don't fight accumulated fall speed
    let mut vel = actor.velocity();
    vel.y = 0.0;
    actor.set_velocity(vel);

    actor.apply_impulse(Vec2::new(0.0, state.tuning.tap_impulse));
    actor.apply_angular_impulse(state.tuning.tap_angular_impulse);

    state.time_since_input = 0.0;
    state.events.push(GameEvent::Sound(SoundEffect::Flap));
}

/// Advance the game state by one fixed timestep.
///
/// `_frame_delta` is what the frame clock measured; the simulation always
/// steps by `tuning.fixed_delta` regardless.
pub fn tick(
    state: &mut GameState,
    actor: &mut impl ActorBody,
    transform: &impl SceneTransform,
    _frame_delta: f64,
) {
    if !state.is_active() {
        return;
    }

    let t = &state.tuning;
    let dt = t.fixed_delta;

    // Cap vertical velocity
    let mut vel = actor.velocity();
    if vel.y > t.max_vertical_velocity {
        vel.y = t.max_vertical_velocity;
        actor.set_velocity(vel);
    }

    // Nose dive when the player stops tapping
    if state.time_since_input > t.nose_dive_delay {
        actor.apply_angular_impulse((f64::from(t.nose_dive_torque) * dt) as f32);
    }

    actor.set_rotation(clamp_degrees(
        actor.rotation(),
        t.min_rotation_deg,
        t.max_rotation_deg,
    ));
    actor.set_angular_velocity(
        actor
            .angular_velocity()
            .clamp(-t.max_angular_velocity, t.max_angular_velocity),
    );

    let acceleration = t.scroll_acceleration;
    let obstacle_decay = t.obstacles.threshold_decay;
    let item_decay = t.items.threshold_decay;

    state.time_since_input += dt;
    state.scroll_speed += acceleration;
    state.obstacle_timer.threshold -= obstacle_decay;
    state.item_timer.threshold -= item_decay;
    state.time_ticks += 1;

    scroll_ground(state, transform);
    scroll_clouds(state, transform);
    update_obstacles(state, transform);
    update_items(state, transform);
}

/// Scroll the ground layer at the current scroll speed, recycling tiles
pub fn scroll_ground(state: &mut GameState, transform: &impl SceneTransform) {
    let shift = state.scroll_speed * state.tuning.fixed_delta;
    let half_width = state.tuning.viewport_half_width;
    recycle_tiles(&mut state.ground, shift, half_width, transform);
}

/// Scroll the cloud layer at its own fixed speed, recycling tiles
pub fn scroll_clouds(state: &mut GameState, transform: &impl SceneTransform) {
    let shift = state.tuning.cloud_scroll_speed * state.tuning.fixed_delta;
    let half_width = state.tuning.viewport_half_width;
    recycle_tiles(&mut state.clouds, shift, half_width, transform);
}

/// Scroll, expire and spawn obstacles
pub fn update_obstacles(state: &mut GameState, transform: &impl SceneTransform) {
    update_spawned(state, SpawnKind::Obstacle, transform);
}

/// Scroll, expire and spawn bonus items
pub fn update_items(state: &mut GameState, transform: &impl SceneTransform) {
    update_spawned(state, SpawnKind::Item, transform);
}

/// Shift a tile layer left and teleport every tile that has left the
/// viewport to just past its right edge. Tiles are never created or dropped.
fn recycle_tiles(
    layer: &mut Layer,
    shift: f64,
    half_width: f64,
    transform: &impl SceneTransform,
) {
    layer.pos.x -= shift;

    for i in 0..layer.nodes.len() {
        let node = layer.nodes[i];
        let world = transform.to_world(layer, node.pos);
        if world.x <= -node.width / 2.0 {
            let target = DVec2::new(half_width + node.width, world.y);
            layer.nodes[i].pos = transform.to_layer(layer, target);
            log::trace!("{:?} tile {} recycled", layer.kind, node.id);
        }
    }
}

/// Shared body of the obstacle and item updates.
///
/// Expiry is an absolute world check (`x <= 0`), unlike tile recycling
/// which is relative to the viewport.
fn update_spawned(state: &mut GameState, kind: SpawnKind, transform: &impl SceneTransform) {
    let dt = state.tuning.fixed_delta;
    let shift = state.scroll_speed * dt;
    let rule = state.spawn_rule(kind);
    let layer_kind = kind.layer();

    let layer = state.layer_mut(layer_kind);
    layer.pos.x -= shift;

    let expired: Vec<u32> = {
        let view: &Layer = layer;
        view.nodes
            .iter()
            .filter(|n| transform.to_world(view, n.pos).x <= 0.0)
            .map(|n| n.id)
            .collect()
    };
    layer.nodes.retain(|n| !expired.contains(&n.id));
    for id in expired {
        log::debug!("{:?} {} left the scene", layer_kind, id);
        state.events.push(GameEvent::Despawned {
            layer: layer_kind,
            id,
        });
    }

    if state.spawn_timer_mut(kind).is_due() {
        let id = state.next_entity_id();
        let y = state.rng.random_range(rule.y_min..=rule.y_max);

        let layer = state.layer_mut(layer_kind);
        let pos = transform.to_layer(layer, DVec2::new(rule.x, y));
        layer.nodes.push(Node {
            id,
            pos,
            width: rule.width,
        });

        log::debug!("Spawned {:?} {} at world ({}, {:.1})", kind, id, rule.x, y);
        state.events.push(GameEvent::Spawned {
            layer: layer_kind,
            id,
            pos,
        });
        state.spawn_timer_mut(kind).elapsed = 0.0;
    }

    state.spawn_timer_mut(kind).elapsed += dt;
}

/// Contact callback from the physics engine
pub fn on_contact(
    state: &mut GameState,
    actor: &mut impl ActorBody,
    a: &Participant<'_>,
    b: &Participant<'_>,
) {
    if !state.is_active() {
        return;
    }

    let kinds = [a.kind(), b.kind()];

    if kinds.contains(&EntityKind::Goal) {
        award_point(state);
        return;
    }

    if kinds.contains(&EntityKind::Item) {
        award_point(state);
        for p in [a, b] {
            if p.kind() != EntityKind::Item {
                continue;
            }
            if let Some(node) = p.node {
                if state.layer_mut(node.layer).remove(node.id) {
                    state.events.push(GameEvent::Despawned {
                        layer: node.layer,
                        id: node.id,
                    });
                }
            }
        }
        return;
    }

    game_over(state, actor);
}

fn award_point(state: &mut GameState) {
    state.points += 1;
    state.events.push(GameEvent::ScoreChanged(state.points));
    state.events.push(GameEvent::Sound(SoundEffect::Goal));
}

fn game_over(state: &mut GameState, actor: &mut impl ActorBody) {
    state.phase = GamePhase::GameOver;

    actor.set_allows_rotation(false);
    actor.set_angular_velocity(0.0);
    actor.cancel_actions();
    // Face down, falling through whatever is below
    actor.set_rotation(state.tuning.crash_rotation_deg.to_radians());
    actor.set_collision_enabled(false);

    state.events.push(GameEvent::ShakeScene);
    state.restart_button = ButtonState::Active;
    state.events.push(GameEvent::RestartButton(ButtonState::Active));
    state.events.push(GameEvent::GameOver {
        points: state.points,
    });

    log::info!(
        "Game over after {} ticks with {} points",
        state.time_ticks,
        state.points
    );
}
