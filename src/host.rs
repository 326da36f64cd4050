//! Headless integration layer
//!
//! Stands in for the engine around the simulation: a minimal rigid body for
//! the actor, gravity integration, a frame accumulator feeding fixed ticks,
//! and a geometric contact detector. Used by the native runner and tests.

use glam::Vec2;

use crate::consts::MAX_SUBSTEPS;
use crate::sim::{
    ActorBody, GameEvent, GameState, LayerOffset, Participant, SceneTransform, on_contact, on_tap,
    tick,
};
use crate::tuning::Tuning;

/// Downward acceleration applied to the actor (pixels/s²)
pub const GRAVITY: f32 = -900.0;
/// Where the actor sits at the start of a run (world space)
pub const ACTOR_START: Vec2 = Vec2::new(80.0, 300.0);
/// Collision radius of the actor
pub const ACTOR_RADIUS: f64 = 16.0;
/// Top edge of the ground strip
pub const GROUND_TOP: f64 = 86.0;

/// Physics categories
pub const HERO_CATEGORY: u32 = 1;
pub const GROUND_CATEGORY: u32 = 2;
pub const OBSTACLE_CATEGORY: u32 = 4;

const HERO_TAG: &str = "hero";

/// A point-mass rigid body with rotation
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radians
    pub rotation: f32,
    pub angular_vel: f32,
    pub mass: f32,
    pub inertia: f32,
    pub allows_rotation: bool,
    pub collision_enabled: bool,
    /// Flap animation playing on the actor's node
    pub actions_running: bool,
}

impl Body {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            angular_vel: 0.0,
            mass: 1.0,
            inertia: 1.0,
            allows_rotation: true,
            collision_enabled: true,
            actions_running: true,
        }
    }

    /// Semi-implicit Euler step
    pub fn integrate(&mut self, gravity: Vec2, dt: f32) {
        self.vel += gravity * dt;
        self.pos += self.vel * dt;
        if self.allows_rotation {
            self.rotation += self.angular_vel * dt;
        }
    }
}

impl ActorBody for Body {
    fn velocity(&self) -> Vec2 {
        self.vel
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.vel = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        self.vel += impulse / self.mass;
    }

    fn apply_angular_impulse(&mut self, impulse: f32) {
        if self.allows_rotation {
            self.angular_vel += impulse / self.inertia;
        }
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    fn angular_velocity(&self) -> f32 {
        self.angular_vel
    }

    fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.angular_vel = angular_velocity;
    }

    fn set_allows_rotation(&mut self, allowed: bool) {
        self.allows_rotation = allowed;
    }

    fn set_collision_enabled(&mut self, enabled: bool) {
        self.collision_enabled = enabled;
    }

    fn cancel_actions(&mut self) {
        self.actions_running = false;
    }
}

/// Game instance holding the simulation and its stand-in engine
pub struct Headless {
    pub state: GameState,
    pub body: Body,
    transform: LayerOffset,
    accumulator: f64,
    /// Obstacles whose goal has already fired
    scored: Vec<u32>,
}

impl Headless {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::new(tuning, seed),
            body: Body::new(ACTOR_START),
            transform: LayerOffset,
            accumulator: 0.0,
            scored: Vec::new(),
        }
    }

    pub fn tap(&mut self) {
        on_tap(&mut self.state, &mut self.body);
    }

    /// Restart button handler
    pub fn restart(&mut self) {
        self.state.restart();
        self.body = Body::new(ACTOR_START);
        self.accumulator = 0.0;
        self.scored.clear();
    }

    /// Run however many fixed ticks fit in `frame_dt` and hand back the
    /// side effects they produced
    pub fn update(&mut self, frame_dt: f64) -> Vec<GameEvent> {
        let fixed = self.state.tuning.fixed_delta;
        self.accumulator += frame_dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= fixed && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &mut self.body, &self.transform, frame_dt);
            self.body.integrate(Vec2::new(0.0, GRAVITY), fixed as f32);
            self.resolve_contacts();
            self.accumulator -= fixed;
            substeps += 1;
        }

        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::Despawned { id, .. } = event {
                self.scored.retain(|s| s != id);
            }
        }
        events
    }

    /// Detect overlaps between the actor and the world, feeding each to the
    /// contact handler in discovery order
    fn resolve_contacts(&mut self) {
        if !self.body.collision_enabled {
            return;
        }
        let hero = Participant::new(Some(HERO_TAG), HERO_CATEGORY, None);
        let mut contacts = Vec::new();

        let pos = self.body.pos.as_dvec2();
        let ceiling = self.state.tuning.viewport_height;
        if pos.y - ACTOR_RADIUS <= GROUND_TOP || pos.y + ACTOR_RADIUS >= ceiling {
            contacts.push(Participant::solid(GROUND_CATEGORY));
        }

        let gap = self.state.tuning.obstacle_gap;
        for node in &self.state.obstacles.nodes {
            let world = self.transform.to_world(&self.state.obstacles, node.pos);
            if (pos.x - world.x).abs() > node.width / 2.0 + ACTOR_RADIUS {
                continue;
            }
            let in_gap = (pos.y - world.y).abs() + ACTOR_RADIUS <= gap / 2.0;
            if !in_gap {
                contacts.push(Participant::solid(OBSTACLE_CATEGORY));
            } else if world.x <= pos.x && !self.scored.contains(&node.id) {
                self.scored.push(node.id);
                contacts.push(Participant::goal());
            }
        }

        for node in &self.state.items.nodes {
            let world = self.transform.to_world(&self.state.items, node.pos);
            if world.distance(pos) <= node.width / 2.0 + ACTOR_RADIUS {
                contacts.push(Participant::item(node.id));
            }
        }

        for other in contacts {
            on_contact(&mut self.state, &mut self.body, &hero, &other);
        }
    }

    /// Simple autopilot: hop whenever the actor sinks below the next gap
    pub fn autopilot_wants_tap(&self) -> bool {
        let pos = self.body.pos.as_dvec2();
        let target = self
            .state
            .obstacles
            .nodes
            .iter()
            .map(|n| self.transform.to_world(&self.state.obstacles, n.pos))
            .filter(|w| w.x + self.state.tuning.obstacles.width / 2.0 >= pos.x - ACTOR_RADIUS)
            .min_by(|a, b| a.x.total_cmp(&b.x))
            .map(|w| w.y)
            .unwrap_or(self.state.tuning.viewport_height / 2.0);
        pos.y < target - 20.0 && self.body.vel.y <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_impulse_scales_with_mass() {
        let mut body = Body::new(Vec2::ZERO);
        body.mass = 2.0;
        body.apply_impulse(Vec2::new(0.0, 250.0));
        assert_eq!(body.vel, Vec2::new(0.0, 125.0));
    }

    #[test]
    fn test_body_ignores_angular_impulse_when_locked() {
        let mut body = Body::new(Vec2::ZERO);
        body.set_allows_rotation(false);
        body.apply_angular_impulse(5.0);
        assert_eq!(body.angular_vel, 0.0);
    }

    #[test]
    fn test_integrate_falls() {
        let mut body = Body::new(Vec2::new(0.0, 100.0));
        body.integrate(Vec2::new(0.0, GRAVITY), 0.1);
        assert!(body.vel.y < 0.0);
        assert!(body.pos.y < 100.0);
    }

    #[test]
    fn test_accumulator_caps_substeps() {
        let mut game = Headless::new(Tuning::default(), 1);
        game.update(10.0);
        // Frame delta is clamped to 0.1s, so at most six 60 Hz ticks
        assert!(game.state.time_ticks <= 6);
        assert!(game.state.time_ticks >= 5);
    }
}
