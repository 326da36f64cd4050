//! Seams to the engine the simulation runs inside
//!
//! The physics engine owns the actor's body and the scene graph owns the
//! layer transforms. The controller only talks to them through these traits.

use glam::{DVec2, Vec2};

use super::state::Layer;

/// The actor's rigid body, as exposed by the physics engine
pub trait ActorBody {
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    /// Additive linear impulse
    fn apply_impulse(&mut self, impulse: Vec2);
    /// Additive angular impulse
    fn apply_angular_impulse(&mut self, impulse: f32);

    /// Rotation in radians
    fn rotation(&self) -> f32;
    fn set_rotation(&mut self, rotation: f32);
    fn angular_velocity(&self) -> f32;
    fn set_angular_velocity(&mut self, angular_velocity: f32);

    fn set_allows_rotation(&mut self, allowed: bool);
    /// Whether the body still bounces off other bodies
    fn set_collision_enabled(&mut self, enabled: bool);
    /// Stop any running animations on the actor's node
    fn cancel_actions(&mut self);
}

/// Parent-relative <-> world-space conversion for layer children
pub trait SceneTransform {
    fn to_world(&self, layer: &Layer, local: DVec2) -> DVec2;
    fn to_layer(&self, layer: &Layer, world: DVec2) -> DVec2;
}

/// Layers are pure translations of the scene (no scale, no rotation)
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerOffset;

impl SceneTransform for LayerOffset {
    #[inline]
    fn to_world(&self, layer: &Layer, local: DVec2) -> DVec2 {
        layer.pos + local
    }

    #[inline]
    fn to_layer(&self, layer: &Layer, world: DVec2) -> DVec2 {
        world - layer.pos
    }
}
