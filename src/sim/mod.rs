//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (layer insertion order)
//! - No rendering, audio or platform dependencies; side effects are queued
//!   as [`GameEvent`]s

pub mod contact;
pub mod scene;
pub mod state;
pub mod tick;

pub use contact::{EntityKind, GOAL_TAG, NodeRef, Participant};
pub use scene::{ActorBody, LayerOffset, SceneTransform};
pub use state::{
    ButtonState, GameEvent, GamePhase, GameState, Layer, LayerKind, Node, SoundEffect, SpawnKind,
    SpawnTimer,
};
pub use tick::{
    on_contact, on_tap, scroll_clouds, scroll_ground, tick, update_items, update_obstacles,
};
