//! Game state and core simulation types
//!
//! Everything the controller mutates lives in [`GameState`]. The actor's
//! rigid body is the only piece owned elsewhere (see [`super::scene`]).

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::{SpawnRule, TileRule, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Scrolling, spawning and accepting taps
    Active,
    /// Run ended. Terminal until the scene is rebuilt.
    GameOver,
}

/// Identifies one of the scrolling layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    Ground,
    Clouds,
    Obstacles,
    Items,
}

/// A visual node inside a layer, positioned in layer-local space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: u32,
    pub pos: DVec2,
    pub width: f64,
}

/// A horizontally scrolling container of nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub kind: LayerKind,
    /// Layer origin in world space
    pub pos: DVec2,
    /// Children in insertion order
    pub nodes: Vec<Node>,
}

impl Layer {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            pos: DVec2::ZERO,
            nodes: Vec::new(),
        }
    }

    /// Look up a child by id
    pub fn node(&self, id: u32) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Detach a child. Returns false if it was not attached.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        self.nodes.len() != before
    }
}

/// Layers that grow by spawning instead of recycling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnKind {
    Obstacle,
    Item,
}

impl SpawnKind {
    pub fn layer(self) -> LayerKind {
        match self {
            SpawnKind::Obstacle => LayerKind::Obstacles,
            SpawnKind::Item => LayerKind::Items,
        }
    }
}

/// Accumulator paired with the threshold that triggers a spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub elapsed: f64,
    pub threshold: f64,
}

impl SpawnTimer {
    pub fn new(threshold: f64) -> Self {
        Self {
            elapsed: 0.0,
            threshold,
        }
    }

    pub fn is_due(&self) -> bool {
        self.elapsed >= self.threshold
    }
}

/// Visibility/enabled state of the restart control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonState {
    Hidden,
    Active,
}

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player tapped
    Flap,
    /// Goal passed or item collected
    Goal,
}

/// Side effects requested of the host, in the order they happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Instantiate a template copy into `layer` at a layer-local position
    Spawned { layer: LayerKind, id: u32, pos: DVec2 },
    /// Detach an instance from its layer
    Despawned { layer: LayerKind, id: u32 },
    /// Score label should show this value
    ScoreChanged(u32),
    Sound(SoundEffect),
    RestartButton(ButtonState),
    /// Run the shake effect on every top-level scene node
    ShakeScene,
    GameOver { points: u32 },
}

/// Complete simulation state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance parameters this run was built with
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Number of restarts since construction
    pub runs: u32,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Score
    pub points: u32,
    /// Ground/obstacle scroll speed (pixels/s), grows every tick
    pub scroll_speed: f64,
    /// Seconds since the last tap
    pub time_since_input: f64,
    pub obstacle_timer: SpawnTimer,
    pub item_timer: SpawnTimer,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ground: Layer,
    pub clouds: Layer,
    pub obstacles: Layer,
    pub items: Layer,
    pub restart_button: ButtonState,
    /// Pending side effects for the host
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run with the given balance and seed
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut state = Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            runs: 0,
            phase: GamePhase::Active,
            points: 0,
            scroll_speed: tuning.start_scroll_speed,
            time_since_input: 0.0,
            obstacle_timer: SpawnTimer::new(tuning.obstacles.threshold),
            item_timer: SpawnTimer::new(tuning.items.threshold),
            time_ticks: 0,
            ground: Layer::new(LayerKind::Ground),
            clouds: Layer::new(LayerKind::Clouds),
            obstacles: Layer::new(LayerKind::Obstacles),
            items: Layer::new(LayerKind::Items),
            restart_button: ButtonState::Hidden,
            events: Vec::new(),
            next_id: 1,
            tuning,
        };
        state.lay_tiles();
        state.events.push(GameEvent::RestartButton(ButtonState::Hidden));
        state.events.push(GameEvent::ScoreChanged(0));
        state
    }

    /// Rebuild the scene for a fresh run (restart button handler)
    pub fn restart(&mut self) {
        let runs = self.runs + 1;
        let seed = self.seed;
        *self = Self::new(self.tuning.clone(), seed.wrapping_add(runs as u64));
        self.seed = seed;
        self.runs = runs;
        log::info!("Run {} started", runs + 1);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    /// Text for the score label
    pub fn score_text(&self) -> String {
        self.points.to_string()
    }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        match kind {
            LayerKind::Ground => &self.ground,
            LayerKind::Clouds => &self.clouds,
            LayerKind::Obstacles => &self.obstacles,
            LayerKind::Items => &self.items,
        }
    }

    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut Layer {
        match kind {
            LayerKind::Ground => &mut self.ground,
            LayerKind::Clouds => &mut self.clouds,
            LayerKind::Obstacles => &mut self.obstacles,
            LayerKind::Items => &mut self.items,
        }
    }

    pub fn spawn_rule(&self, kind: SpawnKind) -> SpawnRule {
        match kind {
            SpawnKind::Obstacle => self.tuning.obstacles,
            SpawnKind::Item => self.tuning.items,
        }
    }

    pub fn spawn_timer_mut(&mut self, kind: SpawnKind) -> &mut SpawnTimer {
        match kind {
            SpawnKind::Obstacle => &mut self.obstacle_timer,
            SpawnKind::Item => &mut self.item_timer,
        }
    }

    /// Hand pending side effects to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Fill the ground and cloud layers with their fixed tile pools
    fn lay_tiles(&mut self) {
        let ground = self.tuning.ground;
        let clouds = self.tuning.clouds;
        self.fill_layer(LayerKind::Ground, ground);
        self.fill_layer(LayerKind::Clouds, clouds);
    }

    fn fill_layer(&mut self, kind: LayerKind, rule: TileRule) {
        for i in 0..rule.count {
            let id = self.next_entity_id();
            // Tiles sit edge to edge starting at the left of the scene
            let x = rule.width / 2.0 + i as f64 * rule.width;
            self.layer_mut(kind).nodes.push(Node {
                id,
                pos: DVec2::new(x, rule.y),
                width: rule.width,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_active_with_tile_pools() {
        let state = GameState::new(Tuning::default(), 7);
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.points, 0);
        assert_eq!(state.scroll_speed, 160.0);
        assert_eq!(state.obstacle_timer.threshold, 1.5);
        assert_eq!(state.item_timer.threshold, 2.0);
        assert_eq!(state.ground.nodes.len(), state.tuning.ground.count);
        assert_eq!(state.clouds.nodes.len(), state.tuning.clouds.count);
        assert!(state.obstacles.nodes.is_empty());
        assert!(state.items.nodes.is_empty());
        assert_eq!(state.restart_button, ButtonState::Hidden);
        assert_eq!(state.score_text(), "0");
    }

    #[test]
    fn test_tiles_are_laid_edge_to_edge() {
        let state = GameState::new(Tuning::default(), 7);
        let w = state.tuning.ground.width;
        let xs: Vec<f64> = state.ground.nodes.iter().map(|n| n.pos.x).collect();
        assert_eq!(xs, vec![w / 2.0, w * 1.5]);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(Tuning::default(), 7);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
        assert!(state.ground.nodes.iter().all(|n| n.id != a && n.id != b));
    }

    #[test]
    fn test_layer_remove() {
        let mut layer = Layer::new(LayerKind::Items);
        layer.nodes.push(Node {
            id: 3,
            pos: DVec2::ZERO,
            width: 10.0,
        });
        assert!(layer.remove(3));
        assert!(!layer.remove(3));
        assert!(layer.node(3).is_none());
    }

    #[test]
    fn test_restart_resets_run_but_keeps_seed() {
        let mut state = GameState::new(Tuning::default(), 42);
        state.points = 9;
        state.phase = GamePhase::GameOver;
        state.restart_button = ButtonState::Active;
        state.restart();
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.points, 0);
        assert_eq!(state.restart_button, ButtonState::Hidden);
        assert_eq!(state.seed, 42);
        assert_eq!(state.runs, 1);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(Tuning::default(), 1);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::ScoreChanged(0)));
        assert!(state.events.is_empty());
    }
}
