//! Contact participant classification
//!
//! The physics engine reports each side of a contact with a node name and a
//! category bitmask. Both are folded into one [`EntityKind`] up front so the
//! contact handler only ever matches on the enum.

use crate::consts::ITEM_CATEGORY;

use super::state::LayerKind;

/// Node name of the scoring gate inside an obstacle
pub const GOAL_TAG: &str = "goal";

/// What a contact participant means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Non-physical scoring gate
    Goal,
    /// Collectible bonus item
    Item,
    /// Anything else (obstacle, ground, ceiling, the actor itself)
    Other,
}

/// Owning node of a physics body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRef {
    pub layer: LayerKind,
    pub id: u32,
}

/// One side of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant<'a> {
    pub tag: Option<&'a str>,
    pub category: u32,
    pub node: Option<NodeRef>,
}

impl<'a> Participant<'a> {
    pub fn new(tag: Option<&'a str>, category: u32, node: Option<NodeRef>) -> Self {
        Self {
            tag,
            category,
            node,
        }
    }

    /// A scoring gate
    pub fn goal() -> Self {
        Self::new(Some(GOAL_TAG), 0, None)
    }

    /// A bonus item instance living in the items layer
    pub fn item(id: u32) -> Self {
        Self::new(
            None,
            ITEM_CATEGORY,
            Some(NodeRef {
                layer: LayerKind::Items,
                id,
            }),
        )
    }

    /// Untagged solid geometry
    pub fn solid(category: u32) -> Self {
        Self::new(None, category, None)
    }

    pub fn kind(&self) -> EntityKind {
        if self.tag == Some(GOAL_TAG) {
            EntityKind::Goal
        } else if self.category == ITEM_CATEGORY {
            EntityKind::Item
        } else {
            EntityKind::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_tag_wins_over_category() {
        let p = Participant::new(Some("goal"), ITEM_CATEGORY, None);
        assert_eq!(p.kind(), EntityKind::Goal);
    }

    #[test]
    fn test_item_category() {
        assert_eq!(Participant::item(5).kind(), EntityKind::Item);
    }

    #[test]
    fn test_everything_else_is_other() {
        assert_eq!(Participant::solid(1).kind(), EntityKind::Other);
        assert_eq!(Participant::new(Some("hero"), 2, None).kind(), EntityKind::Other);
        // Item bit combined with other bits is not an item
        assert_eq!(Participant::solid(ITEM_CATEGORY | 1).kind(), EntityKind::Other);
    }
}
