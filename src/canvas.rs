//! Render boundary between the simulation and whatever draws it.
//!
//! The manager only ever pushes updates through [`Canvas`]; it never reads
//! anything back.  [`Scene`] is a retained-mode implementation that keeps
//! every sprite in memory so a host can draw it later (the terminal front
//! end does exactly that) and tests can inspect it.

use std::collections::BTreeMap;

use crate::entities::EnemyTier;

/// Opaque handle to one sprite on a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpriteId(pub u64);

/// Which visual a sprite stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    PlayerShip,
    EnemyShip(EnemyTier),
    Bullet,
    Life,
    ScoreBlock,
    GameOverBlock,
}

pub trait Canvas {
    /// Adds a new sprite and returns its handle.
    fn add(&mut self, kind: SpriteKind) -> SpriteId;

    /// Removes a sprite.  Unknown handles are ignored.
    fn remove(&mut self, id: SpriteId);

    /// Removes every sprite.
    fn clear(&mut self);

    fn render_at(&mut self, id: SpriteId, x: f64, y: f64);

    /// Switches an animated sprite to its other frame.
    fn toggle_frame(&mut self, id: SpriteId);

    fn set_text(&mut self, id: SpriteId, text: &str);
}

/// A sprite as last pushed by the manager.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteNode {
    pub kind: SpriteKind,
    pub x: f64,
    pub y: f64,
    /// `false` = original frame, `true` = animated frame.
    pub alternate_frame: bool,
    pub text: Option<String>,
}

/// In-memory canvas.  Sprites iterate in the order they were added.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    nodes: BTreeMap<SpriteId, SpriteNode>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: SpriteId) -> Option<&SpriteNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: SpriteId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpriteId, &SpriteNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of sprites of the given kind currently on the canvas.
    pub fn count(&self, kind: SpriteKind) -> usize {
        self.nodes.values().filter(|n| n.kind == kind).count()
    }

    /// All text labels currently shown, in insertion order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.nodes.values().filter_map(|n| n.text.as_deref())
    }
}

impl Canvas for Scene {
    fn add(&mut self, kind: SpriteKind) -> SpriteId {
        let id = SpriteId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            SpriteNode {
                kind,
                x: 0.0,
                y: 0.0,
                alternate_frame: false,
                text: None,
            },
        );
        id
    }

    fn remove(&mut self, id: SpriteId) {
        self.nodes.remove(&id);
    }

    fn clear(&mut self) {
        // Ids keep counting up so stale handles never alias new sprites.
        self.nodes.clear();
    }

    fn render_at(&mut self, id: SpriteId, x: f64, y: f64) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.x = x;
            node.y = y;
        }
    }

    fn toggle_frame(&mut self, id: SpriteId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.alternate_frame = !node.alternate_frame;
        }
    }

    fn set_text(&mut self, id: SpriteId, text: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.text = Some(text.to_string());
        }
    }
}
