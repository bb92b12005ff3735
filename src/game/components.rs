//! Gameplay components
//!
//! Plain data attached to actors and level objects. Behavior lives in the
//! systems that read them (actor, hostile, orchestrator).

use crate::rasterizer::{Rect, Vec2};
use super::component::ComponentStorage;
use super::entity::Entity;

// =============================================================================
// Actor Components
// =============================================================================

/// Health pool for the player under the health-pool contact rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: u32,
    pub max: u32,
    /// Ticks of invulnerability remaining after a hit
    pub invulnerable_ticks: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max, invulnerable_ticks: 0 }
    }

    /// Take one unit. Returns true when this hit empties the pool.
    /// Ignored while invulnerable.
    pub fn damage(&mut self) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.current = self.current.saturating_sub(1);
        self.current == 0
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    pub fn set_invulnerable(&mut self, ticks: u32) {
        self.invulnerable_ticks = ticks;
    }

    pub fn tick_invulnerability(&mut self) {
        self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Sprites face right; left-facing actors draw mirrored
    pub fn mirrored(self) -> bool {
        self == Facing::Left
    }
}

/// How an actor is currently moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocomotionMode {
    /// Standing on an obstacle top; the only mode that may jump
    Grounded,
    Airborne,
    Patrolling,
    Pursuing,
}

// =============================================================================
// Level Objects
// =============================================================================

/// The level exit. Closed until the camera reveal fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Portal {
    pub rect: Rect,
    pub open: bool,
    /// Focus zoom has been requested and the reveal is pending
    pub armed: bool,
}

impl Portal {
    pub fn closed(rect: Rect) -> Self {
        Self { rect, open: false, armed: false }
    }
}

/// Collectibles for one level attempt.
///
/// Each box is stored under a generational handle; collecting removes it,
/// and a removed handle never resolves again. A box is therefore counted at
/// most once, however many overlap checks see it.
pub struct CollectibleSet {
    boxes: ComponentStorage<Rect>,
    total: usize,
}

impl CollectibleSet {
    pub fn new(rects: Vec<Rect>) -> Self {
        let total = rects.len();
        let mut boxes = ComponentStorage::new();
        for rect in rects {
            boxes.spawn(rect);
        }
        Self { boxes, total }
    }

    /// Try to collect one box. Some only on the first call for a live box.
    pub fn collect(&mut self, entity: Entity) -> Option<Rect> {
        self.boxes.despawn(entity)
    }

    /// Collect every box overlapping `bbox`; returns the collected centers
    pub fn collect_overlapping(&mut self, bbox: &Rect) -> Vec<Vec2> {
        let hits: Vec<Entity> = self.live()
            .filter(|(_, r)| r.overlaps(bbox))
            .map(|(e, _)| e)
            .collect();
        hits.into_iter()
            .filter_map(|e| self.collect(e))
            .map(|r| r.center())
            .collect()
    }

    /// Boxes not yet collected
    pub fn live(&self) -> impl Iterator<Item = (Entity, &Rect)> {
        self.boxes.iter()
    }

    pub fn remaining(&self) -> u32 {
        self.boxes.len() as u32
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_invulnerability() {
        let mut hp = Health::new(3);
        assert!(!hp.damage());
        assert_eq!(hp.current, 2);
        hp.set_invulnerable(2);
        assert!(!hp.damage());
        assert_eq!(hp.current, 2);
        hp.tick_invulnerability();
        hp.tick_invulnerability();
        assert!(!hp.damage());
        assert!(hp.damage());
        assert!(hp.is_depleted());
    }

    #[test]
    fn test_facing_mirrors_left() {
        assert!(Facing::Left.mirrored());
        assert!(!Facing::Right.mirrored());
    }

    #[test]
    fn test_collect_exactly_once() {
        let mut set = CollectibleSet::new(vec![Rect::new(0.0, 0.0, 10.0, 10.0)]);
        let player = Rect::new(5.0, 5.0, 10.0, 10.0);
        let (handle, _) = set.live().next().unwrap();

        // Two checks in the same tick see the same overlap
        assert_eq!(set.collect_overlapping(&player).len(), 1);
        assert!(set.collect_overlapping(&player).is_empty());
        assert!(set.collect(handle).is_none());
        assert_eq!(set.remaining(), 0);
        assert_eq!(set.total(), 1);
    }

    #[test]
    fn test_collect_only_overlapping() {
        let mut set = CollectibleSet::new(vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(100.0, 0.0, 10.0, 10.0),
        ]);
        let got = set.collect_overlapping(&Rect::new(95.0, 0.0, 10.0, 10.0));
        assert_eq!(got, vec![Vec2::new(105.0, 5.0)]);
        assert_eq!(set.remaining(), 1);
        assert_eq!(set.live().count(), 1);
    }
}
