//! Tile world geometry and collision resolution
//!
//! A level is a set of solid obstacle rectangles and hazard rectangles, both
//! authored in tile units and scaled to world pixels at construction. The
//! world is immutable for the lifetime of a level attempt.
//!
//! Resolution order is fixed:
//! 1. Hazard test at the fully proposed position (short-circuits)
//! 2. Horizontal test against each obstacle in isolation (hard stop)
//! 3. Vertical test against the horizontally resolved box (clamp to edge)
//!
//! Resolving horizontal before vertical keeps actors from catching on
//! corners and lets them stand on ledges without jitter.

use crate::rasterizer::Rect;
use super::level::{LevelDef, TileRect};

/// Float slack when deciding whether an obstacle lies in the direction of travel
const EDGE_EPSILON: f32 = 0.001;

/// Accepted displacement after collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Displacement {
    pub dx: f32,
    pub dy: f32,
    /// Feet came to rest on an obstacle top
    pub grounded: bool,
    /// Head met an obstacle bottom
    pub hit_ceiling: bool,
    /// Horizontal movement was stopped
    pub hit_wall: bool,
}

impl Displacement {
    /// Vertical velocity must be zeroed after a clamp in either direction
    pub fn vertical_blocked(&self) -> bool {
        self.grounded || self.hit_ceiling
    }
}

/// Outcome of a collision query
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Moved(Displacement),
    /// Proposed box overlaps a hazard. The caller must not move the actor.
    Hazard,
}

impl Resolution {
    pub fn is_hazard(&self) -> bool {
        matches!(self, Resolution::Hazard)
    }
}

/// Static per-level collision geometry, in world pixels
#[derive(Debug, Clone)]
pub struct TileWorld {
    pub obstacles: Vec<Rect>,
    pub hazards: Vec<Rect>,
    /// Level extent; left/right edges act as walls, bottom edge is the kill line
    pub bounds: Rect,
    pub tile_size: f32,
}

impl TileWorld {
    pub fn new(obstacles: Vec<Rect>, hazards: Vec<Rect>, bounds: Rect, tile_size: f32) -> Self {
        Self { obstacles, hazards, bounds, tile_size }
    }

    /// Build from a level definition, scaling tile units to pixels
    pub fn from_level(def: &LevelDef, tile_size: f32) -> Self {
        let scale = |r: &TileRect| r.to_world(tile_size);
        Self {
            obstacles: def.obstacles.iter().map(scale).collect(),
            hazards: def.hazards.iter().map(scale).collect(),
            bounds: Rect::new(0.0, 0.0, def.width * tile_size, def.height * tile_size),
            tile_size,
        }
    }

    /// Does a box overlap any hazard?
    pub fn touches_hazard(&self, bbox: &Rect) -> bool {
        self.hazards.iter().any(|h| h.overlaps(bbox))
    }

    /// Has the box dropped entirely below the level?
    pub fn is_below_bounds(&self, bbox: &Rect) -> bool {
        bbox.y > self.bounds.bottom()
    }

    /// Resolve a proposed displacement for an actor box.
    ///
    /// `vy` is the actor's vertical velocity and decides which face of an
    /// obstacle the box is clamped against. Never fails: an empty world
    /// returns the displacement unchanged.
    pub fn resolve(&self, bbox: Rect, vy: f32, dx: f32, dy: f32) -> Resolution {
        if self.touches_hazard(&bbox.offset(dx, dy)) {
            return Resolution::Hazard;
        }

        let mut out = Displacement { dx, dy, grounded: false, hit_ceiling: false, hit_wall: false };

        // Horizontal: each obstacle tested alone, any overlap stops movement
        if dx != 0.0 {
            let moved = bbox.offset(dx, 0.0);
            let leaves_level = moved.x < self.bounds.x || moved.right() > self.bounds.right();
            if leaves_level || self.obstacles.iter().any(|o| o.overlaps(&moved)) {
                out.dx = 0.0;
                out.hit_wall = true;
            }
        }

        // Vertical: only obstacles that horizontally overlap the resolved box
        // and lie ahead in the direction of travel. Touching counts, so a box
        // resting exactly on a top stays grounded.
        let column = bbox.offset(out.dx, 0.0);
        let in_column = |o: &&Rect| o.x < column.right() && o.right() > column.x;

        if vy >= 0.0 {
            let reach = bbox.bottom() + dy.max(0.0);
            let landing = self.obstacles.iter()
                .filter(in_column)
                .filter(|o| o.y >= bbox.bottom() - EDGE_EPSILON && o.y <= reach)
                .map(|o| o.y - bbox.bottom())
                .fold(None, |acc: Option<f32>, gap| Some(acc.map_or(gap, |a| a.min(gap))));
            if let Some(gap) = landing {
                out.dy = gap.max(0.0);
                out.grounded = true;
            }
        } else {
            let reach = bbox.y + dy.min(0.0);
            let bump = self.obstacles.iter()
                .filter(in_column)
                .filter(|o| o.bottom() <= bbox.y + EDGE_EPSILON && o.bottom() >= reach)
                .map(|o| o.bottom() - bbox.y)
                .fold(None, |acc: Option<f32>, gap| Some(acc.map_or(gap, |a| a.max(gap))));
            if let Some(gap) = bump {
                out.dy = gap.min(0.0);
                out.hit_ceiling = true;
            }
        }

        Resolution::Moved(out)
    }

    /// Platforms ordered from highest (smallest y) to lowest
    pub fn platforms_by_height(&self) -> Vec<Rect> {
        let mut platforms = self.obstacles.clone();
        platforms.sort_by(|a, b| a.y.total_cmp(&b.y));
        platforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(obstacles: Vec<Rect>, hazards: Vec<Rect>) -> TileWorld {
        TileWorld::new(obstacles, hazards, Rect::new(0.0, 0.0, 1000.0, 1000.0), 32.0)
    }

    fn moved(res: Resolution) -> Displacement {
        match res {
            Resolution::Moved(d) => d,
            Resolution::Hazard => panic!("unexpected hazard"),
        }
    }

    #[test]
    fn test_empty_world_is_unconstrained() {
        let w = world(vec![], vec![]);
        let d = moved(w.resolve(Rect::new(100.0, 100.0, 10.0, 10.0), 3.0, 5.0, 3.0));
        assert_eq!((d.dx, d.dy), (5.0, 3.0));
        assert!(!d.grounded);
    }

    #[test]
    fn test_falling_converges_onto_obstacle() {
        let w = world(vec![Rect::new(0.0, 200.0, 400.0, 32.0)], vec![]);
        let mut bbox = Rect::new(50.0, 37.0, 20.0, 30.0);
        let mut grounded = false;
        for _ in 0..100 {
            let d = moved(w.resolve(bbox, 7.0, 0.0, 7.0));
            bbox = bbox.offset(d.dx, d.dy);
            grounded = d.grounded;
        }
        assert!(grounded);
        assert!((bbox.bottom() - 200.0).abs() < 0.0001);
    }

    #[test]
    fn test_resting_on_edge_stays_grounded() {
        let w = world(vec![Rect::new(0.0, 200.0, 400.0, 32.0)], vec![]);
        let bbox = Rect::new(50.0, 170.0, 20.0, 30.0);
        let d = moved(w.resolve(bbox, 0.0, 0.0, 0.0));
        assert!(d.grounded);
        assert_eq!(d.dy, 0.0);
        // Walking along the top is not a wall hit
        let d = moved(w.resolve(bbox, 0.6, 4.0, 0.6));
        assert_eq!(d.dx, 4.0);
        assert!(d.grounded);
    }

    #[test]
    fn test_horizontal_hard_stop() {
        let w = world(vec![Rect::new(100.0, 0.0, 32.0, 400.0)], vec![]);
        let bbox = Rect::new(75.0, 100.0, 20.0, 30.0);
        let d = moved(w.resolve(bbox, 0.0, 8.0, 0.0));
        assert_eq!(d.dx, 0.0);
        assert!(d.hit_wall);
    }

    #[test]
    fn test_rising_clamps_to_ceiling() {
        let w = world(vec![Rect::new(0.0, 100.0, 400.0, 20.0)], vec![]);
        let bbox = Rect::new(50.0, 125.0, 20.0, 30.0);
        let d = moved(w.resolve(bbox, -10.0, 0.0, -10.0));
        assert!(d.hit_ceiling);
        assert!((d.dy - -5.0).abs() < 0.0001);
    }

    #[test]
    fn test_wall_beside_does_not_teleport() {
        // Box is flush against a tall wall on its right while falling
        let w = world(vec![Rect::new(70.0, 0.0, 32.0, 400.0)], vec![]);
        let bbox = Rect::new(50.0, 100.0, 20.0, 30.0);
        let d = moved(w.resolve(bbox, 5.0, 0.0, 5.0));
        assert_eq!(d.dy, 5.0);
        assert!(!d.grounded);
    }

    #[test]
    fn test_obstacle_order_is_irrelevant() {
        let a = Rect::new(0.0, 210.0, 400.0, 32.0);
        let b = Rect::new(0.0, 205.0, 400.0, 32.0);
        let bbox = Rect::new(50.0, 165.0, 20.0, 30.0);
        let d1 = moved(world(vec![a, b], vec![]).resolve(bbox, 12.0, 0.0, 12.0));
        let d2 = moved(world(vec![b, a], vec![]).resolve(bbox, 12.0, 0.0, 12.0));
        assert_eq!(d1, d2);
        assert!((d1.dy - 10.0).abs() < 0.0001);
    }

    #[test]
    fn test_hazard_short_circuits_any_direction() {
        let hazard = Rect::new(100.0, 100.0, 20.0, 20.0);
        let w = world(vec![Rect::new(0.0, 130.0, 400.0, 32.0)], vec![hazard]);
        let bbox = Rect::new(90.0, 100.0, 10.0, 10.0);
        assert!(w.resolve(bbox, -3.0, 5.0, -3.0).is_hazard());
        let bbox = Rect::new(125.0, 105.0, 10.0, 10.0);
        assert!(w.resolve(bbox, 3.0, -6.0, 3.0).is_hazard());
        assert!(!w.resolve(bbox, 0.0, 6.0, 0.0).is_hazard());
    }

    #[test]
    fn test_level_edges_block() {
        let w = world(vec![], vec![]);
        let d = moved(w.resolve(Rect::new(2.0, 10.0, 20.0, 30.0), 0.0, -4.0, 0.0));
        assert_eq!(d.dx, 0.0);
    }
}
