//! Portal and collectible placement
//!
//! Both run once per level construction. Collectible sampling uses an RNG
//! seeded from the level id, so rebuilding a level from its definition
//! reproduces the same layout.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::config::RuleSettings;
use crate::rasterizer::{Rect, Vec2};
use super::geometry::TileWorld;

/// Headroom above a portal platform, in portal heights
const PORTAL_CLEARANCE: f32 = 2.0;

/// Portal width plus this margin must fit on the platform
const PORTAL_EDGE_MARGIN: f32 = 16.0;

/// Gap between a collectible and the platform beneath it
const COLLECTIBLE_LIFT: f32 = 10.0;

/// Seed derivation for a level's placement RNG
pub fn level_seed(level_id: u32) -> u64 {
    0x7113_5eed_0000_0000 ^ (level_id as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

/// Portal rectangle standing with its bottom-center on `anchor`
pub fn portal_rect_at(anchor: Vec2, rules: &RuleSettings) -> Rect {
    Rect::new(
        anchor.x - rules.portal_width * 0.5,
        anchor.y - rules.portal_height,
        rules.portal_width,
        rules.portal_height,
    )
}

/// Is anything solid directly above `platform` within `clearance` pixels?
fn obstructed_above(world: &TileWorld, platform: &Rect, clearance: f32) -> bool {
    let zone = Rect::new(platform.x, platform.y - clearance, platform.w, clearance);
    world.obstacles.iter()
        .filter(|o| *o != platform)
        .any(|o| o.overlaps(&zone))
}

/// Choose the portal anchor (bottom-center, world pixels).
///
/// Prefers a platform in the top third of the level that is wide enough and
/// has clear headroom; otherwise the widest platform in the top half;
/// otherwise the widest platform anywhere. Returns None only for a world
/// with no obstacles at all.
pub fn place_portal(world: &TileWorld, rules: &RuleSettings) -> Option<Vec2> {
    let platforms = world.platforms_by_height();
    let top_third = world.bounds.y + world.bounds.h / 3.0;
    let top_half = world.bounds.y + world.bounds.h / 2.0;
    let min_width = rules.portal_width + PORTAL_EDGE_MARGIN;
    let clearance = rules.portal_height * PORTAL_CLEARANCE;

    let preferred = platforms.iter()
        .filter(|p| p.y < top_third)
        .find(|p| p.w >= min_width && !obstructed_above(world, p, clearance));

    let widest = |limit: f32| {
        platforms.iter()
            .filter(|p| p.y < limit)
            .fold(None, |best: Option<&Rect>, p| match best {
                Some(b) if b.w >= p.w => Some(b),
                _ => Some(p),
            })
    };

    preferred
        .or_else(|| widest(top_half))
        .or_else(|| widest(f32::INFINITY))
        .map(|p| Vec2::new(p.center().x, p.y))
}

/// Place `count` collectible boxes on raised platforms away from hazards.
///
/// Each collectible gets up to `rules.placement_attempts` constrained
/// samples; after that it is placed on any platform regardless of hazards so
/// the quota can always be met.
pub fn place_collectibles(world: &TileWorld, count: u32, seed: u64, rules: &RuleSettings) -> Vec<Rect> {
    let mut rng = StdRng::seed_from_u64(seed);
    let size = rules.collectible_size;
    let ground_line = world.bounds.bottom() - rules.ground_threshold_tiles * world.tile_size;

    let raised: Vec<Rect> = world.obstacles.iter()
        .filter(|o| o.y < ground_line && o.w >= size)
        .copied()
        .collect();
    let any_platform: Vec<Rect> = world.obstacles.iter()
        .filter(|o| o.w >= size)
        .copied()
        .collect();

    let sample = |rng: &mut StdRng, from: &[Rect]| -> Option<Rect> {
        if from.is_empty() {
            return None;
        }
        let p = from[rng.gen_range(0..from.len())];
        let x = if p.w > size { rng.gen_range(p.x..p.right() - size) } else { p.x };
        Some(Rect::new(x, p.y - size - COLLECTIBLE_LIFT, size, size))
    };

    let safe = |r: &Rect| {
        world.hazards.iter().all(|h| h.distance_to(r.center()) >= rules.hazard_safety_radius)
            && !world.obstacles.iter().any(|o| o.overlaps(r))
    };

    let mut placed = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let constrained = (0..rules.placement_attempts)
            .filter_map(|_| sample(&mut rng, &raised))
            .find(|r| safe(r));

        let rect = constrained
            .or_else(|| sample(&mut rng, &any_platform))
            .unwrap_or_else(|| {
                // No platforms at all: float them in the middle of the level
                let c = world.bounds.center();
                Rect::new(c.x - size * 0.5, c.y - size * 0.5, size, size)
            });
        placed.push(rect);
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleSettings {
        RuleSettings::default()
    }

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 1200.0, 600.0)
    }

    #[test]
    fn test_portal_prefers_clear_top_third() {
        let low = Rect::new(0.0, 560.0, 1200.0, 40.0);
        let high_narrow = Rect::new(100.0, 100.0, 30.0, 16.0);
        let high_blocked = Rect::new(300.0, 150.0, 200.0, 16.0);
        let blocker = Rect::new(320.0, 90.0, 40.0, 16.0);
        let high_clear = Rect::new(700.0, 180.0, 160.0, 16.0);
        let world = TileWorld::new(vec![low, high_narrow, high_blocked, blocker, high_clear], vec![], bounds(), 32.0);
        let anchor = place_portal(&world, &rules()).unwrap();
        assert_eq!(anchor, Vec2::new(780.0, 180.0));
    }

    #[test]
    fn test_portal_falls_back_to_widest_in_top_half() {
        let low = Rect::new(0.0, 560.0, 1200.0, 40.0);
        let mid_a = Rect::new(100.0, 250.0, 80.0, 16.0);
        let mid_b = Rect::new(400.0, 280.0, 240.0, 16.0);
        let world = TileWorld::new(vec![low, mid_a, mid_b], vec![], bounds(), 32.0);
        let anchor = place_portal(&world, &rules()).unwrap();
        assert_eq!(anchor, Vec2::new(520.0, 280.0));
    }

    #[test]
    fn test_portal_none_without_platforms() {
        let world = TileWorld::new(vec![], vec![], bounds(), 32.0);
        assert!(place_portal(&world, &rules()).is_none());
    }

    #[test]
    fn test_collectibles_avoid_hazards_and_ground() {
        let ground = Rect::new(0.0, 560.0, 1200.0, 40.0);
        let safe_ledge = Rect::new(800.0, 300.0, 200.0, 16.0);
        let spiky_ledge = Rect::new(100.0, 300.0, 200.0, 16.0);
        let spikes = Rect::new(100.0, 260.0, 200.0, 40.0);
        let world = TileWorld::new(vec![ground, safe_ledge, spiky_ledge], vec![spikes], bounds(), 32.0);
        let placed = place_collectibles(&world, 5, level_seed(1), &rules());
        assert_eq!(placed.len(), 5);
        for c in &placed {
            assert!(c.x >= safe_ledge.x && c.right() <= safe_ledge.right());
            assert!(c.bottom() < safe_ledge.y);
        }
    }

    #[test]
    fn test_collectibles_fallback_when_everything_is_hazardous() {
        let ledge = Rect::new(100.0, 300.0, 200.0, 16.0);
        let spikes = Rect::new(0.0, 0.0, 1200.0, 600.0);
        let world = TileWorld::new(vec![ledge], vec![spikes], bounds(), 32.0);
        let placed = place_collectibles(&world, 3, 9, &rules());
        assert_eq!(placed.len(), 3);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let ground = Rect::new(0.0, 560.0, 1200.0, 40.0);
        let ledge = Rect::new(200.0, 300.0, 600.0, 16.0);
        let world = TileWorld::new(vec![ground, ledge], vec![], bounds(), 32.0);
        let a = place_collectibles(&world, 4, level_seed(3), &rules());
        let b = place_collectibles(&world, 4, level_seed(3), &rules());
        assert_eq!(a, b);
    }
}
