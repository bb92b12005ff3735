//! Hostile actors
//!
//! Patrollers walk back and forth along one axis between two tile bounds.
//! Pursuers home in on the player through walls, slowing as they close in,
//! with a small vertical bob. Neither kind collides with the tile world.
//!
//! Pursuers get slower and shorter-sighted on later levels, down to a floor.

use crate::asset::SpriteId;
use crate::config::HostileSettings;
use crate::rasterizer::{Rect, Vec2};
use crate::world::{Axis, HostileDef, HostileKind};
use super::actor::KinematicActor;
use super::components::{Facing, LocomotionMode};

#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    Patrol {
        axis: Axis,
        /// Allowed range for the actor's leading coordinate, world pixels
        min: f32,
        max: f32,
        speed: f32,
        /// +1 or -1
        dir: f32,
    },
    Pursue {
        speed: f32,
        visibility: f32,
        /// Bob phase, radians
        phase: f32,
    },
}

#[derive(Debug, Clone)]
pub struct Hostile {
    pub actor: KinematicActor,
    pub behavior: Behavior,
}

/// Pursuer top speed on a 1-based level number
pub fn pursuer_speed(settings: &HostileSettings, level_number: u32) -> f32 {
    let steps = level_number.saturating_sub(1) as f32;
    (settings.pursuer_speed - settings.pursuer_speed_step * steps).max(settings.pursuer_speed_floor)
}

/// Pursuer visibility range on a 1-based level number
pub fn pursuer_visibility(settings: &HostileSettings, level_number: u32) -> f32 {
    let steps = level_number.saturating_sub(1) as f32;
    (settings.pursuer_visibility - settings.pursuer_visibility_step * steps)
        .max(settings.pursuer_visibility_floor)
}

/// Homing velocity from `from` toward `to`.
///
/// Full speed beyond the visibility range; inside it speed scales with
/// distance, never below `taper_floor` of full speed.
pub fn pursuit_velocity(from: Vec2, to: Vec2, speed: f32, visibility: f32, taper_floor: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.len();
    if dist <= f32::EPSILON {
        return Vec2::ZERO;
    }
    let factor = if visibility <= 0.0 || dist >= visibility {
        1.0
    } else {
        (dist / visibility).clamp(taper_floor, 1.0)
    };
    delta.normalize() * (speed * factor)
}

impl Hostile {
    /// Build from a level definition entry. `level_number` is 1-based.
    pub fn from_def(def: &HostileDef, tile_size: f32, settings: &HostileSettings, level_number: u32) -> Self {
        let position = Vec2::new(def.x * tile_size, def.y * tile_size);
        let size = Vec2::new(settings.enemy_width, settings.enemy_height);

        match def.kind {
            HostileKind::Patrol { axis, min, max } => {
                let extent = match axis {
                    Axis::Horizontal => size.x,
                    Axis::Vertical => size.y,
                };
                let lo = min * tile_size;
                let hi = (max * tile_size - extent).max(lo);
                Self {
                    actor: KinematicActor::new(position, size, LocomotionMode::Patrolling, SpriteId::Patroller),
                    behavior: Behavior::Patrol { axis, min: lo, max: hi, speed: settings.patrol_speed, dir: 1.0 },
                }
            }
            HostileKind::Pursuer => Self {
                actor: KinematicActor::new(position, size, LocomotionMode::Pursuing, SpriteId::Pursuer),
                behavior: Behavior::Pursue {
                    speed: pursuer_speed(settings, level_number),
                    visibility: pursuer_visibility(settings, level_number),
                    phase: 0.0,
                },
            },
        }
    }

    pub fn bbox(&self) -> Rect {
        self.actor.bbox()
    }

    /// Advance one tick of `dt` seconds toward/around the player
    pub fn step(&mut self, player_center: Vec2, settings: &HostileSettings, dt: f32) {
        let actor = &mut self.actor;
        match &mut self.behavior {
            Behavior::Patrol { axis, min, max, speed, dir } => {
                let coord = match axis {
                    Axis::Horizontal => &mut actor.position.x,
                    Axis::Vertical => &mut actor.position.y,
                };
                // Zero-width range: park at the bound, keep facing
                if *max - *min <= f32::EPSILON {
                    *coord = *min;
                    actor.velocity = Vec2::ZERO;
                    return;
                }
                *coord += *speed * *dir;
                if *coord >= *max {
                    *coord = *max;
                    *dir = -1.0;
                } else if *coord <= *min {
                    *coord = *min;
                    *dir = 1.0;
                }
                if *axis == Axis::Horizontal {
                    actor.facing = if *dir > 0.0 { Facing::Right } else { Facing::Left };
                }
                actor.velocity = match axis {
                    Axis::Horizontal => Vec2::new(*speed * *dir, 0.0),
                    Axis::Vertical => Vec2::new(0.0, *speed * *dir),
                };
            }
            Behavior::Pursue { speed, visibility, phase } => {
                let chase = pursuit_velocity(
                    actor.center(),
                    player_center,
                    *speed,
                    *visibility,
                    settings.pursuer_taper_floor,
                );
                *phase += settings.bob_frequency * dt;
                let bob = settings.bob_amplitude * phase.sin();
                actor.velocity = Vec2::new(chase.x, chase.y + bob);
                actor.position = actor.position + actor.velocity;
                if chase.x < 0.0 {
                    actor.facing = Facing::Left;
                } else if chase.x > 0.0 {
                    actor.facing = Facing::Right;
                }
            }
        }
    }

    /// Does this hostile hurt a player occupying `player_box`?
    ///
    /// The player's box is shrunk by `inset` on every side first, so grazing
    /// contact at the sprite edges doesn't count.
    pub fn touches(&self, player_box: &Rect, inset: f32) -> bool {
        player_box.pad(inset).overlaps(&self.bbox())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> HostileSettings {
        HostileSettings::default()
    }

    #[test]
    fn test_far_pursuer_moves_at_full_speed() {
        let v = pursuit_velocity(Vec2::new(0.0, 0.0), Vec2::new(1000.0, 0.0), 2.6, 600.0, 0.35);
        assert!((v.len() - 2.6).abs() < 1e-4);
    }

    #[test]
    fn test_near_pursuer_tapers_to_floor() {
        let mid = pursuit_velocity(Vec2::ZERO, Vec2::new(300.0, 0.0), 2.0, 600.0, 0.35);
        assert!((mid.len() - 1.0).abs() < 1e-4);
        let close = pursuit_velocity(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0, 600.0, 0.35);
        assert!((close.len() - 0.7).abs() < 1e-4);
        assert_eq!(pursuit_velocity(Vec2::ZERO, Vec2::ZERO, 2.0, 600.0, 0.35), Vec2::ZERO);
    }

    #[test]
    fn test_difficulty_scaling_has_floor() {
        let s = settings();
        assert_eq!(pursuer_speed(&s, 1), s.pursuer_speed);
        assert!(pursuer_speed(&s, 2) < pursuer_speed(&s, 1));
        assert_eq!(pursuer_speed(&s, 100), s.pursuer_speed_floor);
        assert_eq!(pursuer_visibility(&s, 1), s.pursuer_visibility);
        assert_eq!(pursuer_visibility(&s, 100), s.pursuer_visibility_floor);
    }

    #[test]
    fn test_patrol_reverses_and_mirrors() {
        let def = HostileDef { x: 1.0, y: 1.0, kind: HostileKind::Patrol { axis: Axis::Horizontal, min: 1.0, max: 3.0 } };
        let mut h = Hostile::from_def(&def, 32.0, &settings(), 1);
        assert_eq!(h.actor.facing, Facing::Right);

        // Range is [32, 96 - 24], walk until the far bound
        let mut reversed = false;
        for _ in 0..100 {
            h.step(Vec2::ZERO, &settings(), 1.0 / 60.0);
            assert!(h.actor.position.x >= 32.0 && h.actor.position.x <= 72.0);
            if h.actor.facing == Facing::Left {
                reversed = true;
                break;
            }
        }
        assert!(reversed);
        assert_eq!(h.actor.position.x, 72.0);
        h.step(Vec2::ZERO, &settings(), 1.0 / 60.0);
        assert!(h.actor.position.x < 72.0);
    }

    #[test]
    fn test_patrol_facing_follows_direction_from_outside_range() {
        // Spawned left of its 2..6 tile range
        let def = HostileDef { x: 0.0, y: 1.0, kind: HostileKind::Patrol { axis: Axis::Horizontal, min: 2.0, max: 6.0 } };
        let mut h = Hostile::from_def(&def, 32.0, &settings(), 1);
        let mut saw_left = false;
        for _ in 0..400 {
            h.step(Vec2::ZERO, &settings(), 1.0 / 60.0);
            let expected = if h.actor.velocity.x > 0.0 { Facing::Right } else { Facing::Left };
            assert_eq!(h.actor.facing, expected);
            saw_left |= h.actor.facing == Facing::Left;
        }
        assert!(saw_left);
    }

    #[test]
    fn test_zero_width_patrol_stays_put() {
        // 1 tile range minus a 24px body leaves nowhere to walk
        let def = HostileDef { x: 4.0, y: 1.0, kind: HostileKind::Patrol { axis: Axis::Horizontal, min: 4.0, max: 4.5 } };
        let mut h = Hostile::from_def(&def, 32.0, &settings(), 1);
        for _ in 0..10 {
            h.step(Vec2::ZERO, &settings(), 1.0 / 60.0);
            assert_eq!(h.actor.position.x, 128.0);
            assert_eq!(h.actor.facing, Facing::Right);
            assert_eq!(h.actor.velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn test_vertical_patrol_stays_in_range() {
        let def = HostileDef { x: 0.0, y: 2.0, kind: HostileKind::Patrol { axis: Axis::Vertical, min: 2.0, max: 4.0 } };
        let mut h = Hostile::from_def(&def, 32.0, &settings(), 1);
        for _ in 0..500 {
            h.step(Vec2::ZERO, &settings(), 1.0 / 60.0);
            assert!(h.actor.position.y >= 64.0 && h.actor.position.y <= 104.0);
            assert_eq!(h.actor.position.x, 0.0);
        }
    }

    #[test]
    fn test_pursuer_ignores_walls_and_closes_in() {
        let def = HostileDef { x: 0.0, y: 0.0, kind: HostileKind::Pursuer };
        let mut h = Hostile::from_def(&def, 32.0, &settings(), 1);
        let target = Vec2::new(2000.0, 12.0);
        let start = (h.actor.center() - target).len();
        for _ in 0..60 {
            h.step(target, &settings(), 1.0 / 60.0);
        }
        let end = (h.actor.center() - target).len();
        assert!(start - end > 100.0);
        assert_eq!(h.actor.facing, Facing::Right);
    }

    #[test]
    fn test_contact_uses_inset() {
        let def = HostileDef { x: 0.0, y: 0.0, kind: HostileKind::Pursuer };
        let h = Hostile::from_def(&def, 32.0, &settings(), 1);
        // Overlaps the hostile by 3px, less than the 5px inset
        let grazing = Rect::new(21.0, 0.0, 22.0, 30.0);
        assert!(grazing.overlaps(&h.bbox()));
        assert!(!h.touches(&grazing, 5.0));
        let solid = Rect::new(10.0, 0.0, 22.0, 30.0);
        assert!(h.touches(&solid, 5.0));
    }
}
