//! Kinematic actors and the player movement step
//!
//! Actors carry position, velocity and a box size in world pixels. The
//! player is driven by input each tick and moved through the tile world's
//! collision resolver; hostiles (see `hostile.rs`) move freely.

use crate::asset::SpriteId;
use crate::config::PhysicsSettings;
use crate::rasterizer::{Rect, Vec2};
use crate::world::{Resolution, TileWorld};
use super::components::{Facing, LocomotionMode};

/// Ticks per walk-cycle frame
const WALK_FRAME_TICKS: u32 = 8;
const WALK_FRAMES: u32 = 4;

/// Movement request for one tick. Empty while input is gated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub left: bool,
    pub right: bool,
    /// Jump edge (pressed this tick)
    pub jump: bool,
}

/// What happened to the player this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    /// The proposed move touched a hazard; the player did not move
    Hazard,
    /// The player dropped below the level
    FellOut,
}

#[derive(Debug, Clone)]
pub struct KinematicActor {
    /// Top-left corner
    pub position: Vec2,
    /// Pixels per tick, y-down
    pub velocity: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    pub mode: LocomotionMode,
    pub sprite: SpriteId,
    pub anim_frame: u32,
    anim_ticks: u32,
}

impl KinematicActor {
    pub fn new(position: Vec2, size: Vec2, mode: LocomotionMode, sprite: SpriteId) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
            facing: Facing::Right,
            mode,
            sprite,
            anim_frame: 0,
            anim_ticks: 0,
        }
    }

    pub fn player(spawn: Vec2, physics: &PhysicsSettings) -> Self {
        Self::new(
            spawn,
            Vec2::new(physics.player_width, physics.player_height),
            LocomotionMode::Airborne,
            SpriteId::Player,
        )
    }

    pub fn bbox(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.bbox().center()
    }

    pub fn is_grounded(&self) -> bool {
        self.mode == LocomotionMode::Grounded
    }

    /// Put the actor back at `spawn`, at rest
    pub fn respawn(&mut self, spawn: Vec2) {
        self.position = spawn;
        self.velocity = Vec2::ZERO;
        self.mode = LocomotionMode::Airborne;
        self.facing = Facing::Right;
        self.anim_frame = 0;
        self.anim_ticks = 0;
    }

    /// Advance the player one tick.
    ///
    /// Horizontal speed comes straight from input. Jump only fires from
    /// Grounded. Gravity applies every tick, capped at terminal velocity.
    /// The actor is optimistically Airborne until the resolver reports a
    /// landing.
    pub fn step_player(&mut self, intent: PlayerIntent, world: &TileWorld, physics: &PhysicsSettings) -> StepOutcome {
        self.velocity.x = match (intent.left, intent.right) {
            (true, false) => {
                self.facing = Facing::Left;
                -physics.move_speed
            }
            (false, true) => {
                self.facing = Facing::Right;
                physics.move_speed
            }
            _ => 0.0,
        };

        if intent.jump && self.is_grounded() {
            self.velocity.y = physics.jump_impulse;
        }

        self.velocity.y = (self.velocity.y + physics.gravity).min(physics.terminal_velocity);
        self.mode = LocomotionMode::Airborne;

        let bbox = self.bbox();
        match world.resolve(bbox, self.velocity.y, self.velocity.x, self.velocity.y) {
            Resolution::Hazard => return StepOutcome::Hazard,
            Resolution::Moved(d) => {
                self.position.x += d.dx;
                self.position.y += d.dy;
                if d.hit_wall {
                    self.velocity.x = 0.0;
                }
                if d.vertical_blocked() {
                    self.velocity.y = 0.0;
                }
                if d.grounded {
                    self.mode = LocomotionMode::Grounded;
                }
            }
        }

        self.animate();

        if world.is_below_bounds(&self.bbox()) {
            return StepOutcome::FellOut;
        }
        StepOutcome::Moved
    }

    fn animate(&mut self) {
        if self.is_grounded() && self.velocity.x != 0.0 {
            self.anim_ticks += 1;
            if self.anim_ticks >= WALK_FRAME_TICKS {
                self.anim_ticks = 0;
                self.anim_frame = (self.anim_frame + 1) % WALK_FRAMES;
            }
        } else {
            self.anim_ticks = 0;
            self.anim_frame = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physics() -> PhysicsSettings {
        PhysicsSettings::default()
    }

    fn flat_world() -> TileWorld {
        let ground = Rect::new(0.0, 400.0, 2000.0, 64.0);
        TileWorld::new(vec![ground], vec![], Rect::new(0.0, 0.0, 2000.0, 480.0), 32.0)
    }

    fn settle(actor: &mut KinematicActor, world: &TileWorld) {
        for _ in 0..120 {
            actor.step_player(PlayerIntent::default(), world, &physics());
        }
    }

    #[test]
    fn test_falls_and_lands() {
        let world = flat_world();
        let mut p = KinematicActor::player(Vec2::new(100.0, 100.0), &physics());
        settle(&mut p, &world);
        assert!(p.is_grounded());
        assert!((p.bbox().bottom() - 400.0).abs() < 1e-3);
        assert_eq!(p.velocity.y, 0.0);
    }

    #[test]
    fn test_terminal_velocity() {
        let world = TileWorld::new(vec![], vec![], Rect::new(0.0, 0.0, 100.0, 100_000.0), 32.0);
        let mut p = KinematicActor::player(Vec2::ZERO, &physics());
        for _ in 0..200 {
            p.step_player(PlayerIntent::default(), &world, &physics());
        }
        assert_eq!(p.velocity.y, physics().terminal_velocity);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let world = flat_world();
        let mut p = KinematicActor::player(Vec2::new(100.0, 100.0), &physics());
        settle(&mut p, &world);

        let jump = PlayerIntent { jump: true, ..Default::default() };
        p.step_player(jump, &world, &physics());
        assert_eq!(p.mode, LocomotionMode::Airborne);
        let rising = p.velocity.y;
        assert!(rising < 0.0);

        // Second press mid-air does nothing beyond gravity
        p.step_player(jump, &world, &physics());
        assert!((p.velocity.y - (rising + physics().gravity)).abs() < 1e-4);
    }

    #[test]
    fn test_walk_sets_facing() {
        let world = flat_world();
        let mut p = KinematicActor::player(Vec2::new(100.0, 100.0), &physics());
        settle(&mut p, &world);
        let x0 = p.position.x;
        p.step_player(PlayerIntent { left: true, ..Default::default() }, &world, &physics());
        assert_eq!(p.facing, Facing::Left);
        assert!((p.position.x - (x0 - physics().move_speed)).abs() < 1e-4);

        // Both held cancels out
        p.step_player(PlayerIntent { left: true, right: true, jump: false }, &world, &physics());
        assert_eq!(p.velocity.x, 0.0);
    }

    #[test]
    fn test_hazard_blocks_move() {
        let spikes = Rect::new(100.0, 380.0, 200.0, 20.0);
        let world = TileWorld::new(
            vec![Rect::new(0.0, 400.0, 2000.0, 64.0)],
            vec![spikes],
            Rect::new(0.0, 0.0, 2000.0, 480.0),
            32.0,
        );
        let mut p = KinematicActor::player(Vec2::new(76.0, 370.0), &physics());
        settle_without_hazard(&mut p, &world);
        let before = p.position;
        let outcome = p.step_player(PlayerIntent { right: true, ..Default::default() }, &world, &physics());
        assert_eq!(outcome, StepOutcome::Hazard);
        assert_eq!(p.position, before);
    }

    fn settle_without_hazard(actor: &mut KinematicActor, world: &TileWorld) {
        for _ in 0..60 {
            if actor.step_player(PlayerIntent::default(), world, &physics()) != StepOutcome::Moved {
                break;
            }
        }
    }

    #[test]
    fn test_falling_out_of_level() {
        let world = TileWorld::new(vec![], vec![], Rect::new(0.0, 0.0, 500.0, 200.0), 32.0);
        let mut p = KinematicActor::player(Vec2::new(10.0, 150.0), &physics());
        let mut outcome = StepOutcome::Moved;
        for _ in 0..60 {
            outcome = p.step_player(PlayerIntent::default(), &world, &physics());
            if outcome != StepOutcome::Moved {
                break;
            }
        }
        assert_eq!(outcome, StepOutcome::FellOut);
    }
}
