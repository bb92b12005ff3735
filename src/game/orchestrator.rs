//! Level lifecycle
//!
//! `LevelOrchestrator` owns the campaign, the current level attempt and the
//! camera, and sequences:
//!
//! Intro -> Playing -> Completing -> MinigameGate -> Advancing -> Intro ...
//!
//! with side exits to GameOver (restartable) and the terminal RunComplete.
//! Every tick runs in a fixed order: player, hostiles, contact checks,
//! collectibles and portal, time budget, then camera.
//!
//! Meeting the quota never opens the portal directly. It asks the camera
//! for a focus zoom on the portal; the portal opens on the camera's Reveal
//! cue. Touching the open portal enters Completing.

use crate::challenge::{run_guarded, ChallengeError, MiniChallenge};
use crate::config::{ContactPolicy, GameConfig};
use crate::input::{Action, InputFrame};
use crate::rasterizer::{Vec2, HEIGHT, WIDTH};
use crate::world::{level_seed, place_collectibles, place_portal, portal_rect_at, Campaign, LevelDef, TileWorld};
use super::actor::{KinematicActor, PlayerIntent, StepOutcome};
use super::camera::Camera;
use super::components::{CollectibleSet, Health, Portal};
use super::event::{CameraCue, CollectedEvent, DamageEvent, DamageSource, DefeatCause, GameEvents, PortalEvent};
use super::hostile::Hostile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Intro,
    Playing,
    Completing,
    MinigameGate,
    Advancing,
    GameOver,
    RunComplete,
}

impl Phase {
    pub fn can_transition_to(self, next: Phase) -> bool {
        use Phase::*;
        matches!(
            (self, next),
            (Intro, Playing)
                | (Intro, Intro)
                | (Playing, Completing)
                | (Playing, GameOver)
                | (Playing, Intro)
                | (Completing, MinigameGate)
                | (MinigameGate, Advancing)
                | (MinigameGate, Playing)
                | (Advancing, Intro)
                | (Advancing, RunComplete)
                | (GameOver, Intro)
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Intro => "Intro",
            Phase::Playing => "Playing",
            Phase::Completing => "Completing",
            Phase::MinigameGate => "MinigameGate",
            Phase::Advancing => "Advancing",
            Phase::GameOver => "GameOver",
            Phase::RunComplete => "RunComplete",
        }
    }
}

/// Progress for the current attempt and the whole run
#[derive(Debug, Clone, Default)]
pub struct RunState {
    pub level_index: usize,
    pub collected: u32,
    /// Seconds since the intro transition finished, excluding pause
    pub elapsed: f32,
    /// Sum of every finished attempt's elapsed time
    pub total_run_seconds: f32,
    pub paused: bool,
    pub dialogue_line: usize,
    pub dialogue_seen: bool,
    pub defeat: Option<DefeatCause>,
    phase_timer: f32,
    gate_resolved: bool,
}

impl RunState {
    /// Move the attempt's elapsed time into the run total
    fn bank_elapsed(&mut self) {
        self.total_run_seconds += self.elapsed;
        self.elapsed = 0.0;
    }
}

/// Everything owned by one level attempt. Rebuilt from the definition on
/// every entry, never reused.
pub struct LevelState {
    pub def: LevelDef,
    /// 1-based position in the campaign
    pub number: u32,
    pub world: TileWorld,
    pub spawn: Vec2,
    pub player: KinematicActor,
    pub hostiles: Vec<Hostile>,
    pub collectibles: CollectibleSet,
    pub portal: Portal,
    pub health: Option<Health>,
    pub time_budget: Option<f32>,
}

impl LevelState {
    pub fn build(def: &LevelDef, number: u32, config: &GameConfig) -> Self {
        let tile = config.physics.tile_size;
        let rules = &config.rules;
        let world = TileWorld::from_level(def, tile);
        let spawn = def.spawn_world(tile);

        let anchor = def.portal
            .map(|(x, y)| Vec2::new(x * tile, y * tile))
            .or_else(|| place_portal(&world, rules))
            .unwrap_or_else(|| Vec2::new(world.bounds.center().x, world.bounds.bottom()));
        let portal = Portal::closed(portal_rect_at(anchor, rules));

        let collectibles = CollectibleSet::new(place_collectibles(&world, def.quota, level_seed(def.id), rules));

        let hostiles = def.hostiles
            .iter()
            .map(|h| Hostile::from_def(h, tile, &config.hostiles, number))
            .collect();

        let health = match rules.contact_policy {
            ContactPolicy::InstantDefeat => None,
            ContactPolicy::HealthPool { max } => Some(Health::new(max.max(1))),
        };

        log::info!(
            "Built level {} '{}': {} obstacles, {} hazards, {} hostiles, quota {}",
            def.id, def.name, world.obstacles.len(), world.hazards.len(), def.hostiles.len(), def.quota,
        );

        Self {
            def: def.clone(),
            number,
            world,
            spawn,
            player: KinematicActor::player(spawn, &config.physics),
            hostiles,
            collectibles,
            portal,
            health,
            time_budget: def.time_budget.or(rules.default_time_budget),
        }
    }
}

pub struct LevelOrchestrator {
    config: GameConfig,
    campaign: Campaign,
    phase: Phase,
    pub state: RunState,
    level: LevelState,
    pub camera: Camera,
    pub events: GameEvents,
}

impl LevelOrchestrator {
    /// Start a run at the first level of `campaign`
    pub fn new(config: GameConfig, campaign: Campaign) -> Self {
        let viewport = Vec2::new(WIDTH as f32, HEIGHT as f32);
        let level = LevelState::build(campaign.first(), 1, &config);
        let mut camera = Camera::new(config.camera.clone(), viewport);
        camera.reset(level.world.bounds, level.player.center());
        log::info!("Run started with {} levels", campaign.len());

        Self {
            config,
            campaign,
            phase: Phase::Intro,
            state: RunState::default(),
            level,
            camera,
            events: GameEvents::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn level(&self) -> &LevelState {
        &self.level
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn level_count(&self) -> usize {
        self.campaign.len()
    }

    /// Dialogue line to show, while the intro is waiting on it
    pub fn current_dialogue(&self) -> Option<&str> {
        if self.phase != Phase::Intro || self.state.dialogue_seen {
            return None;
        }
        self.level.def.dialogue.get(self.state.dialogue_line).map(|s| s.as_str())
    }

    fn set_phase(&mut self, next: Phase) -> bool {
        if !self.phase.can_transition_to(next) {
            log::error!("Refusing phase change {:?} -> {:?}", self.phase, next);
            return false;
        }
        log::info!("Phase {:?} -> {:?}", self.phase, next);
        self.events.phases.send((self.phase, next));
        self.phase = next;
        true
    }

    /// Replace the level attempt with a fresh build of campaign entry `index`
    fn load_level(&mut self, index: usize, def: &LevelDef) {
        self.level = LevelState::build(def, index as u32 + 1, &self.config);
        self.camera.reset(self.level.world.bounds, self.level.player.center());
        self.state.level_index = index;
        self.state.collected = 0;
        self.state.elapsed = 0.0;
        self.state.paused = false;
        self.state.defeat = None;
        self.state.phase_timer = 0.0;
        self.state.gate_resolved = false;
    }

    /// One fixed-rate tick
    pub fn tick(&mut self, input: &InputFrame, dt: f32) {
        self.events.clear_all();
        self.camera.set_manual_override(input.held(Action::ZoomOut));

        match self.phase {
            Phase::Intro => self.tick_intro(input),
            Phase::Playing => self.tick_playing(input, dt),
            Phase::Completing => {
                self.state.phase_timer += dt;
                if self.state.phase_timer >= self.config.rules.completing_seconds {
                    self.state.gate_resolved = false;
                    self.set_phase(Phase::MinigameGate);
                }
            }
            Phase::MinigameGate => {}
            Phase::Advancing => {
                self.set_phase(Phase::Intro);
            }
            Phase::GameOver => {
                if input.pressed(Action::Restart) || input.pressed(Action::Jump) {
                    self.restart_level();
                }
            }
            Phase::RunComplete => {}
        }

        self.camera.update(dt, self.level.player.center());
        self.handle_camera_cues();
    }

    fn tick_intro(&mut self, input: &InputFrame) {
        let lines = self.level.def.dialogue.len();
        if !self.state.dialogue_seen && lines > 0 {
            if !(input.pressed(Action::Advance) || input.pressed(Action::Jump)) {
                return;
            }
            self.state.dialogue_line += 1;
            if self.state.dialogue_line < lines {
                return;
            }
        }
        self.state.dialogue_seen = true;
        self.begin_play();
    }

    fn begin_play(&mut self) {
        if self.set_phase(Phase::Playing) {
            self.state.elapsed = 0.0;
            self.camera.start_scripted_transition();
        }
    }

    fn tick_playing(&mut self, input: &InputFrame, dt: f32) {
        if self.state.paused {
            return;
        }

        let active = self.camera.transition_complete();
        if active {
            self.state.elapsed += dt;
        }

        // Player
        let intent = if active {
            PlayerIntent {
                left: input.held(Action::MoveLeft),
                right: input.held(Action::MoveRight),
                jump: input.pressed(Action::Jump),
            }
        } else {
            PlayerIntent::default()
        };
        let outcome = self.level.player.step_player(intent, &self.level.world, &self.config.physics);
        log::trace!("player {:?} at {:?}", outcome, self.level.player.position);
        match outcome {
            StepOutcome::Moved => {}
            StepOutcome::Hazard => self.take_hit(DamageSource::Hazard),
            StepOutcome::FellOut => self.take_hit(DamageSource::FellOut),
        }
        if self.phase != Phase::Playing {
            return;
        }

        // Hostiles
        let target = self.level.player.center();
        for hostile in &mut self.level.hostiles {
            hostile.step(target, &self.config.hostiles, dt);
        }
        let player_box = self.level.player.bbox();
        let inset = self.config.hostiles.contact_inset;
        if self.level.hostiles.iter().any(|h| h.touches(&player_box, inset)) {
            self.take_hit(DamageSource::Hostile);
            if self.phase != Phase::Playing {
                return;
            }
        }
        if let Some(hp) = self.level.health.as_mut() {
            hp.tick_invulnerability();
        }

        // Collectibles
        let player_box = self.level.player.bbox();
        for position in self.level.collectibles.collect_overlapping(&player_box) {
            self.state.collected += 1;
            log::debug!("Collected {}/{}", self.state.collected, self.level.def.quota);
            self.events.collected.send(CollectedEvent { position, total: self.state.collected });
        }

        // Portal
        let portal = &mut self.level.portal;
        if self.state.collected >= self.level.def.quota && !portal.armed && !portal.open {
            if self.camera.start_focus_zoom(portal.rect.center()) {
                log::info!("Quota met, revealing portal");
                portal.armed = true;
            }
        }
        if portal.open && portal.rect.overlaps(&player_box) {
            self.events.portal.send(PortalEvent::Entered);
            self.state.phase_timer = 0.0;
            self.camera.reset_zoom();
            self.set_phase(Phase::Completing);
            return;
        }

        // Time budget
        if let Some(budget) = self.level.time_budget {
            if self.state.elapsed > budget {
                self.defeat(DefeatCause::TimeUp);
            }
        }
    }

    /// Apply the configured contact rule for one hit
    fn take_hit(&mut self, source: DamageSource) {
        let Some(mut hp) = self.level.health else {
            self.defeat(DefeatCause::Hit(source));
            return;
        };

        if hp.is_invulnerable() {
            // Still pull the player out of hazards and pits
            if source != DamageSource::Hostile {
                self.level.player.respawn(self.level.spawn);
            }
            return;
        }

        let depleted = hp.damage();
        if !depleted {
            hp.set_invulnerable(self.config.rules.invulnerable_ticks);
        }
        self.level.health = Some(hp);
        if depleted {
            self.defeat(DefeatCause::Hit(source));
            return;
        }

        self.level.player.respawn(self.level.spawn);
        log::info!("Player hit by {:?}, {} left", source, hp.current);
        self.events.damaged.send(DamageEvent { source, remaining: hp.current });
    }

    fn defeat(&mut self, cause: DefeatCause) {
        log::info!("Defeated on level {}: {:?}", self.level.def.id, cause);
        self.state.defeat = Some(cause);
        self.state.bank_elapsed();
        self.events.defeated.send(cause);
        self.camera.reset_zoom();
        self.set_phase(Phase::GameOver);
    }

    fn handle_camera_cues(&mut self) {
        let cues: Vec<CameraCue> = self.camera.cues.drain().collect();
        for cue in cues {
            if cue == CameraCue::Reveal && self.level.portal.armed && !self.level.portal.open {
                self.level.portal.open = true;
                log::info!("Portal open on level {}", self.level.def.id);
                self.events.portal.send(PortalEvent::Opened);
            }
            self.events.cues.send(cue);
        }
    }

    /// Pause or resume play. Only honoured while Playing. Camera
    /// transitions are paused separately through the camera.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        if self.state.paused != paused {
            log::info!("{}", if paused { "Paused" } else { "Resumed" });
        }
        self.state.paused = paused;
        true
    }

    /// Rebuild the current level from its definition and start over.
    /// Dialogue already seen is skipped.
    pub fn restart_level(&mut self) -> bool {
        if !matches!(self.phase, Phase::Intro | Phase::Playing | Phase::GameOver) {
            log::warn!("Restart ignored in {:?}", self.phase);
            return false;
        }
        let index = self.state.level_index;
        let Some(def) = self.campaign.get(index).cloned() else {
            return false;
        };
        log::info!("Restarting level {}", def.id);
        if self.phase != Phase::GameOver {
            self.state.bank_elapsed();
        }
        self.load_level(index, &def);
        self.set_phase(Phase::Intro)
    }

    /// Level id awaiting a mini-challenge, if the gate is open
    pub fn pending_gate(&self) -> Option<u32> {
        if self.phase == Phase::MinigameGate && !self.state.gate_resolved {
            Some(self.level.def.id)
        } else {
            None
        }
    }

    /// Report the mini-challenge outcome. Honoured once per gate; errors
    /// count as failure. Returns whether the outcome was accepted.
    pub fn resolve_gate(&mut self, outcome: Result<bool, ChallengeError>) -> bool {
        if self.pending_gate().is_none() {
            log::warn!("Gate outcome ignored in {:?}", self.phase);
            return false;
        }
        self.state.gate_resolved = true;

        let passed = match outcome {
            Ok(passed) => passed,
            Err(e) => {
                log::warn!("Mini-challenge failed, retrying level: {}", e);
                false
            }
        };
        log::info!("Mini-challenge for level {}: {}", self.level.def.id, if passed { "passed" } else { "failed" });

        if !passed {
            self.level.player.respawn(self.level.spawn);
            self.set_phase(Phase::Playing);
            return true;
        }

        self.state.bank_elapsed();
        self.set_phase(Phase::Advancing);
        let next = self.state.level_index + 1;
        match self.campaign.get(next).cloned() {
            Some(def) => {
                self.load_level(next, &def);
                self.state.dialogue_line = 0;
                self.state.dialogue_seen = false;
            }
            None => {
                log::info!("Run complete in {:.2}s", self.state.total_run_seconds);
                self.set_phase(Phase::RunComplete);
            }
        }
        true
    }

    /// Run a synchronous challenge for the open gate, exactly once
    pub fn run_gate(&mut self, challenge: &mut dyn MiniChallenge) -> Option<bool> {
        let level_id = self.pending_gate()?;
        let outcome = run_guarded(challenge, level_id);
        let passed = matches!(outcome, Ok(true));
        self.resolve_gate(outcome);
        Some(passed)
    }
}
