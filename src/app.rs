//! Application state and screen stack
//!
//! The bottom of the stack is always the title screen. Starting a run pushes
//! `Playing`; pause and the gate challenge push on top of it and pop back
//! when done. Finishing the run replaces everything above the title with the
//! name entry and results screens.

use crate::asset::{SpriteLibrary, SPRITES_DIR};
use crate::challenge::SequenceChallenge;
use crate::config::GameConfig;
use crate::game::{self, FixedStep, FpsLimit, LevelOrchestrator, Phase, PortalEvent};
use crate::input::{Action, InputFrame, InputState};
use crate::rasterizer::{Framebuffer, Rect, HEIGHT, WIDTH};
use crate::storage::{Leaderboard, LocalStorage, RunRecord};
use crate::ui::{self, Canvas, PauseItem, PauseMenu, TextInputState};
use crate::world::Campaign;
use macroquad::prelude::{clear_background, screen_height, screen_width, BLACK};

/// One entry of the screen stack
pub enum Screen {
    Title,
    Playing,
    Paused(PauseMenu),
    Challenge(SequenceChallenge),
    NameEntry(TextInputState),
    /// Record saved; `rank` is None if it missed the board
    Results { rank: Option<usize> },
}

impl Screen {
    pub fn label(&self) -> &'static str {
        match self {
            Screen::Title => "Title",
            Screen::Playing => "Playing",
            Screen::Paused(_) => "Paused",
            Screen::Challenge(_) => "Challenge",
            Screen::NameEntry(_) => "NameEntry",
            Screen::Results { .. } => "Results",
        }
    }
}

/// What the top screen asked for this frame
enum Transition {
    None,
    Push(Screen),
    Pop,
    Replace(Screen),
    /// Drop the run and go back to the title
    Title,
}

/// Main application state
pub struct AppState {
    pub config: GameConfig,
    pub campaign: Campaign,
    pub orchestrator: LevelOrchestrator,
    pub leaderboard: Leaderboard,
    storage: LocalStorage,
    pub sprites: SpriteLibrary,
    fb: Framebuffer,
    /// Unified input state (keyboard + gamepad)
    pub input: InputState,
    step: FixedStep,
    /// Edges from frames that ran no tick
    carried: InputFrame,
    pub fps_limit: FpsLimit,
    screens: Vec<Screen>,
    pub quit_requested: bool,
}

impl AppState {
    pub fn new(config: GameConfig, campaign: Campaign, storage: LocalStorage) -> Self {
        let leaderboard = Leaderboard::load(&storage, config.rules.leaderboard_size);
        let orchestrator = LevelOrchestrator::new(config.clone(), campaign.clone());
        let step = FixedStep::new(config.physics.tick_rate);
        Self {
            config,
            campaign,
            orchestrator,
            leaderboard,
            storage,
            sprites: SpriteLibrary::load(SPRITES_DIR),
            fb: Framebuffer::new(WIDTH, HEIGHT),
            input: InputState::new(),
            step,
            carried: InputFrame::default(),
            fps_limit: FpsLimit::default(),
            screens: vec![Screen::Title],
            quit_requested: false,
        }
    }

    /// Top of the stack. The title is never popped, so this is always Some.
    pub fn top(&self) -> Option<&Screen> {
        self.screens.last()
    }

    fn new_run(&mut self) {
        self.orchestrator = LevelOrchestrator::new(self.config.clone(), self.campaign.clone());
        self.step.reset();
        self.carried = InputFrame::default();
    }

    fn set_paused(&mut self, paused: bool) {
        self.orchestrator.set_paused(paused);
        self.orchestrator.camera.set_transitions_paused(paused);
    }

    /// Poll input and advance whatever screen is on top
    pub fn update(&mut self, frame_dt: f32) {
        let frame = self.input.poll();
        let typing = matches!(self.top(), Some(Screen::NameEntry(_)));
        if frame.pressed(Action::Quit) && !typing {
            log::info!("Quit requested");
            self.quit_requested = true;
            return;
        }

        let transition = match self.screens.last_mut() {
            None | Some(Screen::Title) => {
                if frame.pressed(Action::MoveRight) {
                    self.fps_limit = self.fps_limit.next();
                    log::info!("Frame limit: {}", self.fps_limit.label());
                }
                if frame.pressed(Action::Advance) || frame.pressed(Action::Jump) {
                    self.step.reset();
                    Transition::Push(Screen::Playing)
                } else {
                    Transition::None
                }
            }
            Some(Screen::Playing) => self.update_playing(frame, frame_dt),
            Some(Screen::Paused(menu)) => {
                if frame.pressed(Action::Pause) {
                    Transition::Pop
                } else {
                    match menu.update(&frame) {
                        Some(PauseItem::Resume) => Transition::Pop,
                        Some(PauseItem::Restart) => {
                            self.set_paused(false);
                            self.orchestrator.restart_level();
                            Transition::Pop
                        }
                        Some(PauseItem::Quit) => Transition::Title,
                        None => Transition::None,
                    }
                }
            }
            Some(Screen::Challenge(challenge)) => {
                challenge.update(&frame, frame_dt);
                match challenge.outcome() {
                    Some(outcome) => {
                        self.orchestrator.resolve_gate(outcome);
                        self.step.reset();
                        Transition::Pop
                    }
                    None => Transition::None,
                }
            }
            Some(Screen::NameEntry(name)) => {
                if name.handle_keys(frame_dt) {
                    let record = RunRecord::new(&name.text, self.orchestrator.state.total_run_seconds);
                    log::info!("Run record: {} {:.2}s", record.player_name, record.total_seconds);
                    let rank = self.leaderboard.insert(record);
                    if let Err(e) = self.leaderboard.save(&self.storage) {
                        log::warn!("Leaderboard not saved: {}", e);
                    }
                    Transition::Replace(Screen::Results { rank })
                } else {
                    Transition::None
                }
            }
            Some(Screen::Results { .. }) => {
                if frame.pressed(Action::Advance) {
                    Transition::Title
                } else {
                    Transition::None
                }
            }
        };

        self.apply(transition);
    }

    fn update_playing(&mut self, frame: InputFrame, frame_dt: f32) -> Transition {
        if frame.pressed(Action::Pause) && self.orchestrator.phase() == Phase::Playing {
            self.set_paused(true);
            return Transition::Push(Screen::Paused(PauseMenu::new()));
        }
        if frame.pressed(Action::Restart) && matches!(self.orchestrator.phase(), Phase::Intro | Phase::Playing) {
            self.orchestrator.restart_level();
        }

        let frame = frame.with_carried_edges(&self.carried);
        let ticks = self.step.advance(frame_dt);
        self.carried = if ticks == 0 { frame } else { InputFrame::default() };
        for i in 0..ticks {
            // Edges belong to the first tick only
            let input = if i == 0 { frame } else { frame.without_edges() };
            self.orchestrator.tick(&input, self.step.dt());
            self.drain_events();

            if let Some(level_id) = self.orchestrator.pending_gate() {
                return Transition::Push(Screen::Challenge(SequenceChallenge::new(level_id)));
            }
            if self.orchestrator.phase() == Phase::RunComplete {
                return Transition::Push(Screen::NameEntry(TextInputState::default()));
            }
        }
        Transition::None
    }

    /// Read this tick's events. Sound would hook in here.
    fn drain_events(&mut self) {
        let events = &self.orchestrator.events;
        for (from, to) in events.phases.iter() {
            log::debug!("phase {} -> {}", from.label(), to.label());
        }
        for cue in events.cues.iter() {
            log::debug!("audio cue {:?}", cue);
        }
        for collected in events.collected.iter() {
            log::debug!("collected #{} at {:?}", collected.total, collected.position);
        }
        for damage in events.damaged.iter() {
            log::debug!("hit by {:?}, {} left", damage.source, damage.remaining);
        }
        for portal in events.portal.iter() {
            if *portal == PortalEvent::Entered {
                log::debug!("portal entered");
            }
        }
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::None => return,
            Transition::Push(screen) => self.screens.push(screen),
            Transition::Pop => {
                if self.screens.len() > 1 {
                    self.screens.pop();
                }
                if matches!(self.top(), Some(Screen::Playing)) {
                    self.set_paused(false);
                }
            }
            Transition::Replace(screen) => {
                if self.screens.len() > 1 {
                    self.screens.pop();
                }
                self.screens.push(screen);
            }
            Transition::Title => {
                self.screens.truncate(1);
                self.new_run();
            }
        }
        log::debug!("screen -> {}", self.top().map_or("none", Screen::label));
    }

    /// Render the world and the overlays for the current stack
    pub fn draw(&mut self) {
        let orch = &self.orchestrator;
        game::render_level(&mut self.fb, orch.level(), &orch.camera, &self.sprites);

        clear_background(BLACK);
        let vp = game::present(&self.fb, Rect::new(0.0, 0.0, screen_width(), screen_height()));
        let canvas = Canvas::new(vp);

        if self.screens.len() > 1 {
            ui::draw_hud(&canvas, orch);
            if let Some(line) = orch.current_dialogue() {
                ui::draw_dialogue(&canvas, &orch.level().def.name, line);
            }
            if orch.phase() == Phase::GameOver {
                ui::draw_game_over(&canvas, orch.state.defeat, orch.state.total_run_seconds);
            }
        }

        match self.top() {
            None | Some(Screen::Title) => {
                ui::draw_title(&canvas, &self.leaderboard, orch.level_count(), self.fps_limit.label());
            }
            Some(Screen::Playing) => {}
            Some(Screen::Paused(menu)) => menu.draw(&canvas),
            Some(Screen::Challenge(challenge)) => ui::draw_challenge(&canvas, challenge),
            Some(Screen::NameEntry(name)) => {
                ui::draw_run_complete(&canvas, orch.state.total_run_seconds, Some(name), &self.leaderboard, None);
            }
            Some(Screen::Results { rank }) => {
                ui::draw_run_complete(&canvas, orch.state.total_run_seconds, None, &self.leaderboard, *rank);
            }
        }
    }
}
