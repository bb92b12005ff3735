//! 2D follow camera with scripted zoom transitions
//!
//! The camera owns a scroll offset (top-left of the view, world pixels) and a
//! zoom. World points map to the framebuffer as `(p - scroll) * zoom`.
//!
//! Modes:
//! - Follow: scroll eases toward the target, zoom eases toward the base zoom
//!   (or the manual zoom-out while that is held)
//! - ScriptedTransition: level intro; holds at 1.0, then eases to base zoom
//!   and marks the transition complete, which unlocks player input
//! - FocusZoom: portal reveal; eases in on a point, fires a single Reveal
//!   cue at the peak, holds, then eases back to the zoom it interrupted
//! - DeathReset: one-shot ease back to base zoom, cancels any focus
//!
//! Zoom is kept within [1.0, door_target_zoom] after every update.

use crate::config::CameraSettings;
use crate::rasterizer::{Rect, Vec2};
use super::event::{CameraCue, EventQueue};

const MIN_ZOOM: f32 = 1.0;

/// Cubic ease-out on [0, 1]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusStage {
    EaseIn,
    Hold,
    EaseOut,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusState {
    pub target: Vec2,
    pub stage: FocusStage,
    pub elapsed: f32,
    from_zoom: f32,
    from_scroll: Vec2,
    /// Zoom to return to after the hold
    return_zoom: f32,
    revealed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMode {
    Follow,
    ScriptedTransition { elapsed: f32 },
    FocusZoom(FocusState),
    DeathReset { elapsed: f32, from_zoom: f32 },
}

pub struct Camera {
    pub scroll: Vec2,
    zoom: f32,
    /// Resting zoom for Follow mode
    target_zoom: f32,
    mode: CameraMode,
    transition_complete: bool,
    manual_override: bool,
    transitions_paused: bool,
    /// Framebuffer size in pixels
    viewport: Vec2,
    level_bounds: Rect,
    settings: CameraSettings,
    pub cues: EventQueue<CameraCue>,
}

impl Camera {
    pub fn new(settings: CameraSettings, viewport: Vec2) -> Self {
        Self {
            scroll: Vec2::ZERO,
            zoom: MIN_ZOOM,
            target_zoom: MIN_ZOOM,
            mode: CameraMode::Follow,
            transition_complete: false,
            manual_override: false,
            transitions_paused: false,
            viewport,
            level_bounds: Rect::new(0.0, 0.0, viewport.x, viewport.y),
            settings,
            cues: EventQueue::new(),
        }
    }

    fn max_zoom(&self) -> f32 {
        self.settings.door_target_zoom.max(MIN_ZOOM)
    }

    fn clamp_zoom(&self, z: f32) -> f32 {
        z.clamp(MIN_ZOOM, self.max_zoom())
    }

    /// Reuse the camera for a new level attempt. Zoom drops to 1.0 and
    /// stays there until a scripted transition starts.
    pub fn reset(&mut self, level_bounds: Rect, focus: Vec2) {
        self.level_bounds = level_bounds;
        self.zoom = MIN_ZOOM;
        self.target_zoom = MIN_ZOOM;
        self.mode = CameraMode::Follow;
        self.transition_complete = false;
        self.manual_override = false;
        self.transitions_paused = false;
        self.cues.clear();
        self.scroll = self.desired_scroll(focus);
        self.clamp_scroll();
    }

    /// Start the level-intro zoom. Input stays gated until it finishes.
    pub fn start_scripted_transition(&mut self) {
        self.zoom = MIN_ZOOM;
        self.target_zoom = self.clamp_zoom(self.settings.base_zoom);
        self.transition_complete = false;
        self.mode = CameraMode::ScriptedTransition { elapsed: 0.0 };
        self.cues.send(CameraCue::TransitionStarted);
    }

    /// Ease in on `target`. Returns false (and does nothing) while another
    /// transition runs or the manual zoom-out is held.
    pub fn start_focus_zoom(&mut self, target: Vec2) -> bool {
        if self.manual_override || !matches!(self.mode, CameraMode::Follow) {
            return false;
        }
        self.mode = CameraMode::FocusZoom(FocusState {
            target,
            stage: FocusStage::EaseIn,
            elapsed: 0.0,
            from_zoom: self.zoom,
            from_scroll: self.scroll,
            return_zoom: self.target_zoom,
            revealed: false,
        });
        self.cues.send(CameraCue::TransitionStarted);
        true
    }

    /// Ease back to base zoom, cancelling any focus zoom
    pub fn reset_zoom(&mut self) {
        if matches!(self.mode, CameraMode::ScriptedTransition { .. }) {
            // Never leave input gated behind a cancelled intro
            self.transition_complete = true;
        }
        self.target_zoom = self.clamp_zoom(self.settings.base_zoom);
        self.mode = CameraMode::DeathReset { elapsed: 0.0, from_zoom: self.zoom };
        self.cues.send(CameraCue::ZoomReset);
    }

    /// Hold or release the manual zoom-out. Ignored while a scripted or
    /// focus transition is running.
    pub fn set_manual_override(&mut self, held: bool) {
        if held && matches!(self.mode, CameraMode::ScriptedTransition { .. } | CameraMode::FocusZoom(_)) {
            return;
        }
        self.manual_override = held;
    }

    /// Freeze transition timers without touching Follow smoothing
    pub fn set_transitions_paused(&mut self, paused: bool) {
        self.transitions_paused = paused;
    }

    pub fn transitions_paused(&self) -> bool {
        self.transitions_paused
    }

    pub fn transition_complete(&self) -> bool {
        self.transition_complete
    }

    pub fn is_focusing(&self) -> bool {
        matches!(self.mode, CameraMode::FocusZoom(_))
    }

    pub fn manual_override(&self) -> bool {
        self.manual_override
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Visible world extent at the current zoom
    pub fn view_size(&self) -> Vec2 {
        Vec2::new(self.viewport.x / self.zoom, self.viewport.y / self.zoom)
    }

    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        (p - self.scroll) * self.zoom
    }

    pub fn rect_to_screen(&self, r: &Rect) -> Rect {
        let p = self.world_to_screen(Vec2::new(r.x, r.y));
        Rect::new(p.x, p.y, r.w * self.zoom, r.h * self.zoom)
    }

    fn desired_scroll(&self, focus: Vec2) -> Vec2 {
        let view = self.view_size();
        Vec2::new(focus.x - view.x * 0.5, focus.y - view.y * 0.5)
    }

    /// Keep the view inside the level; center it when the level is smaller
    fn clamp_scroll(&mut self) {
        let view = self.view_size();
        let b = self.level_bounds;
        self.scroll.x = if b.w <= view.x {
            b.x + (b.w - view.x) * 0.5
        } else {
            self.scroll.x.clamp(b.x, b.right() - view.x)
        };
        self.scroll.y = if b.h <= view.y {
            b.y + (b.h - view.y) * 0.5
        } else {
            self.scroll.y.clamp(b.y, b.bottom() - view.y)
        };
    }

    fn follow_scroll(&mut self, follow: Vec2) {
        let desired = self.desired_scroll(follow);
        self.scroll = self.scroll + (desired - self.scroll) * self.settings.smoothing;
    }

    /// Advance by `dt` seconds, following `follow` (usually the player center)
    pub fn update(&mut self, dt: f32, follow: Vec2) {
        let step = if self.transitions_paused { 0.0 } else { dt };
        let s = &self.settings;
        let base = self.target_zoom;
        let peak = self.max_zoom();
        let mut follow_scroll = true;
        let mut cues = Vec::new();

        self.mode = match self.mode {
            CameraMode::Follow => {
                let want = if self.manual_override {
                    s.manual_zoom_out
                } else {
                    self.target_zoom
                };
                self.zoom = lerp(self.zoom, want, s.smoothing);
                CameraMode::Follow
            }
            CameraMode::ScriptedTransition { elapsed } => {
                let elapsed = elapsed + step;
                let t = if s.transition_duration > 0.0 {
                    (elapsed - s.transition_delay) / s.transition_duration
                } else if elapsed >= s.transition_delay {
                    1.0
                } else {
                    0.0
                };
                if t <= 0.0 {
                    self.zoom = MIN_ZOOM;
                    CameraMode::ScriptedTransition { elapsed }
                } else if t < 1.0 {
                    self.zoom = lerp(MIN_ZOOM, base, ease_out_cubic(t));
                    CameraMode::ScriptedTransition { elapsed }
                } else {
                    self.zoom = base;
                    self.transition_complete = true;
                    cues.push(CameraCue::TransitionFinished);
                    CameraMode::Follow
                }
            }
            CameraMode::FocusZoom(mut focus) => {
                focus.elapsed += step;
                match focus.stage {
                    FocusStage::EaseIn => {
                        follow_scroll = false;
                        let t = if s.focus_ease_in > 0.0 { focus.elapsed / s.focus_ease_in } else { 1.0 };
                        let e = ease_out_cubic(t);
                        self.zoom = lerp(focus.from_zoom, peak, e);
                        let centered = self.desired_scroll(focus.target);
                        self.scroll = focus.from_scroll.lerp(centered, e);
                        if t >= 1.0 {
                            self.zoom = peak;
                            if !focus.revealed {
                                focus.revealed = true;
                                cues.push(CameraCue::Reveal);
                            }
                            focus.stage = FocusStage::Hold;
                            focus.elapsed = 0.0;
                        }
                        CameraMode::FocusZoom(focus)
                    }
                    FocusStage::Hold => {
                        follow_scroll = false;
                        self.zoom = peak;
                        self.scroll = self.desired_scroll(focus.target);
                        if focus.elapsed >= s.focus_hold {
                            focus.stage = FocusStage::EaseOut;
                            focus.elapsed = 0.0;
                        }
                        CameraMode::FocusZoom(focus)
                    }
                    FocusStage::EaseOut => {
                        let t = if s.focus_ease_out > 0.0 { focus.elapsed / s.focus_ease_out } else { 1.0 };
                        self.zoom = lerp(peak, focus.return_zoom, ease_out_cubic(t));
                        if t >= 1.0 {
                            self.zoom = focus.return_zoom;
                            cues.push(CameraCue::TransitionFinished);
                            CameraMode::Follow
                        } else {
                            CameraMode::FocusZoom(focus)
                        }
                    }
                }
            }
            CameraMode::DeathReset { elapsed, from_zoom } => {
                let elapsed = elapsed + step;
                let t = if s.reset_duration > 0.0 { elapsed / s.reset_duration } else { 1.0 };
                self.zoom = lerp(from_zoom, base, ease_out_cubic(t));
                if t >= 1.0 {
                    CameraMode::Follow
                } else {
                    CameraMode::DeathReset { elapsed, from_zoom }
                }
            }
        };

        self.zoom = self.clamp_zoom(self.zoom);
        if follow_scroll {
            self.follow_scroll(follow);
        }
        self.clamp_scroll();

        for cue in cues {
            log::debug!("camera cue {:?}", cue);
            self.cues.send(cue);
        }
    }
}
