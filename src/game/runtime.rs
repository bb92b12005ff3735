//! Frame pacing
//!
//! Gameplay runs at a fixed tick rate no matter how fast frames arrive.
//! `FixedStep` turns variable frame deltas into a whole number of ticks;
//! `FpsLimit` optionally caps how fast frames are presented.

/// Most ticks a single frame may run; a long stall drops time instead of
/// spiralling into catch-up.
const MAX_TICKS_PER_FRAME: u32 = 5;

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(tick_rate: f32) -> Self {
        let rate = if tick_rate > 0.0 { tick_rate } else { 60.0 };
        Self { step: 1.0 / rate, accumulator: 0.0 }
    }

    /// Seconds per tick
    pub fn dt(&self) -> f32 {
        self.step
    }

    /// Feed a frame delta, get the number of ticks to run now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// FPS limit setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FpsLimit {
    Fps30,
    #[default]
    Fps60,
    /// As fast as possible
    Unlocked,
}

impl FpsLimit {
    /// Target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }

    /// Cycle to next value
    pub fn next(self) -> Self {
        match self {
            FpsLimit::Fps30 => FpsLimit::Fps60,
            FpsLimit::Fps60 => FpsLimit::Unlocked,
            FpsLimit::Unlocked => FpsLimit::Fps30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FpsLimit::Fps30 => "30",
            FpsLimit::Fps60 => "60",
            FpsLimit::Unlocked => "Unlocked",
        }
    }
}

/// Block until `frame_start + limit` (macroquad clock, seconds)
pub fn wait_for_frame(frame_start: f64, limit: FpsLimit) {
    use macroquad::prelude::get_time;

    let Some(target) = limit.frame_time() else {
        return;
    };

    // Native: sleep for the bulk, then spin for precision
    #[cfg(not(target_arch = "wasm32"))]
    {
        let spin_margin = 0.002;
        while get_time() - frame_start + spin_margin < target {
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        while get_time() - frame_start < target {
            std::hint::spin_loop();
        }
    }
    // WASM: the browser paces frames
    #[cfg(target_arch = "wasm32")]
    {
        let _ = (frame_start, target, get_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_ticks_only() {
        let mut fixed = FixedStep::new(60.0);
        assert_eq!(fixed.advance(1.0 / 120.0), 0);
        assert_eq!(fixed.advance(1.0 / 120.0 + 1e-4), 1);
        assert_eq!(fixed.advance(0.05), 3);
    }

    #[test]
    fn test_stall_is_capped() {
        let mut fixed = FixedStep::new(60.0);
        assert_eq!(fixed.advance(2.0), MAX_TICKS_PER_FRAME);
        assert!(fixed.advance(0.0) == 0);
        assert!(fixed.advance(1.0 / 60.0) <= 2);
    }

    #[test]
    fn test_bad_deltas_ignored() {
        let mut fixed = FixedStep::new(0.0);
        assert!((fixed.dt() - 1.0 / 60.0).abs() < 1e-6);
        assert_eq!(fixed.advance(f32::NAN), 0);
        assert_eq!(fixed.advance(-1.0), 0);
    }

    #[test]
    fn test_fps_limit_cycle() {
        assert_eq!(FpsLimit::default().next(), FpsLimit::Unlocked);
        assert_eq!(FpsLimit::Unlocked.frame_time(), None);
        assert_eq!(FpsLimit::Fps30.label(), "30");
    }
}
