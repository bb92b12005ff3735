//! In-game HUD and dialogue box

use crate::game::LevelOrchestrator;
use super::theme::*;
use super::widgets::Canvas;

/// `m:ss.hh`
pub fn format_time(seconds: f32) -> String {
    let seconds = seconds.max(0.0);
    let hundredths = (seconds * 100.0).round() as u64;
    let minutes = hundredths / 6000;
    let secs = (hundredths / 100) % 60;
    let frac = hundredths % 100;
    format!("{}:{:02}.{:02}", minutes, secs, frac)
}

/// Text shown in the HUD, gathered from the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub struct HudInfo {
    pub level: String,
    pub collected: String,
    pub time: String,
    /// Fraction of the time budget left, when there is one
    pub time_left: Option<f32>,
    pub health: Option<(u32, u32)>,
    pub run_total: String,
}

impl HudInfo {
    pub fn gather(orch: &LevelOrchestrator) -> Self {
        let level = orch.level();
        let state = &orch.state;
        let time = match level.time_budget {
            Some(budget) => format!("{} / {}", format_time(state.elapsed), format_time(budget)),
            None => format_time(state.elapsed),
        };
        Self {
            level: format!("{}/{}  {}", level.number, orch.level_count(), level.def.name),
            collected: format!("{}/{}", state.collected, level.def.quota),
            time,
            time_left: level.time_budget.map(|b| ((b - state.elapsed) / b).clamp(0.0, 1.0)),
            health: level.health.map(|hp| (hp.current, hp.max)),
            run_total: format_time(state.total_run_seconds + state.elapsed),
        }
    }
}

pub fn draw_hud(canvas: &Canvas, orch: &LevelOrchestrator) {
    let info = HudInfo::gather(orch);
    canvas.fill(0.0, 0.0, canvas.width(), 22.0, PANEL_BG);
    canvas.text(&info.level, 8.0, 15.0, FONT_SIZE_SMALL, TEXT_COLOR);

    let collected_color = if orch.level().portal.open { GOOD_COLOR } else { ACCENT_COLOR };
    canvas.text(&format!("Shards {}", info.collected), 220.0, 15.0, FONT_SIZE_SMALL, collected_color);

    let time_color = match info.time_left {
        Some(left) if left < 0.2 => BAD_COLOR,
        _ => TEXT_COLOR,
    };
    canvas.text(&info.time, 330.0, 15.0, FONT_SIZE_SMALL, time_color);
    canvas.text_right(&format!("Run {}", info.run_total), canvas.width() - 8.0, 15.0, FONT_SIZE_SMALL, TEXT_DIM);

    if let Some((current, max)) = info.health {
        for i in 0..max {
            let color = if i < current { BAD_COLOR } else { TEXT_DIM };
            canvas.fill(8.0 + i as f32 * 12.0, 28.0, 9.0, 9.0, color);
        }
    }
}

/// Intro dialogue box along the bottom of the frame
pub fn draw_dialogue(canvas: &Canvas, speaker: &str, line: &str) {
    let h = 70.0;
    let y = canvas.height() - h - 10.0;
    canvas.panel(20.0, y, canvas.width() - 40.0, h);
    canvas.text(speaker, 32.0, y + 20.0, FONT_SIZE_SMALL, ACCENT_COLOR);
    canvas.text(line, 32.0, y + 42.0, FONT_SIZE_CONTENT, TEXT_COLOR);
    canvas.text_right("Enter", canvas.width() - 32.0, y + h - 10.0, FONT_SIZE_SMALL, TEXT_DIM);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::world::Campaign;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00.00");
        assert_eq!(format_time(59.88), "0:59.88");
        assert_eq!(format_time(61.5), "1:01.50");
        assert_eq!(format_time(-3.0), "0:00.00");
    }

    #[test]
    fn test_gather_fresh_run() {
        let orch = LevelOrchestrator::new(GameConfig::default(), Campaign::builtin());
        let info = HudInfo::gather(&orch);
        let quota = orch.level().def.quota;
        assert_eq!(info.collected, format!("0/{}", quota));
        assert_eq!(info.run_total, "0:00.00");
        assert!(info.level.starts_with("1/"));
        assert_eq!(info.health, None);
    }
}
