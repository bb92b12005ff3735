//! Full-screen overlays: title, game over, run complete, challenge

use crate::challenge::{SequenceChallenge, SequenceStage};
use crate::game::DefeatCause;
use crate::game::DamageSource;
use crate::storage::Leaderboard;
use super::hud::format_time;
use super::text_input::TextInputState;
use super::theme::*;
use super::widgets::Canvas;

pub fn defeat_message(cause: Option<DefeatCause>) -> &'static str {
    match cause {
        Some(DefeatCause::TimeUp) => "Out of time",
        Some(DefeatCause::Hit(DamageSource::Hazard)) => "Caught on the spikes",
        Some(DefeatCause::Hit(DamageSource::Hostile)) => "Caught by a hostile",
        Some(DefeatCause::Hit(DamageSource::FellOut)) => "Fell out of the world",
        None => "Defeated",
    }
}

fn draw_leaderboard(canvas: &Canvas, board: &Leaderboard, x: f32, y: f32, highlight: Option<usize>) {
    canvas.text("FASTEST RUNS", x, y, FONT_SIZE_SMALL, TEXT_DIM);
    if board.entries().is_empty() {
        canvas.text("No runs yet", x, y + 18.0, FONT_SIZE_SMALL, TEXT_DIM);
        return;
    }
    for (i, record) in board.entries().iter().enumerate() {
        let row_y = y + 18.0 + i as f32 * 15.0;
        let color = if Some(i) == highlight { ACCENT_COLOR } else { TEXT_COLOR };
        canvas.text(&format!("{:>2}. {}", i + 1, record.player_name), x, row_y, FONT_SIZE_SMALL, color);
        canvas.text_right(&format_time(record.total_seconds), x + 200.0, row_y, FONT_SIZE_SMALL, color);
    }
}

pub fn draw_title(canvas: &Canvas, board: &Leaderboard, level_count: usize, fps_label: &str) {
    canvas.scrim();
    canvas.text_centered("TILERUNNER", 80.0, FONT_SIZE_TITLE, ACCENT_COLOR);
    canvas.text_centered(&format!("{} levels", level_count), 104.0, FONT_SIZE_SMALL, TEXT_DIM);
    canvas.text_centered("Press Enter to start", 140.0, FONT_SIZE_CONTENT, TEXT_COLOR);
    draw_leaderboard(canvas, board, canvas.width() * 0.5 - 100.0, 180.0, None);
    let footer = format!("Right: frame limit {}    Q: quit", fps_label);
    canvas.text_centered(&footer, canvas.height() - 14.0, FONT_SIZE_SMALL, TEXT_DIM);
}

pub fn draw_game_over(canvas: &Canvas, cause: Option<DefeatCause>, total_seconds: f32) {
    canvas.scrim();
    let (_, y) = canvas.panel_centered(300.0, 130.0);
    canvas.text_centered("GAME OVER", y + 36.0, FONT_SIZE_HEADER, BAD_COLOR);
    canvas.text_centered(defeat_message(cause), y + 62.0, FONT_SIZE_CONTENT, TEXT_COLOR);
    canvas.text_centered(&format!("Run time {}", format_time(total_seconds)), y + 84.0, FONT_SIZE_SMALL, TEXT_DIM);
    canvas.text_centered("R or Space to retry", y + 112.0, FONT_SIZE_SMALL, TEXT_DIM);
}

/// Run complete with the name field still open (`rank` is None) or the
/// board after the record was saved
pub fn draw_run_complete(
    canvas: &Canvas,
    total_seconds: f32,
    name: Option<&TextInputState>,
    board: &Leaderboard,
    rank: Option<usize>,
) {
    canvas.scrim();
    canvas.text_centered("RUN COMPLETE", 64.0, FONT_SIZE_TITLE, GOOD_COLOR);
    canvas.text_centered(&format_time(total_seconds), 96.0, FONT_SIZE_HEADER, TEXT_COLOR);

    match name {
        Some(input) => {
            canvas.text_centered("Enter your name", 136.0, FONT_SIZE_CONTENT, TEXT_DIM);
            let (x, y) = (canvas.width() * 0.5 - 90.0, 148.0);
            canvas.panel(x, y, 180.0, 28.0);
            canvas.text(&input.display(), x + 10.0, y + 20.0, FONT_SIZE_CONTENT, ACCENT_COLOR);
        }
        None => {
            let line = match rank {
                Some(r) => format!("Rank #{}", r + 1),
                None => "Not fast enough for the board".to_string(),
            };
            canvas.text_centered(&line, 136.0, FONT_SIZE_CONTENT, TEXT_COLOR);
            canvas.text_centered("Press Enter", 160.0, FONT_SIZE_SMALL, TEXT_DIM);
        }
    }
    draw_leaderboard(canvas, board, canvas.width() * 0.5 - 100.0, 200.0, rank);
}

pub fn draw_challenge(canvas: &Canvas, challenge: &SequenceChallenge) {
    canvas.scrim();
    let (x, y) = canvas.panel_centered(360.0, 180.0);
    canvas.text_centered(&format!("GATE {}", challenge.level_id()), y + 30.0, FONT_SIZE_HEADER, ACCENT_COLOR);

    let total = challenge.sequence().len();
    match challenge.stage() {
        SequenceStage::Showing { index, .. } => {
            canvas.text_centered("Watch", y + 56.0, FONT_SIZE_SMALL, TEXT_DIM);
            if let Some(dir) = challenge.current_cue() {
                canvas.text_centered(dir.glyph(), y + 110.0, FONT_SIZE_TITLE, TEXT_COLOR);
            }
            canvas.text_centered(&format!("{}/{}", index + 1, total), y + 160.0, FONT_SIZE_SMALL, TEXT_DIM);
        }
        SequenceStage::Input { .. } => {
            canvas.text_centered("Repeat it", y + 56.0, FONT_SIZE_SMALL, TEXT_DIM);
            let slot = 300.0 / total.max(1) as f32;
            for i in 0..total {
                let color = if i < challenge.progress() { GOOD_COLOR } else { TEXT_DIM };
                canvas.fill(x + 30.0 + i as f32 * slot, y + 100.0, slot - 4.0, 10.0, color);
            }
            canvas.text_centered("Esc gives up", y + 160.0, FONT_SIZE_SMALL, TEXT_DIM);
        }
        SequenceStage::Result { passed, .. } => {
            let (text, color) = if passed { ("PASSED", GOOD_COLOR) } else { ("FAILED", BAD_COLOR) };
            canvas.text_centered(text, y + 110.0, FONT_SIZE_TITLE, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defeat_messages_distinct() {
        let causes = [
            Some(DefeatCause::TimeUp),
            Some(DefeatCause::Hit(DamageSource::Hazard)),
            Some(DefeatCause::Hit(DamageSource::Hostile)),
            Some(DefeatCause::Hit(DamageSource::FellOut)),
            None,
        ];
        let mut messages: Vec<&str> = causes.iter().map(|c| defeat_message(*c)).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), causes.len());
    }
}
