//! Vertical menus driven by logical actions

use crate::input::{Action, InputFrame};
use super::theme::*;
use super::widgets::Canvas;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseItem {
    Resume,
    Restart,
    Quit,
}

impl PauseItem {
    pub const ALL: [PauseItem; 3] = [PauseItem::Resume, PauseItem::Restart, PauseItem::Quit];

    pub fn label(self) -> &'static str {
        match self {
            PauseItem::Resume => "Resume",
            PauseItem::Restart => "Restart level",
            PauseItem::Quit => "Quit",
        }
    }
}

/// Pause overlay selection
#[derive(Debug, Clone, Default)]
pub struct PauseMenu {
    selected: usize,
}

impl PauseMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> PauseItem {
        PauseItem::ALL[self.selected]
    }

    /// Move the selection (wrapping) and report a confirmed item
    pub fn update(&mut self, input: &InputFrame) -> Option<PauseItem> {
        let n = PauseItem::ALL.len();
        if input.pressed(Action::Up) {
            self.selected = (self.selected + n - 1) % n;
        }
        if input.pressed(Action::Down) {
            self.selected = (self.selected + 1) % n;
        }
        if input.pressed(Action::Advance) || input.pressed(Action::Jump) {
            return Some(self.selected());
        }
        None
    }

    pub fn draw(&self, canvas: &Canvas) {
        canvas.scrim();
        let (_, y) = canvas.panel_centered(220.0, 150.0);
        canvas.text_centered("PAUSED", y + 34.0, FONT_SIZE_HEADER, TEXT_COLOR);
        for (i, item) in PauseItem::ALL.iter().enumerate() {
            let selected = i == self.selected;
            let label = if selected { format!("> {} <", item.label()) } else { item.label().to_string() };
            let color = if selected { ACCENT_COLOR } else { TEXT_DIM };
            canvas.text_centered(&label, y + 70.0 + i as f32 * 24.0, FONT_SIZE_CONTENT, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let mut menu = PauseMenu::new();
        assert_eq!(menu.selected(), PauseItem::Resume);
        menu.update(&InputFrame::default().press(Action::Up));
        assert_eq!(menu.selected(), PauseItem::Quit);
        menu.update(&InputFrame::default().press(Action::Down));
        menu.update(&InputFrame::default().press(Action::Down));
        assert_eq!(menu.selected(), PauseItem::Restart);
    }

    #[test]
    fn test_confirm() {
        let mut menu = PauseMenu::new();
        assert_eq!(menu.update(&InputFrame::default()), None);
        assert_eq!(menu.update(&InputFrame::default().press(Action::Advance)), Some(PauseItem::Resume));
    }
}
