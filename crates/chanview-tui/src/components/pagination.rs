//! Pagination bar — "◀ prev   Page N   next ▶" under the channel list.
//!
//! "prev" is disabled on page 1.  "next" is never disabled: the backend gives
//! no last-page signal, an empty page is simply rendered as empty.

use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Action;
use crate::theme::{style_disabled, style_enabled, C_PRIMARY};

const PREV_LABEL: &str = "◀ prev";
const NEXT_LABEL: &str = "next ▶";

#[derive(Debug, Default)]
pub struct Pagination {
    /// None until the first page has been rendered.
    page: Option<u32>,
}

impl Pagination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = Some(page);
    }

    /// The page-info text, e.g. "Page 3".
    pub fn label(&self) -> String {
        match self.page {
            Some(page) => format!("Page {}", page),
            None => String::new(),
        }
    }

    pub fn prev_enabled(&self) -> bool {
        matches!(self.page, Some(page) if page != 1)
    }

    /// Clicks on the prev/next labels. `area` is the row drawn last frame.
    pub fn handle_mouse(&self, event: MouseEvent, area: Rect) -> Vec<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) || event.row != area.y {
            return vec![];
        }
        let col = event.column.saturating_sub(area.x) as usize;
        let prev_width = PREV_LABEL.chars().count() + 1;
        let next_start = (area.width as usize).saturating_sub(NEXT_LABEL.chars().count() + 1);
        if col < prev_width {
            if self.prev_enabled() {
                return vec![Action::PrevPage];
            }
        } else if col >= next_start {
            return vec![Action::NextPage];
        }
        vec![]
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let prev_style = if self.prev_enabled() {
            style_enabled()
        } else {
            style_disabled()
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(format!(" {}", PREV_LABEL), prev_style))),
            area,
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                self.label(),
                Style::default().fg(C_PRIMARY),
            )))
            .alignment(Alignment::Center),
            area,
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("{} ", NEXT_LABEL),
                style_enabled(),
            )))
            .alignment(Alignment::Right),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn click(column: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_label_and_prev_state() {
        let mut p = Pagination::new();
        assert!(!p.prev_enabled());
        p.set_page(1);
        assert_eq!(p.label(), "Page 1");
        assert!(!p.prev_enabled());
        p.set_page(2);
        assert_eq!(p.label(), "Page 2");
        assert!(p.prev_enabled());
    }

    #[test]
    fn test_clicks_respect_disabled_prev() {
        let area = Rect::new(0, 0, 40, 1);
        let mut p = Pagination::new();
        p.set_page(1);
        assert!(p.handle_mouse(click(2), area).is_empty());
        assert_eq!(p.handle_mouse(click(38), area), vec![Action::NextPage]);

        p.set_page(3);
        assert_eq!(p.handle_mouse(click(2), area), vec![Action::PrevPage]);
        assert!(p.handle_mouse(click(20), area).is_empty());
    }
}
