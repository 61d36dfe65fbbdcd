//! Pane — the bordered frame around the search bar and the channel list.
//!
//! ```text
//! ┌[2] channels (15)─────────────── LOADING ┐
//! ```

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

use crate::theme::{style_focused_border, style_unfocused_border, C_MUTED, C_NUMBER_HINT, C_PRIMARY};

/// Right-aligned status tag in the top border, e.g. "LOADING" or "ERR".
#[derive(Debug, Clone, Copy)]
pub struct Badge<'a> {
    pub text: &'a str,
    pub color: Color,
}

pub struct Pane<'a> {
    title: &'a str,
    key: Option<char>,
    focused: bool,
    count: Option<usize>,
    badge: Option<Badge<'a>>,
}

impl<'a> Pane<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            key: None,
            focused: false,
            count: None,
            badge: None,
        }
    }

    /// Number hint shown as "[N]" before the title.
    pub fn key(mut self, key: char) -> Self {
        self.key = Some(key);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Item count appended to the title.
    pub fn count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn badge(mut self, badge: Option<Badge<'a>>) -> Self {
        self.badge = badge;
        self
    }

    pub fn block(self) -> Block<'a> {
        let (border_style, title_style) = if self.focused {
            (
                style_focused_border(),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )
        } else {
            (style_unfocused_border(), Style::default().fg(C_MUTED))
        };

        let mut title = Vec::with_capacity(3);
        if let Some(key) = self.key {
            title.push(Span::styled(
                format!("[{}] ", key),
                Style::default().fg(C_NUMBER_HINT),
            ));
        }
        title.push(Span::styled(self.title, title_style));
        if let Some(count) = self.count {
            title.push(Span::styled(
                format!(" ({})", count),
                Style::default().fg(C_MUTED),
            ));
        }

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Line::from(title));
        if let Some(badge) = self.badge {
            block = block.title_top(
                Line::from(Span::styled(
                    format!(" {} ", badge.text),
                    Style::default().fg(badge.color).add_modifier(Modifier::BOLD),
                ))
                .right_aligned(),
            );
        }
        block
    }
}
