//! Status bar — bottom line with input mode, backend, and keybindings.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_MODE_BROWSE, C_MODE_SEARCH, C_MUTED, C_SECONDARY, C_SEPARATOR};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Browse,
    Search,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Browse => "BROWSE",
            Self::Search => "SEARCH",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Browse => C_MODE_BROWSE,
            Self::Search => C_MODE_SEARCH,
        }
    }

    fn keys(self) -> &'static str {
        match self {
            Self::Browse => {
                " ↑↓/jk select  ←→/hl page  y copy  o player  b browser  r reload  / search  Tab focus  q quit"
            }
            Self::Search => " type to search  Enter keep  Esc clear/close  Tab channels",
        }
    }
}

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, backend: &str) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default()
                .fg(mode.color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(backend.to_string(), Style::default().fg(C_SECONDARY)),
        Span::raw(" "),
        Span::styled(mode.keys(), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
