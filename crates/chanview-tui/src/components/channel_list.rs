//! ChannelList component — the card list in the middle of the screen.
//!
//! Shows exactly one of: the loading indicator, the error message, or the
//! cards from the last successful fetch.  Each card is three rows: name with
//! group/status, the now-playing line, and the action row.

use std::time::Instant;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use chanview_proto::protocol::Channel;

use crate::{
    action::{Action, ComponentId},
    component::Component,
    theme::{
        C_ACTION_KEY, C_ERROR, C_GROUP, C_LOADING, C_MUTED, C_NOW_PLAYING, C_ONLINE, C_PRIMARY,
        C_SECONDARY, C_SELECTION_BG,
    },
    widgets::{
        card_list::CardList,
        pane::{Badge, Pane},
    },
};

/// Rows per card.
pub const CARD_HEIGHT: usize = 3;

const SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// What the list area shows when it is not loading.
#[derive(Debug, Clone, PartialEq)]
enum Body {
    Cards,
    Error(String),
}

pub struct ChannelList {
    cards: CardList<Channel>,
    body: Body,
    loading: bool,
    spinner_frame: usize,
    /// Track last click (card index, time) for double-click detection.
    last_click: Option<(usize, Instant)>,
}

impl ChannelList {
    pub fn new() -> Self {
        Self {
            cards: CardList::new(),
            body: Body::Cards,
            loading: false,
            spinner_frame: 0,
            last_click: None,
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_channels(&mut self, channels: &[Channel]) {
        self.cards.set_items(channels.to_vec());
        self.body = Body::Cards;
    }

    pub fn set_error(&mut self, message: &str) {
        self.cards.clear();
        self.body = Body::Error(message.to_string());
    }

    pub fn channels(&self) -> &[Channel] {
        self.cards.items()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.body {
            Body::Error(message) => Some(message),
            Body::Cards => None,
        }
    }

    /// The card the action keys apply to.  None while loading.
    pub fn selected_channel(&self) -> Option<&Channel> {
        if self.loading {
            return None;
        }
        self.cards.selected_item()
    }

    fn card_actions(&self, key: KeyCode) -> Vec<Action> {
        let Some(channel) = self.selected_channel() else {
            return vec![];
        };
        let url = channel.url.clone();
        match key {
            KeyCode::Char('y') => vec![Action::CopyStream(url)],
            KeyCode::Char('o') | KeyCode::Enter => vec![Action::OpenStream(url)],
            KeyCode::Char('b') => vec![Action::OpenInBrowser(url)],
            _ => vec![],
        }
    }

    fn render_card<'a>(&self, channel: &'a Channel, is_selected: bool, focused: bool) -> ListItem<'a> {
        let name_style = if is_selected {
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_SECONDARY)
        };
        let marker = if is_selected && focused { "▸ " } else { "  " };

        let mut header = vec![
            Span::styled(marker, Style::default().fg(C_ACTION_KEY)),
            Span::styled(channel.name.as_str(), name_style),
        ];
        if !channel.group_title.is_empty() {
            header.push(Span::styled(" · ", Style::default().fg(C_MUTED)));
            header.push(Span::styled(
                channel.group_title.as_str(),
                Style::default().fg(C_GROUP),
            ));
        }
        if !channel.status.is_empty() {
            let color = if channel.is_online() { C_ONLINE } else { C_MUTED };
            header.push(Span::styled("  ● ", Style::default().fg(color)));
            header.push(Span::styled(channel.status.as_str(), Style::default().fg(color)));
        }

        let now_playing = Line::from(vec![
            Span::raw("    "),
            Span::styled(
                channel.playing_now.as_str(),
                Style::default().fg(C_NOW_PLAYING),
            ),
        ]);

        let key_style = if is_selected {
            Style::default().fg(C_ACTION_KEY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(C_MUTED)
        };
        let label_style = Style::default().fg(C_MUTED);
        let actions = Line::from(vec![
            Span::raw("    "),
            Span::styled("[y]", key_style),
            Span::styled(" copy  ", label_style),
            Span::styled("[o]", key_style),
            Span::styled(" open  ", label_style),
            Span::styled("[b]", key_style),
            Span::styled(" browser", label_style),
        ]);

        let bg = if is_selected {
            Style::default().bg(C_SELECTION_BG)
        } else {
            Style::default()
        };
        ListItem::new(Text::from(vec![Line::from(header), now_playing, actions])).style(bg)
    }
}

impl Default for ChannelList {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ChannelList {
    fn id(&self) -> ComponentId {
        ComponentId::ChannelList
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.cards.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.cards.select_down(step),
            KeyCode::PageUp => self.cards.select_up(5),
            KeyCode::PageDown => self.cards.select_down(5),
            KeyCode::Home | KeyCode::Char('g') => self.cards.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.cards.select_last(),

            KeyCode::Left | KeyCode::Char('h') => return vec![Action::PrevPage],
            KeyCode::Right | KeyCode::Char('l') => return vec![Action::NextPage],
            KeyCode::Char('r') => return vec![Action::Reload],
            KeyCode::Char('/') => return vec![Action::OpenSearch],

            code @ (KeyCode::Char('y')
            | KeyCode::Char('o')
            | KeyCode::Char('b')
            | KeyCode::Enter) => return self.card_actions(code),
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.cards.select_up(1),
            MouseEventKind::ScrollDown => self.cards.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                // Clicks on the border pick nothing.
                let inner = Block::default().borders(Borders::ALL).inner(area);
                if !inner.contains(Position::new(event.column, event.row)) {
                    return vec![];
                }
                let rel_row = (event.row - inner.y) as usize;
                if self.loading || !self.cards.handle_click(rel_row, CARD_HEIGHT) {
                    return vec![];
                }
                let idx = self.cards.selected_index();
                let is_double = matches!(
                    (self.last_click, idx),
                    (Some((prev, t)), Some(cur)) if prev == cur && t.elapsed().as_millis() < 400
                );
                if is_double {
                    // Double-click: hand the stream to the player
                    self.last_click = None;
                    return self.card_actions(KeyCode::Enter);
                }
                self.last_click = idx.map(|i| (i, Instant::now()));
            }
            _ => {}
        }
        vec![]
    }

    fn tick(&mut self) {
        if self.loading {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let badge = if self.loading {
            Some(Badge {
                text: "LOADING",
                color: C_LOADING,
            })
        } else if self.error().is_some() {
            Some(Badge {
                text: "ERR",
                color: C_ERROR,
            })
        } else {
            None
        };
        let mut pane = Pane::new("channels").key('2').focused(focused).badge(badge);
        if !self.loading && self.error().is_none() {
            pane = pane.count(self.cards.items().len());
        }
        let block = pane.block();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.loading {
            let line = Line::from(vec![
                Span::styled(
                    format!("  {} ", SPINNER_FRAMES[self.spinner_frame]),
                    Style::default().fg(C_LOADING),
                ),
                Span::styled("loading channels…", Style::default().fg(C_MUTED)),
            ]);
            frame.render_widget(Paragraph::new(line), inner);
            return;
        }

        if let Body::Error(message) = &self.body {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("  {}", message),
                    Style::default().fg(C_ERROR),
                ))
                .wrap(Wrap { trim: false }),
                inner,
            );
            return;
        }

        if self.cards.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  no channels", Style::default().fg(C_MUTED))),
                inner,
            );
            return;
        }

        let height = inner.height as usize;
        self.cards.ensure_visible(height, CARD_HEIGHT);
        let selected = self.cards.selected_index();
        let items: Vec<ListItem> = self
            .cards
            .visible_items(height, CARD_HEIGHT)
            .into_iter()
            .map(|(idx, channel)| self.render_card(channel, Some(idx) == selected, focused))
            .collect();
        frame.render_widget(List::new(items), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn jazz() -> Channel {
        Channel::new("Jazz FM", "Miles Davis - So What", "http://jazz.example/stream")
    }

    fn screen_text(list: &mut ChannelList, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                list.draw(f, area, true);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_jazz_card_renders_and_copies_its_url() {
        let mut list = ChannelList::new();
        list.set_channels(&[jazz()]);

        let text = screen_text(&mut list, 60, 8);
        assert!(text.contains("Jazz FM"));
        assert!(text.contains("Miles Davis - So What"));
        assert!(text.contains("[y] copy"));

        assert_eq!(
            list.handle_key(key(KeyCode::Char('y'))),
            vec![Action::CopyStream("http://jazz.example/stream".to_string())]
        );
        assert_eq!(
            list.handle_key(key(KeyCode::Char('o'))),
            vec![Action::OpenStream("http://jazz.example/stream".to_string())]
        );
        assert_eq!(
            list.handle_key(key(KeyCode::Char('b'))),
            vec![Action::OpenInBrowser("http://jazz.example/stream".to_string())]
        );
    }

    #[test]
    fn test_actions_bind_to_selected_card() {
        let mut list = ChannelList::new();
        list.set_channels(&[
            Channel::new("One", "", "http://one"),
            Channel::new("Two", "", "http://two"),
        ]);
        list.handle_key(key(KeyCode::Char('j')));
        assert_eq!(
            list.handle_key(key(KeyCode::Char('y'))),
            vec![Action::CopyStream("http://two".to_string())]
        );
    }

    #[test]
    fn test_cards_keep_backend_order() {
        let mut list = ChannelList::new();
        list.set_channels(&[
            Channel::new("Zulu Radio", "", "http://z"),
            Channel::new("Alpha Radio", "", "http://a"),
        ]);
        let text = screen_text(&mut list, 40, 10);
        let zulu = text.find("Zulu Radio").unwrap();
        let alpha = text.find("Alpha Radio").unwrap();
        assert!(zulu < alpha);
    }

    #[test]
    fn test_loading_hides_cards_and_actions() {
        let mut list = ChannelList::new();
        list.set_channels(&[jazz()]);
        list.set_loading(true);

        let text = screen_text(&mut list, 60, 8);
        assert!(text.contains("loading channels"));
        assert!(!text.contains("Jazz FM"));
        assert!(list.handle_key(key(KeyCode::Char('y'))).is_empty());
    }

    #[test]
    fn test_error_replaces_cards() {
        let mut list = ChannelList::new();
        list.set_channels(&[jazz()]);
        list.set_error("Error loading channels. Please try again.");

        let text = screen_text(&mut list, 60, 8);
        assert!(text.contains("Error loading channels. Please try again."));
        assert!(!text.contains("Jazz FM"));
        assert!(list.selected_channel().is_none());
    }

    fn left_click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_border_clicks_do_not_select() {
        let area = Rect::new(0, 5, 40, 10);
        let mut list = ChannelList::new();
        list.set_channels(&[
            Channel::new("One", "", "http://one"),
            Channel::new("Two", "", "http://two"),
        ]);
        list.handle_key(key(KeyCode::Char('j')));

        for (col, row) in [(10, 5), (10, 14), (0, 7)] {
            list.handle_mouse(left_click(col, row), area);
            assert!(list.handle_mouse(left_click(col, row), area).is_empty());
            assert_eq!(list.selected_channel().map(|c| c.name.as_str()), Some("Two"));
        }

        // First row inside the border is the first card.
        list.handle_mouse(left_click(10, 6), area);
        assert_eq!(list.selected_channel().map(|c| c.name.as_str()), Some("One"));
    }

    #[test]
    fn test_paging_keys() {
        let mut list = ChannelList::new();
        assert_eq!(list.handle_key(key(KeyCode::Left)), vec![Action::PrevPage]);
        assert_eq!(list.handle_key(key(KeyCode::Char('l'))), vec![Action::NextPage]);
        assert_eq!(list.handle_key(key(KeyCode::Char('/'))), vec![Action::OpenSearch]);
    }
}
