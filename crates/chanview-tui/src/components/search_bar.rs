//! SearchBar component — the search field above the channel list.

use ratatui::crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{layout::Rect, Frame};

use crate::{
    action::{Action, ComponentId},
    component::Component,
    theme::C_MODE_SEARCH,
    widgets::{
        pane::{Badge, Pane},
        search_input::{SearchAction, SearchInput},
    },
};

pub struct SearchBar {
    pub input: SearchInput,
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            input: SearchInput::new("channel name (3+ characters)…"),
        }
    }

    pub fn query(&self) -> &str {
        self.input.text()
    }
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SearchBar {
    fn id(&self) -> ComponentId {
        ComponentId::SearchBar
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if !self.input.is_active() {
            self.input.activate();
        }
        match self.input.handle_key(key) {
            SearchAction::Changed(q) => vec![Action::SearchChanged(q)],
            SearchAction::Confirmed => vec![Action::FocusPane(ComponentId::ChannelList)],
            SearchAction::Cancelled => vec![Action::CloseSearch],
            SearchAction::None => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let badge = (!self.query().is_empty()).then_some(Badge {
            text: "SEARCH",
            color: C_MODE_SEARCH,
        });
        let block = Pane::new("search")
            .key('1')
            .focused(focused)
            .badge(badge)
            .block();
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }
        let row = Rect { height: 1, ..inner };
        self.input.active = focused;
        self.input.draw(frame, row);
    }
}
