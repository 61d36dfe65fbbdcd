//! FocusRing — which pane receives keys, cycled with Tab.

use crate::action::ComponentId;
use crate::widgets::status_bar::InputMode;

pub struct FocusRing {
    panes: Vec<ComponentId>,
    current: usize,
}

impl FocusRing {
    /// The first pane starts focused.
    pub fn new(panes: Vec<ComponentId>) -> Self {
        Self { panes, current: 0 }
    }

    pub fn current(&self) -> Option<ComponentId> {
        self.panes.get(self.current).copied()
    }

    pub fn next(&mut self) -> Option<ComponentId> {
        if !self.panes.is_empty() {
            self.current = (self.current + 1) % self.panes.len();
        }
        self.current()
    }

    /// Focus `id`; panes not in the ring are ignored.
    pub fn set(&mut self, id: ComponentId) {
        if let Some(pos) = self.panes.iter().position(|&p| p == id) {
            self.current = pos;
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.current() == Some(id)
    }

    /// Typing goes to the search field while it has focus.
    pub fn input_mode(&self) -> InputMode {
        match self.current() {
            Some(ComponentId::SearchBar) => InputMode::Search,
            _ => InputMode::Browse,
        }
    }
}
