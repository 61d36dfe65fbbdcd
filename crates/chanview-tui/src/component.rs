//! Component trait — the interface every focusable pane implements.
//!
//! - Components own their state and render themselves.
//! - Components produce `Vec<Action>`; they never call the backend or the
//!   desktop directly.
//! - The App dispatches those actions.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

use crate::action::{Action, ComponentId};

pub trait Component {
    fn id(&self) -> ComponentId;

    /// Handle a key event while focused. Returns actions to be dispatched.
    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action>;

    /// Handle a mouse event inside the component's last drawn `area`.
    fn handle_mouse(&mut self, _event: MouseEvent, _area: Rect) -> Vec<Action> {
        Vec::new()
    }

    /// Called each tick (~100ms) for animation.
    fn tick(&mut self) {}

    /// Render the component into `area`.
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool);
}
