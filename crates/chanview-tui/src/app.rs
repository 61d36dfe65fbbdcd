//! App — component-based event loop for the channel browser.
//!
//! Architecture:
//! - `App` owns the [`ChannelBrowser`] (and through it the screen components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks.
//! - The event loop draws each frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Controller operations hand back tickets; the loop turns each one into a
//!   spawned fetch whose result comes back as `AppMessage::Fetched`.

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use chanview_proto::client::{ApiError, ChannelClient};
use chanview_proto::protocol::Channel;

use crate::{
    action::{Action, ComponentId},
    browser::ChannelBrowser,
    component::Component,
    desktop::{self, Desktop},
    focus::FocusRing,
    screen::ChannelScreen,
    ticket::Ticket,
    widgets::{
        status_bar::{self, InputMode},
        toast::ToastManager,
    },
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    /// A backend request finished.
    Fetched(Ticket, Result<Vec<Channel>, ApiError>),
}

// ── Pane area tracking ────────────────────────────────────────────────────────

/// Last-drawn rects, used by `handle_mouse` for hit-testing.
#[derive(Default, Clone, Copy)]
struct PaneAreas {
    search_bar: Rect,
    channel_list: Rect,
    pagination: Rect,
}

pub struct App<D: Desktop> {
    browser: ChannelBrowser<ChannelScreen>,
    client: ChannelClient,
    desktop: D,
    player_scheme: String,
    /// Shown in the keys bar so the operator knows which backend is live.
    backend_label: String,
    focus: FocusRing,
    toast: ToastManager,
    pane_areas: PaneAreas,
    /// Tickets issued since the last loop iteration, not yet fetched.
    pending: Vec<Ticket>,
    should_quit: bool,
}

impl<D: Desktop> App<D> {
    pub fn new(
        client: ChannelClient,
        desktop: D,
        backend_label: impl Into<String>,
        player_scheme: impl Into<String>,
        first_page: u32,
    ) -> Self {
        let mut browser = ChannelBrowser::new(ChannelScreen::new(), first_page);
        let first = browser.load_channels(browser.current_page());
        Self {
            browser,
            client,
            desktop,
            player_scheme: player_scheme.into(),
            backend_label: backend_label.into(),
            focus: FocusRing::new(vec![ComponentId::ChannelList, ComponentId::SearchBar]),
            toast: ToastManager::new(),
            pane_areas: PaneAreas::default(),
            pending: vec![first],
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let result = self.event_loop(&mut terminal).await;

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        // Polls so the thread notices when the loop has gone away.
        tokio::task::spawn_blocking(move || {
            while !event_tx.is_closed() {
                match event::poll(Duration::from_millis(250)) {
                    Ok(true) => match event::read() {
                        Ok(ev) => {
                            if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    },
                    Ok(false) => {}
                    Err(_) => break,
                }
            }
        });

        // Toast expiry + spinner animation.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!("browsing {}", self.backend_label);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            self.spawn_pending(&tx);

            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
                needs_redraw = false;
            }

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg);
                    // Drain whatever else is queued before the next draw.
                    while let Ok(next) = rx.try_recv() {
                        needs_redraw |= self.handle_message(next);
                    }
                }

                _ = ui_tick.tick() => {
                    needs_redraw = self.on_ui_tick();
                }
            }
        }
        Ok(())
    }

    /// Expire toasts and advance the spinner. Returns true when the frame
    /// changed, including the tick on which the last toast disappears.
    fn on_ui_tick(&mut self) -> bool {
        let had_toasts = !self.toast.is_empty();
        self.toast.tick();
        let list = &mut self.browser.view_mut().channel_list;
        list.tick();
        had_toasts || list.is_loading()
    }

    /// Start a fetch for every ticket issued since the last call.
    fn spawn_pending(&mut self, tx: &mpsc::Sender<AppMessage>) {
        for ticket in self.pending.drain(..) {
            debug!(
                "spawning {} #{}: {:?}",
                ticket.query.label(),
                ticket.seq(),
                ticket.query
            );
            let client = self.client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = client.fetch(&ticket.query).await;
                let _ = tx.send(AppMessage::Fetched(ticket, result)).await;
            });
        }
    }

    /// Returns true when the screen needs a redraw.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind == KeyEventKind::Release {
                    return false;
                }
                for action in self.handle_key(key) {
                    self.dispatch(action);
                }
                true
            }
            AppMessage::Event(Event::Mouse(event)) => {
                let actions = self.handle_mouse(event);
                let redraw = !matches!(event.kind, MouseEventKind::Moved);
                for action in actions {
                    self.dispatch(action);
                }
                redraw
            }
            AppMessage::Event(Event::Resize(..)) => true,
            AppMessage::Event(_) => false,
            AppMessage::Fetched(ticket, result) => {
                self.browser.complete(&ticket, result);
                true
            }
        }
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        // Global keys — always active regardless of focus/mode
        match key.code {
            KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => {
                return vec![Action::Quit];
            }
            KeyCode::Char('q') if key.modifiers == KeyModifiers::NONE => {
                if self.focus.input_mode() == InputMode::Browse {
                    return vec![Action::Quit];
                }
            }
            KeyCode::Tab => return vec![Action::FocusNext],
            // Pane number hints
            KeyCode::Char('1') if self.focus.input_mode() == InputMode::Browse => {
                return vec![Action::OpenSearch];
            }
            KeyCode::Char('2') => {
                if self.focus.input_mode() == InputMode::Browse {
                    return vec![Action::FocusPane(ComponentId::ChannelList)];
                }
            }
            _ => {}
        }

        let screen = self.browser.view_mut();
        match self.focus.current() {
            Some(ComponentId::SearchBar) => screen.search_bar.handle_key(key),
            Some(ComponentId::ChannelList) => screen.channel_list.handle_key(key),
            None => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        fn hit(r: Rect, col: u16, row: u16) -> bool {
            r.width > 0
                && r.height > 0
                && col >= r.x
                && col < r.x + r.width
                && row >= r.y
                && row < r.y + r.height
        }

        let areas = self.pane_areas;
        let (col, row) = (event.column, event.row);
        let screen = self.browser.view_mut();

        if hit(areas.pagination, col, row) {
            return screen.pagination.handle_mouse(event, areas.pagination);
        }
        if hit(areas.channel_list, col, row) {
            let mut actions = screen.channel_list.handle_mouse(event, areas.channel_list);
            if matches!(event.kind, MouseEventKind::Down(_))
                && !self.focus.is_focused(ComponentId::ChannelList)
            {
                actions.insert(0, Action::FocusPane(ComponentId::ChannelList));
            }
            return actions;
        }
        if hit(areas.search_bar, col, row)
            && matches!(event.kind, MouseEventKind::Down(_))
            && !self.focus.is_focused(ComponentId::SearchBar)
        {
            return vec![Action::OpenSearch];
        }
        vec![]
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        debug!("dispatch: {:?}", action);
        match action {
            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.focus.next();
                self.sync_search_input();
            }
            Action::FocusPane(id) => {
                self.focus.set(id);
                self.sync_search_input();
            }

            // ── Search ────────────────────────────────────────────────────────
            Action::OpenSearch => {
                self.focus.set(ComponentId::SearchBar);
                self.sync_search_input();
            }
            Action::CloseSearch => {
                self.focus.set(ComponentId::ChannelList);
                self.sync_search_input();
            }
            Action::SearchChanged(query) => {
                let ticket = self.browser.input_changed(&query);
                self.pending.push(ticket);
            }

            // ── Pagination ────────────────────────────────────────────────────
            Action::PrevPage => {
                if let Some(ticket) = self.browser.prev_page() {
                    self.pending.push(ticket);
                }
            }
            Action::NextPage => {
                if let Some(ticket) = self.browser.next_page() {
                    self.pending.push(ticket);
                }
            }
            Action::Reload => {
                info!(
                    "reloading {}",
                    self.browser.active_search().unwrap_or("current page")
                );
                let ticket = self.browser.reload();
                self.pending.push(ticket);
            }

            // ── Card actions ──────────────────────────────────────────────────
            Action::CopyStream(url) => match desktop::copy_stream(&mut self.desktop, &url) {
                Ok(notice) => self.toast.success(notice),
                Err(e) => {
                    warn!("clipboard error: {}", e);
                    self.toast.error(format!("clipboard error: {}", e));
                }
            },
            Action::OpenStream(url) => {
                match desktop::open_stream(&mut self.desktop, &self.player_scheme, &url) {
                    Ok(notice) => self.toast.info(notice),
                    Err(e) => {
                        warn!("failed to open {} in player: {}", url, e);
                        self.toast.error(format!("player error: {}", e));
                    }
                }
            }
            Action::OpenInBrowser(url) => match desktop::open_in_browser(&mut self.desktop, &url) {
                Ok(notice) => self.toast.info(notice),
                Err(e) => {
                    warn!("failed to open {} in browser: {}", url, e);
                    self.toast.error(format!("browser error: {}", e));
                }
            },

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => {
                info!("quit requested");
                self.should_quit = true;
            }
        }
    }

    /// The search field shows a cursor only while it has focus.
    fn sync_search_input(&mut self) {
        let input = &mut self.browser.view_mut().search_bar.input;
        match self.focus.input_mode() {
            InputMode::Search => input.activate(),
            InputMode::Browse => input.deactivate(),
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        use crate::theme::C_BG;
        use ratatui::widgets::Block;
        let area = frame.area();

        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(C_BG)),
            area,
        );

        // ── Layout: search | channels | separator | pagination | keys ────────
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let screen = self.browser.view_mut();
        let search_focused = self.focus.is_focused(screen.search_bar.id());
        let list_focused = self.focus.is_focused(screen.channel_list.id());

        screen.search_bar.draw(frame, rows[0], search_focused);
        screen.channel_list.draw(frame, rows[1], list_focused);
        status_bar::draw_separator(frame, rows[2]);
        screen.pagination.draw(frame, rows[3]);
        status_bar::draw_keys_bar(frame, rows[4], self.focus.input_mode(), &self.backend_label);

        self.pane_areas = PaneAreas {
            search_bar: rows[0],
            channel_list: rows[1],
            pagination: rows[3],
        };

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::LOAD_ERROR;
    use crate::desktop::tests::RecordingDesktop;
    use crate::desktop::COPIED_NOTICE;
    use crate::widgets::toast::Severity;
    use chanview_proto::client::StatusCode;
    use chanview_proto::config::BackendConfig;
    use chanview_proto::protocol::ChannelQuery;
    use ratatui::backend::TestBackend;

    fn app() -> App<RecordingDesktop> {
        let client = ChannelClient::new(&BackendConfig::default()).unwrap();
        App::new(
            client,
            RecordingDesktop::default(),
            "http://127.0.0.1:40006",
            "vlc",
            1,
        )
    }

    fn press(app: &mut App<RecordingDesktop>, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        app.handle_message(AppMessage::Event(Event::Key(key)));
    }

    fn jazz() -> Channel {
        Channel::new("Jazz FM", "Miles Davis - So What", "http://jazz.example/stream")
    }

    /// Complete the newest pending ticket with `result`.
    fn finish(app: &mut App<RecordingDesktop>, result: Result<Vec<Channel>, ApiError>) {
        let ticket = app.pending.pop().unwrap();
        app.pending.clear();
        app.handle_message(AppMessage::Fetched(ticket, result));
    }

    #[test]
    fn test_startup_loads_first_page() {
        let app = app();
        assert_eq!(app.pending.len(), 1);
        assert_eq!(app.pending[0].query, ChannelQuery::Page(1));
        assert!(app.browser.view().channel_list.is_loading());
    }

    #[test]
    fn test_copy_key_writes_clipboard_and_confirms() {
        let mut app = app();
        finish(&mut app, Ok(vec![jazz()]));

        press(&mut app, KeyCode::Char('y'));
        assert_eq!(
            app.desktop.clipboard.as_deref(),
            Some("http://jazz.example/stream")
        );
        assert_eq!(
            app.toast.visible(),
            vec![(Severity::Success, COPIED_NOTICE)]
        );

        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.desktop.opened, vec!["vlc://http://jazz.example/stream"]);
    }

    #[test]
    fn test_clipboard_failure_is_surfaced() {
        let mut app = app();
        app.desktop.fail = true;
        finish(&mut app, Ok(vec![jazz()]));

        press(&mut app, KeyCode::Char('y'));
        let visible = app.toast.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].0, Severity::Error);
    }

    #[test]
    fn test_typing_switches_between_paged_and_search() {
        let mut app = app();
        finish(&mut app, Ok(vec![]));

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.focus.input_mode(), InputMode::Search);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('a'));
        let queries: Vec<_> = app.pending.iter().map(|t| t.query.clone()).collect();
        assert_eq!(queries, vec![ChannelQuery::Page(1), ChannelQuery::Page(1)]);

        press(&mut app, KeyCode::Char('z'));
        assert_eq!(
            app.pending.last().map(|t| t.query.clone()),
            Some(ChannelQuery::Search("jaz".into()))
        );
    }

    #[test]
    fn test_q_quits_only_outside_search() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.browser.view().search_bar.query(), "q");

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_tick_redraws_when_last_toast_expires() {
        let mut app = app();
        finish(&mut app, Ok(vec![jazz()]));
        app.toast.push(COPIED_NOTICE, Severity::Success, Duration::ZERO);

        assert!(app.on_ui_tick());
        assert!(app.toast.is_empty());
        assert!(!app.on_ui_tick());
    }

    #[test]
    fn test_tick_redraws_while_loading() {
        let mut app = app();
        assert!(app.browser.view().channel_list.is_loading());
        assert!(app.on_ui_tick());
    }

    #[test]
    fn test_number_keys_focus_panes() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        assert!(app.focus.is_focused(ComponentId::SearchBar));
        assert_eq!(app.focus.input_mode(), InputMode::Search);

        // Digits are text while searching.
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.browser.view().search_bar.query(), "2");
        assert!(app.focus.is_focused(ComponentId::SearchBar));

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('2'));
        assert!(app.focus.is_focused(ComponentId::ChannelList));
        assert_eq!(app.focus.input_mode(), InputMode::Browse);
    }

    #[test]
    fn test_prev_on_first_page_issues_nothing() {
        let mut app = app();
        finish(&mut app, Ok(vec![]));
        press(&mut app, KeyCode::Left);
        assert!(app.pending.is_empty());
        press(&mut app, KeyCode::Right);
        assert_eq!(app.pending[0].query, ChannelQuery::Page(2));
    }

    #[test]
    fn test_stale_page_does_not_overwrite_search() {
        let mut app = app();
        let stale = app.pending.pop().unwrap();
        press(&mut app, KeyCode::Char('/'));
        for c in "news".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        finish(&mut app, Ok(vec![jazz()]));
        app.handle_message(AppMessage::Fetched(
            stale,
            Err(ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)),
        ));
        let list = &app.browser.view().channel_list;
        assert_eq!(list.channels(), &[jazz()]);
        assert_ne!(list.error(), Some(LOAD_ERROR));
    }

    #[test]
    fn test_full_screen_renders() {
        let mut app = app();
        finish(&mut app, Ok(vec![jazz()]));
        let mut terminal = Terminal::new(TestBackend::new(80, 14)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        assert!(text.contains("Jazz FM"));
        assert!(text.contains("Page 1"));
        assert!(text.contains("BROWSE"));
    }
}
