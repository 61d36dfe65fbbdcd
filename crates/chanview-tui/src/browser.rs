//! ChannelBrowser — the controller behind the channel screen.
//!
//! Owns the page number and the request tickets, and drives a [`ChannelView`]
//! through the loading → content | error cycle.  It performs no I/O itself:
//! every operation that needs the backend returns a [`Ticket`] which the App
//! turns into a request, and the result comes back through
//! [`ChannelBrowser::complete`].

use chanview_proto::client::ApiError;
use chanview_proto::protocol::{Channel, ChannelQuery};
use tracing::{debug, error};

use crate::ticket::{Ticket, TicketCounter};

pub const LOAD_ERROR: &str = "Error loading channels. Please try again.";
pub const SEARCH_ERROR: &str = "Error searching channels. Please try again.";

/// Queries shorter than this fall back to the paged browse view.
///
/// Length is measured in UTF-16 code units, as browser text fields report
/// it, so "🎵a" (three units) already searches.
pub const SEARCH_MIN_CHARS: usize = 3;

fn query_len(query: &str) -> usize {
    query.encode_utf16().count()
}

/// Everything the controller needs from the screen.
///
/// Implementors must keep exactly one of {loading indicator, channel list,
/// error message} visible: `show_loading` hides whatever was shown, and
/// `hide_loading` reveals the last list or error.
pub trait ChannelView {
    fn show_loading(&mut self);
    fn hide_loading(&mut self);
    /// Replace the rendered cards, keeping backend order.
    fn render_channels(&mut self, channels: &[Channel]);
    /// Show "Page N" and disable "previous" on the first page.
    fn render_pagination(&mut self, page: u32);
    /// Replace the rendered cards with `message`.
    fn show_error(&mut self, message: &str);
}

/// Current page of the browse view.  Never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: u32,
}

impl PageState {
    pub fn new(page: u32) -> Self {
        Self {
            current_page: page.max(1),
        }
    }

    pub fn current(self) -> u32 {
        self.current_page
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Outcome of feeding a response back into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Rendered,
    Failed,
    /// A newer request was issued after this one; the response was dropped.
    Superseded,
}

pub struct ChannelBrowser<V: ChannelView> {
    view: V,
    page: PageState,
    tickets: TicketCounter,
    /// Active search, if the screen is showing search results.
    search: Option<String>,
}

impl<V: ChannelView> ChannelBrowser<V> {
    pub fn new(view: V, first_page: u32) -> Self {
        Self {
            view,
            page: PageState::new(first_page),
            tickets: TicketCounter::new(),
            search: None,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn current_page(&self) -> u32 {
        self.page.current()
    }

    pub fn active_search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Start loading `page` of the browse view.
    pub fn load_channels(&mut self, page: u32) -> Ticket {
        self.search = None;
        self.view.show_loading();
        self.tickets.issue(ChannelQuery::Page(page.max(1)))
    }

    /// Start a name search.  Callers guarantee `query` is long enough.
    pub fn search_channels(&mut self, query: &str) -> Ticket {
        self.search = Some(query.to_string());
        self.view.show_loading();
        self.tickets.issue(ChannelQuery::Search(query.to_string()))
    }

    /// React to an edit of the search field.
    pub fn input_changed(&mut self, query: &str) -> Ticket {
        if query_len(query) >= SEARCH_MIN_CHARS {
            self.search_channels(query)
        } else {
            self.load_channels(self.page.current())
        }
    }

    /// Jump to `page`.  Pages below 1 are ignored.
    pub fn change_page(&mut self, page: i64) -> Option<Ticket> {
        if page < 1 {
            return None;
        }
        let page = u32::try_from(page).unwrap_or(u32::MAX);
        self.page = PageState::new(page);
        Some(self.load_channels(page))
    }

    pub fn next_page(&mut self) -> Option<Ticket> {
        self.change_page(i64::from(self.page.current()) + 1)
    }

    pub fn prev_page(&mut self) -> Option<Ticket> {
        self.change_page(i64::from(self.page.current()) - 1)
    }

    /// Re-issue whatever the screen is currently showing.
    pub fn reload(&mut self) -> Ticket {
        match self.search.clone() {
            Some(query) => self.search_channels(&query),
            None => self.load_channels(self.page.current()),
        }
    }

    /// Feed a finished request back in.
    pub fn complete(
        &mut self,
        ticket: &Ticket,
        result: Result<Vec<Channel>, ApiError>,
    ) -> Completion {
        if !self.tickets.is_current(ticket) {
            debug!(
                "dropping superseded {} response #{} (latest #{})",
                ticket.query.label(),
                ticket.seq(),
                self.tickets.latest()
            );
            return Completion::Superseded;
        }

        match result {
            Ok(channels) => {
                debug!(
                    "{} #{}: {} channels",
                    ticket.query.label(),
                    ticket.seq(),
                    channels.len()
                );
                self.view.render_channels(&channels);
                if let ChannelQuery::Page(page) = ticket.query {
                    self.view.render_pagination(page);
                }
                self.view.hide_loading();
                Completion::Rendered
            }
            Err(e) => {
                let message = match ticket.query {
                    ChannelQuery::Page(_) => LOAD_ERROR,
                    ChannelQuery::Search(_) => SEARCH_ERROR,
                };
                error!("failed to {} channels: {}", ticket.query.label(), e);
                self.view.show_error(message);
                self.view.hide_loading();
                Completion::Failed
            }
        }
    }
}
