//! ChannelScreen — the ratatui side of [`ChannelView`].
//!
//! Holds the three on-screen pieces the controller drives: the search bar,
//! the channel list and the pagination row.

use chanview_proto::protocol::Channel;

use crate::browser::ChannelView;
use crate::components::{channel_list::ChannelList, pagination::Pagination, search_bar::SearchBar};

#[derive(Default)]
pub struct ChannelScreen {
    pub search_bar: SearchBar,
    pub channel_list: ChannelList,
    pub pagination: Pagination,
}

impl ChannelScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChannelView for ChannelScreen {
    fn show_loading(&mut self) {
        self.channel_list.set_loading(true);
    }

    fn hide_loading(&mut self) {
        self.channel_list.set_loading(false);
    }

    fn render_channels(&mut self, channels: &[Channel]) {
        self.channel_list.set_channels(channels);
    }

    fn render_pagination(&mut self, page: u32) {
        self.pagination.set_page(page);
    }

    fn show_error(&mut self, message: &str) {
        self.channel_list.set_error(message);
    }
}
