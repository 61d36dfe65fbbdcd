pub mod channel_list;
pub mod pagination;
pub mod search_bar;
