pub mod card_list;
pub mod pane;
pub mod search_input;
pub mod status_bar;
pub mod toast;
