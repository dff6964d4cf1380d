pub mod pane_chrome;
pub mod release_card;
pub mod scrollable_list;
pub mod status_bar;
pub mod text_input;
pub mod toast;
