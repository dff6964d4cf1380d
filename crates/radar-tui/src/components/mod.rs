pub mod favorites_list;
pub mod header;
pub mod help_overlay;
pub mod release_list;
pub mod settings_panel;
pub mod stream_overlay;
