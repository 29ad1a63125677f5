pub mod key_display;
pub mod keyboard_view;
pub mod stats_panel;
