pub mod card;
pub mod hints;
pub mod result_panel;
pub mod tabs;
