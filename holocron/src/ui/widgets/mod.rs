//! TUI widgets for the browser

pub mod detail;
pub mod input;
pub mod list;
pub mod nav_bar;
pub mod status_bar;

pub use detail::DetailWidget;
pub use input::InputWidget;
pub use list::ListWidget;
pub use nav_bar::NavBarWidget;
pub use status_bar::StatusBarWidget;
