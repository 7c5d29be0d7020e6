pub mod display;
pub mod theme;
pub mod week_view;

pub use display::WeekDisplay;
pub use theme::Theme;
pub use week_view::{WeekLayout, WeekOptions, calculate_layout};
