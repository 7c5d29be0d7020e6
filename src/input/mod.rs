pub mod form_mode;
pub mod normal_mode;

pub use normal_mode::Action;
