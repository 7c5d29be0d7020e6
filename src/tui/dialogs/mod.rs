pub mod help;
pub mod reservation_form;
