pub mod date_info_controller;

pub use date_info_controller::configure;
