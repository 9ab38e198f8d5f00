pub mod discount_detail_controller;

pub use discount_detail_controller::configure;
