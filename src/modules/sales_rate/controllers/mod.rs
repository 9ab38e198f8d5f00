pub mod sales_rate_controller;

pub use sales_rate_controller::configure;
