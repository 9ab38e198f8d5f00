pub mod stock_weeks_controller;

pub use stock_weeks_controller::configure;
