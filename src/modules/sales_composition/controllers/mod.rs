pub mod sales_composition_controller;

pub use sales_composition_controller::configure;
