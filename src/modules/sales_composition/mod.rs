pub mod controllers;
pub mod models;
pub mod services;

pub use models::SalesCompositionReport;
pub use services::SalesCompositionService;
