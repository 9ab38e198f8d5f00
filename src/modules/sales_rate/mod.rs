pub mod controllers;
pub mod models;
pub mod services;

pub use models::SalesRateReport;
pub use services::SalesRateService;
