pub mod controllers;
pub mod models;
pub mod services;

pub use models::StockWeeksReport;
pub use services::StockWeeksService;
