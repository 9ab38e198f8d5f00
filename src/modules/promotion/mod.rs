pub mod controllers;
pub mod models;
pub mod services;

pub use models::PromotionReport;
pub use services::PromotionService;
