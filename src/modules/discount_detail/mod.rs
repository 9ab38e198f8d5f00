pub mod controllers;
pub mod models;
pub mod services;

pub use models::DiscountDetailReport;
pub use services::DiscountDetailService;
