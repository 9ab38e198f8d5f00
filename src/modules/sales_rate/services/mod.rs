pub mod sales_rate_service;

pub use sales_rate_service::SalesRateService;
