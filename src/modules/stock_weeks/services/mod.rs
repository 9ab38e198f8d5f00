pub mod stock_weeks_service;

pub use stock_weeks_service::StockWeeksService;
