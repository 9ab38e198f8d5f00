pub mod sales_composition_service;

pub use sales_composition_service::SalesCompositionService;
