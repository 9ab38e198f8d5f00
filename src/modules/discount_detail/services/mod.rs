pub mod discount_detail_service;

pub use discount_detail_service::DiscountDetailService;
