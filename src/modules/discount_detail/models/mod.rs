pub mod discount_detail_report;

pub use discount_detail_report::DiscountDetailReport;
