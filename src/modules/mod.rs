pub mod date_info;
pub mod discount_detail;
pub mod health;
pub mod promotion;
pub mod sales_composition;
pub mod sales_rate;
pub mod stock_weeks;
