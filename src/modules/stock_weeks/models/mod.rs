pub mod stock_weeks_report;

pub use stock_weeks_report::{StockWeeksReport, YearRowCounts, YearRows};
