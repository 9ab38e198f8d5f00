pub mod sales_rate_report;

pub use sales_rate_report::{
    PeriodInfo, PeriodRowCounts, PeriodRows, PeriodTotals, SalesRateReport, SalesTotals,
};
