pub mod sales_composition_report;

pub use sales_composition_report::{SalesCompositionReport, YearRowCounts, YearRows};
