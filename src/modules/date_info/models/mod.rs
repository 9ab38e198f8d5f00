pub mod date_info_response;

pub use date_info_response::{DateInfoResponse, WeekInfo};
