pub mod brands;
pub mod calendar;
pub mod error;
pub mod fiscal;

pub use error::{AppError, Result};
