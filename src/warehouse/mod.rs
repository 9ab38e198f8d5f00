pub mod client;
pub mod snowflake;

pub use client::{Row, WarehouseClient};
pub use snowflake::SnowflakeClient;
