// Core types for the Todoist MCP bridge

pub mod rate_limit;
pub mod types;

pub use rate_limit::{BudgetExhausted, RateLimits, RateWindow};
pub use types::*;
