pub mod classify;
pub mod date;
pub mod filter;
pub mod query;
pub mod types;
