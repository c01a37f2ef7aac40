pub mod query;
pub mod responses;
