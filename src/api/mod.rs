pub mod handlers;
pub mod middleware;
pub mod query;
pub mod router;
pub mod types;
