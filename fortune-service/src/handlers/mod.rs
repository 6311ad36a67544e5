//! HTTP handlers for the fortune service.

pub mod app;
pub mod fortune;

pub use app::{health_check, index, metrics, readiness_check};
pub use fortune::create_fortune;
