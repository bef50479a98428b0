//! Application layer: the page model and the handlers that drive it.

pub mod app;
pub mod dashboard;
pub mod error;
pub mod gateway;
pub mod page;
pub mod posts;
pub mod session;
pub mod toast;
