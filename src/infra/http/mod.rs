//! HTTP adapter for the announcement backend.

mod gateway;

pub use gateway::HttpGateway;
