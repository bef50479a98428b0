//! Infrastructure adapters: HTTP gateway, state file storage and telemetry.

pub mod error;
pub mod http;
pub mod storage;
pub mod telemetry;
