//! Client-side domain: roles, sessions, posts and the preferences that survive a reload.

pub mod error;
pub mod posts;
pub mod role;
pub mod session;
pub mod theme;
