//! Transient notifications raised by handlers.

use std::time::{Duration, Instant};

use serde::Serialize;
use uuid::Uuid;

pub const TOAST_TTL_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub id: String,
    pub kind: ToastKind,
    pub text: String,
    pub ttl_ms: u64,
    #[serde(skip)]
    raised_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= Duration::from_millis(self.ttl_ms)
    }
}

/// Toasts dismiss themselves once their TTL has elapsed.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ToastStack {
    items: Vec<Toast>,
}

impl ToastStack {
    pub fn success(&mut self, text: impl Into<String>) {
        self.push(ToastKind::Success, text.into(), Instant::now());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(ToastKind::Error, text.into(), Instant::now());
    }

    fn push(&mut self, kind: ToastKind, text: String, raised_at: Instant) {
        self.items.push(Toast {
            id: Uuid::new_v4().to_string(),
            kind,
            text,
            ttl_ms: TOAST_TTL_MS,
            raised_at,
        });
    }

    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Toast> {
        self.items.iter().filter(move |toast| !toast.is_expired(now))
    }

    pub fn dismiss_expired(&mut self, now: Instant) {
        self.items.retain(|toast| !toast.is_expired(now));
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.items.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
