//! Invocation context passed to handler functions.
//!
//! A [`Context`] carries per-invocation metadata stamped by the control
//! plane: the invocation id and an optional absolute deadline. A base
//! context can be configured once via [`Options::context`]; the adapter
//! overlays per-invocation fields on top of it before each handler call.
//!
//! Deadline propagation is cooperative. The core enforces no timeouts of
//! its own; handlers that care should consult
//! [`remaining_time`](Context::remaining_time).
//!
//! [`Options::context`]: crate::Options::context

use std::time::{Duration, SystemTime};

/// Per-invocation context handed to handler functions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    /// Invocation id assigned by the control plane (empty if unset).
    invocation_id: String,
    /// Absolute deadline for this invocation, if the control plane set one.
    deadline: Option<SystemTime>,
}

impl Context {
    /// Create an empty background context.
    pub fn background() -> Self {
        Self::default()
    }

    /// Set the invocation id.
    pub fn with_invocation_id(mut self, id: impl Into<String>) -> Self {
        self.invocation_id = id.into();
        self
    }

    /// Set the absolute deadline for this invocation.
    pub fn with_deadline(mut self, deadline: SystemTime) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// The invocation id assigned by the control plane (empty if unset).
    #[inline]
    pub fn invocation_id(&self) -> &str {
        &self.invocation_id
    }

    /// The absolute deadline, if one was set.
    #[inline]
    pub fn deadline(&self) -> Option<SystemTime> {
        self.deadline
    }

    /// Time remaining until the deadline.
    ///
    /// Returns `None` if no deadline is set or it has already passed.
    pub fn remaining_time(&self) -> Option<Duration> {
        self.deadline
            .and_then(|deadline| deadline.duration_since(SystemTime::now()).ok())
    }

    /// Overlay per-invocation fields on a configured base context.
    ///
    /// Fields set on `invocation` win; unset fields fall back to `base`.
    pub(crate) fn overlay(base: &Context, invocation: Context) -> Context {
        let mut merged = base.clone();
        if !invocation.invocation_id.is_empty() {
            merged.invocation_id = invocation.invocation_id;
        }
        if invocation.deadline.is_some() {
            merged.deadline = invocation.deadline;
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_is_empty() {
        let ctx = Context::background();
        assert_eq!(ctx.invocation_id(), "");
        assert!(ctx.deadline().is_none());
        assert!(ctx.remaining_time().is_none());
    }

    #[test]
    fn test_builder_setters() {
        let deadline = SystemTime::now() + Duration::from_secs(30);
        let ctx = Context::background()
            .with_invocation_id("req-1")
            .with_deadline(deadline);

        assert_eq!(ctx.invocation_id(), "req-1");
        assert_eq!(ctx.deadline(), Some(deadline));
    }

    #[test]
    fn test_remaining_time_future_deadline() {
        let ctx = Context::background().with_deadline(SystemTime::now() + Duration::from_secs(60));

        let remaining = ctx.remaining_time().unwrap();
        assert!(remaining <= Duration::from_secs(60));
        assert!(remaining > Duration::from_secs(50));
    }

    #[test]
    fn test_remaining_time_past_deadline() {
        let ctx = Context::background().with_deadline(SystemTime::now() - Duration::from_secs(1));
        assert!(ctx.remaining_time().is_none());
    }

    #[test]
    fn test_overlay_prefers_invocation_fields() {
        let deadline = SystemTime::now() + Duration::from_secs(10);
        let base = Context::background().with_invocation_id("base-id");
        let invocation = Context::background()
            .with_invocation_id("req-7")
            .with_deadline(deadline);

        let merged = Context::overlay(&base, invocation);
        assert_eq!(merged.invocation_id(), "req-7");
        assert_eq!(merged.deadline(), Some(deadline));
    }

    #[test]
    fn test_overlay_falls_back_to_base() {
        let deadline = SystemTime::now() + Duration::from_secs(10);
        let base = Context::background()
            .with_invocation_id("base-id")
            .with_deadline(deadline);

        let merged = Context::overlay(&base, Context::background());
        assert_eq!(merged.invocation_id(), "base-id");
        assert_eq!(merged.deadline(), Some(deadline));
    }
}
