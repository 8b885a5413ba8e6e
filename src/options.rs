//! Invocation options - immutable configuration resolved at construction.
//!
//! [`Options`] bundles everything an adapter needs beyond the handler
//! function itself: the base context, JSON output flags, shutdown
//! callbacks, and optional request/response trace hooks. Setters consume
//! and return the value so they chain; scalar setters are last-write-wins,
//! while [`on_shutdown`](Options::on_shutdown) accumulates callbacks in
//! registration order.
//!
//! Once an adapter is built from an `Options` value, the configuration is
//! owned by the adapter and never changes again.
//!
//! # Example
//!
//! ```
//! use faaswire::{Context, Options};
//!
//! let options = Options::new()
//!     .context(Context::background().with_invocation_id("warmup"))
//!     .escape_html(true)
//!     .indent("", "  ")
//!     .on_shutdown(|| eprintln!("worker shutting down"));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::context::Context;

/// Callback run when the shutdown signal fires.
pub type ShutdownCallback = Box<dyn Fn() + Send + 'static>;

/// Trace hook invoked with the context and a JSON view of the value.
pub type TraceFn = Arc<dyn Fn(&Context, &serde_json::Value) + Send + Sync + 'static>;

/// Configuration applied once at adapter construction.
pub struct Options {
    /// Base context; per-invocation fields are overlaid on a clone of it.
    pub(crate) base_context: Context,
    /// Escape `<`, `>` and `&` inside encoded strings.
    pub(crate) escape_html: bool,
    /// Per-line prefix for pretty-printed output.
    pub(crate) indent_prefix: String,
    /// Indent unit for pretty-printed output; empty with an empty prefix
    /// means compact encoding.
    pub(crate) indent: String,
    /// Whether the shutdown-signal listener is registered at construction.
    pub(crate) enable_shutdown: bool,
    /// Callbacks run in registration order when the shutdown signal fires.
    pub(crate) shutdown_callbacks: Vec<ShutdownCallback>,
    /// Hook invoked with each decoded input value before the handler runs.
    pub(crate) request_trace: Option<TraceFn>,
    /// Hook invoked with each output value before it is encoded.
    pub(crate) response_trace: Option<TraceFn>,
}

impl Options {
    /// Create options with all defaults: background context, unescaped
    /// compact JSON output, shutdown handling disabled.
    pub fn new() -> Self {
        Self {
            base_context: Context::background(),
            escape_html: false,
            indent_prefix: String::new(),
            indent: String::new(),
            enable_shutdown: false,
            shutdown_callbacks: Vec::new(),
            request_trace: None,
            response_trace: None,
        }
    }

    /// Set the base context shared by all invocations.
    pub fn context(mut self, ctx: Context) -> Self {
        self.base_context = ctx;
        self
    }

    /// Escape `<`, `>` and `&` inside string output (off by default).
    pub fn escape_html(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }

    /// Pretty-print output with the given per-line prefix and indent unit.
    ///
    /// Setting both to `""` restores compact encoding.
    pub fn indent(mut self, prefix: impl Into<String>, indent: impl Into<String>) -> Self {
        self.indent_prefix = prefix.into();
        self.indent = indent.into();
        self
    }

    /// Enable shutdown-signal handling and register a callback.
    ///
    /// May be called multiple times; callbacks accumulate and run in
    /// registration order when the signal fires.
    pub fn on_shutdown(mut self, callback: impl Fn() + Send + 'static) -> Self {
        self.shutdown_callbacks.push(Box::new(callback));
        self.enable_shutdown = true;
        self
    }

    /// Register a hook invoked with each decoded input value, before the
    /// handler runs. Best-effort: the invocation does not depend on it.
    pub fn trace_request(
        mut self,
        hook: impl Fn(&Context, &serde_json::Value) + Send + Sync + 'static,
    ) -> Self {
        self.request_trace = Some(Arc::new(hook));
        self
    }

    /// Register a hook invoked with each output value, before encoding.
    /// Best-effort: the invocation does not depend on it.
    pub fn trace_response(
        mut self,
        hook: impl Fn(&Context, &serde_json::Value) + Send + Sync + 'static,
    ) -> Self {
        self.response_trace = Some(Arc::new(hook));
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("base_context", &self.base_context)
            .field("escape_html", &self.escape_html)
            .field("indent_prefix", &self.indent_prefix)
            .field("indent", &self.indent)
            .field("enable_shutdown", &self.enable_shutdown)
            .field("shutdown_callbacks", &self.shutdown_callbacks.len())
            .field("request_trace", &self.request_trace.is_some())
            .field("response_trace", &self.response_trace.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_defaults() {
        let options = Options::new();

        assert_eq!(options.base_context, Context::background());
        assert!(!options.escape_html);
        assert_eq!(options.indent_prefix, "");
        assert_eq!(options.indent, "");
        assert!(!options.enable_shutdown);
        assert!(options.shutdown_callbacks.is_empty());
        assert!(options.request_trace.is_none());
        assert!(options.response_trace.is_none());
    }

    #[test]
    fn test_scalar_setters_last_write_wins() {
        let options = Options::new()
            .escape_html(true)
            .indent(">", "\t")
            .context(Context::background().with_invocation_id("first"))
            .escape_html(false)
            .indent("", "  ")
            .context(Context::background().with_invocation_id("second"));

        assert!(!options.escape_html);
        assert_eq!(options.indent_prefix, "");
        assert_eq!(options.indent, "  ");
        assert_eq!(options.base_context.invocation_id(), "second");
    }

    #[test]
    fn test_on_shutdown_accumulates() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let first = order.clone();
        let second = order.clone();

        let options = Options::new()
            .on_shutdown(move || first.lock().unwrap().push("a"))
            .on_shutdown(move || second.lock().unwrap().push("b"));

        assert!(options.enable_shutdown);
        assert_eq!(options.shutdown_callbacks.len(), 2);

        for callback in &options.shutdown_callbacks {
            callback();
        }
        assert_eq!(*order.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_trace_hooks_registered() {
        let options = Options::new()
            .trace_request(|_ctx, _value| {})
            .trace_response(|_ctx, _value| {});

        assert!(options.request_trace.is_some());
        assert!(options.response_trace.is_some());
    }

    #[test]
    fn test_debug_does_not_panic() {
        let options = Options::new().on_shutdown(|| {});
        let rendered = format!("{:?}", options);
        assert!(rendered.contains("shutdown_callbacks"));
    }
}
