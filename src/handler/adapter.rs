//! Typed invocation adapter - bytes in, bytes out.
//!
//! [`TypedInvoker`] wraps one user handler function together with resolved
//! [`Options`] and adapts it to the [`Invoker`] contract:
//!
//! 1. Clear the reusable output buffer.
//! 2. Decode the payload into the handler's input type; a malformed or
//!    type-incompatible document fails the invocation before any user
//!    code runs.
//! 3. Invoke the request-trace hook, if configured, with the decoded
//!    input (best-effort).
//! 4. Call the handler; an error from it fails the invocation with the
//!    handler's own error, and nothing is encoded.
//! 5. Invoke the response-trace hook, if configured, with the output
//!    value (best-effort).
//! 6. Encode the output into the buffer, honoring the escape/indent
//!    options, and return a view of it.
//!
//! The buffer is allocated once and reused across invocations; the
//! returned slice stays valid until the next call to `invoke`, which the
//! borrow checker enforces.

use std::marker::PhantomData;

use crate::codec::{EncodeConfig, JsonCodec};
use crate::context::Context;
use crate::error::{FaaswireError, Result};
use crate::invoker::{BoxFuture, Invoker};
use crate::options::{Options, TraceFn};
use crate::shutdown;

use super::Handler;

/// Adapter from a typed handler function to the byte-level [`Invoker`]
/// contract.
pub struct TypedInvoker<F, Marker> {
    func: F,
    base_context: Context,
    encode: EncodeConfig,
    request_trace: Option<TraceFn>,
    response_trace: Option<TraceFn>,
    out: Vec<u8>,
    _marker: PhantomData<fn(Marker)>,
}

impl<F, Marker> TypedInvoker<F, Marker>
where
    F: Handler<Marker>,
{
    /// Wrap a handler function with the given options.
    ///
    /// Consumes the options; they cannot change afterward. If shutdown
    /// handling was enabled, the signal listener is registered here,
    /// exactly once, which requires a running Tokio runtime.
    pub fn new(func: F, options: Options) -> Self {
        let Options {
            base_context,
            escape_html,
            indent_prefix,
            indent,
            enable_shutdown,
            shutdown_callbacks,
            request_trace,
            response_trace,
        } = options;

        if enable_shutdown {
            shutdown::listen(shutdown_callbacks);
        }

        Self {
            func,
            base_context,
            encode: EncodeConfig {
                escape_html,
                indent_prefix,
                indent,
            },
            request_trace,
            response_trace,
            out: Vec::new(),
            _marker: PhantomData,
        }
    }
}

impl<F, Marker> Invoker for TypedInvoker<F, Marker>
where
    F: Handler<Marker>,
    Marker: 'static,
{
    fn invoke<'a>(&'a mut self, ctx: Context, payload: &'a [u8]) -> BoxFuture<'a, Result<&'a [u8]>> {
        Box::pin(async move {
            self.out.clear();
            let ctx = Context::overlay(&self.base_context, ctx);

            let input: F::In = JsonCodec::decode(payload)?;

            if let Some(hook) = &self.request_trace {
                if let Ok(value) = serde_json::from_slice::<serde_json::Value>(payload) {
                    hook(&ctx, &value);
                }
            }

            let output = self
                .func
                .call(ctx.clone(), input)
                .await
                .map_err(FaaswireError::Handler)?;

            if let Some(hook) = &self.response_trace {
                if let Ok(value) = serde_json::to_value(&output) {
                    hook(&ctx, &value);
                }
            }

            JsonCodec::encode_into(&output, &mut self.out, &self.encode)?;
            Ok(&self.out[..])
        })
    }
}
