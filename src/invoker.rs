//! Uniform invoker contract consumed by control-plane loops.
//!
//! [`Invoker`] is the only coupling surface between the invocation adapter
//! and the external polling loop: context and bytes in, bytes out. The
//! loop never sees generics, options, or JSON.
//!
//! [`FailingInvoker`] is the degenerate implementation substituted when
//! worker construction fails (no handler registered). Misconfiguration
//! then surfaces as the same descriptive error on every invocation
//! instead of a crash at startup.
//!
//! # Serialization contract
//!
//! The control plane drives one invocation at a time. That contract is
//! encoded in the signature: `invoke` takes `&mut self` and the success
//! value borrows the invoker's internal buffer, so a second invocation
//! cannot begin until the previous result has been released.

use std::future::Future;
use std::pin::Pin;

use crate::context::Context;
use crate::error::{FaaswireError, Result};

/// Boxed future for invocation results.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Byte-level invocation contract.
pub trait Invoker: Send {
    /// Run one invocation: decode, dispatch, encode.
    ///
    /// On success the returned slice views the invoker's output buffer and
    /// stays valid until the next invocation begins.
    fn invoke<'a>(&'a mut self, ctx: Context, payload: &'a [u8]) -> BoxFuture<'a, Result<&'a [u8]>>;
}

/// Invoker that ignores its inputs and always fails with the same error.
pub struct FailingInvoker {
    error: Box<dyn Fn() -> FaaswireError + Send + Sync>,
}

impl FailingInvoker {
    /// Create a failing invoker from an error constructor.
    pub fn new<E>(error: E) -> Self
    where
        E: Fn() -> FaaswireError + Send + Sync + 'static,
    {
        Self {
            error: Box::new(error),
        }
    }

    /// Failing invoker for the missing-handler construction error.
    pub fn nil_handler() -> Self {
        Self::new(|| FaaswireError::NilHandler)
    }
}

impl Invoker for FailingInvoker {
    fn invoke<'a>(
        &'a mut self,
        _ctx: Context,
        _payload: &'a [u8],
    ) -> BoxFuture<'a, Result<&'a [u8]>> {
        let err = (self.error)();
        Box::pin(async move { Err(err) })
    }
}
