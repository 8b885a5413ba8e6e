//! Worker builder - the user-facing registration surface.
//!
//! [`WorkerBuilder`] ties the pieces together: one handler function (any
//! supported shape), an [`Options`] value, and the control-plane modes to
//! dispatch between. `start()` builds the invoker and runs the startup
//! dispatcher, which in normal operation never returns.
//!
//! Building without a handler still succeeds; every invocation of the
//! resulting worker fails with a "handler is nil" error. This keeps
//! startup wiring simple while making the misconfiguration impossible to
//! miss.
//!
//! # Example
//!
//! ```ignore
//! use faaswire::{Context, Options, StartMode, WorkerBuilder, CONTROL_API_ENV};
//!
//! WorkerBuilder::new()
//!     .handler(|_ctx: Context, name: String| async move {
//!         Ok::<_, faaswire::BoxError>(format!("hello {}", name))
//!     })
//!     .options(Options::new().on_shutdown(|| eprintln!("shutting down")))
//!     .mode(StartMode::new(CONTROL_API_ENV, |endpoint, invoker| {
//!         Box::pin(control_plane_loop(endpoint, invoker))
//!     }))
//!     .start()
//!     .await;
//! ```

use crate::handler::{Handler, TypedInvoker};
use crate::invoker::{FailingInvoker, Invoker};
use crate::options::Options;
use crate::shutdown;
use crate::start::{Dispatcher, StartMode};

type InvokerFactory = Box<dyn FnOnce(Options) -> Box<dyn Invoker> + Send>;

/// Fluent builder for a worker process.
pub struct WorkerBuilder {
    factory: Option<InvokerFactory>,
    options: Options,
    modes: Vec<StartMode>,
}

impl WorkerBuilder {
    /// Create a new worker builder.
    pub fn new() -> Self {
        Self {
            factory: None,
            options: Options::default(),
            modes: Vec::new(),
        }
    }

    /// Register the handler function. The last registration wins.
    pub fn handler<F, Marker>(mut self, func: F) -> Self
    where
        F: Handler<Marker>,
        Marker: 'static,
    {
        self.factory = Some(Box::new(move |options| {
            Box::new(TypedInvoker::new(func, options))
        }));
        self
    }

    /// Set the invocation options applied once at construction.
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Register a control-plane mode; modes are checked in registration
    /// order at startup.
    pub fn mode(mut self, mode: StartMode) -> Self {
        self.modes.push(mode);
        self
    }

    fn into_parts(self) -> (Box<dyn Invoker>, Vec<StartMode>) {
        let WorkerBuilder {
            factory,
            options,
            modes,
        } = self;
        let invoker: Box<dyn Invoker> = match factory {
            Some(factory) => factory(options),
            None => {
                // options still resolve without a handler; only
                // invocations fail
                if options.enable_shutdown {
                    shutdown::listen(options.shutdown_callbacks);
                }
                Box::new(FailingInvoker::nil_handler())
            }
        };
        (invoker, modes)
    }

    /// Build the invoker, consuming the builder.
    ///
    /// This is where options are resolved and, if enabled, the shutdown
    /// listener is registered. Without a registered handler this yields
    /// the permanent failing invoker.
    pub fn build_invoker(self) -> Box<dyn Invoker> {
        self.into_parts().0
    }

    /// Build the invoker and run the startup dispatcher to completion.
    pub async fn start(self) {
        self.start_with(Dispatcher::new()).await;
    }

    /// Like [`start`](WorkerBuilder::start), but with a caller-supplied
    /// dispatcher, e.g. to inject the fatal and environment seams in
    /// tests. Modes registered on the builder are appended to the
    /// dispatcher's.
    pub async fn start_with(self, mut dispatcher: Dispatcher) {
        let (invoker, modes) = self.into_parts();
        for mode in modes {
            dispatcher = dispatcher.mode(mode);
        }
        dispatcher.run(invoker).await;
    }
}

impl Default for WorkerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
