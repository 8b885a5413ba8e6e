//! Startup dispatch - select a control-plane integration from the
//! environment and hand it the invoker.
//!
//! Each [`StartMode`] pairs an environment variable with a loop function.
//! [`Dispatcher::run`] walks the registered modes in order and starts the
//! first one whose variable is set; the variable's value (typically an
//! endpoint) is passed to the loop opaquely. In normal operation the loop
//! never returns. Any return, and equally the absence of every recognized
//! variable, is a fatal condition.
//!
//! Two seams are injectable for testing otherwise process-ending control
//! flow: the fatal handler (default: log and exit) and the environment
//! lookup (default: [`std::env::var`]).
//!
//! # Example
//!
//! ```ignore
//! use faaswire::{Dispatcher, StartMode, CONTROL_API_ENV};
//!
//! Dispatcher::new()
//!     .mode(StartMode::new(CONTROL_API_ENV, |endpoint, invoker| {
//!         Box::pin(control_plane_loop(endpoint, invoker))
//!     }))
//!     .run(invoker)
//!     .await;
//! ```

use std::sync::Arc;

use crate::error::Result;
use crate::invoker::{BoxFuture, Invoker};

/// Environment variable naming the default control-plane endpoint.
pub const CONTROL_API_ENV: &str = "FAASWIRE_CONTROL_API";

/// Control-plane loop function: receives the environment value and the
/// invoker, and only returns on unrecoverable failure.
pub type ControlLoopFn =
    Arc<dyn Fn(String, Box<dyn Invoker>) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// One control-plane integration: an environment variable and the loop to
/// run when that variable is set.
pub struct StartMode {
    env: &'static str,
    run: ControlLoopFn,
}

impl StartMode {
    /// Create a mode keyed on `env` running `run` when it is set.
    pub fn new<F>(env: &'static str, run: F) -> Self
    where
        F: Fn(String, Box<dyn Invoker>) -> BoxFuture<'static, Result<()>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            env,
            run: Arc::new(run),
        }
    }

    /// The environment variable this mode is keyed on.
    pub fn env(&self) -> &'static str {
        self.env
    }
}

/// Startup dispatcher with injectable fatal and environment seams.
pub struct Dispatcher {
    modes: Vec<StartMode>,
    fatal: Box<dyn FnMut(String) + Send>,
    env: Box<dyn Fn(&str) -> Option<String> + Send>,
}

impl Dispatcher {
    /// Dispatcher with no modes, default fatal handler (log and terminate
    /// the process) and default environment lookup.
    pub fn new() -> Self {
        Self {
            modes: Vec::new(),
            fatal: Box::new(default_fatal),
            env: Box::new(|key| std::env::var(key).ok()),
        }
    }

    /// Register a control-plane mode. Modes are checked in registration
    /// order; the first match wins.
    pub fn mode(mut self, mode: StartMode) -> Self {
        self.modes.push(mode);
        self
    }

    /// Replace the fatal handler.
    pub fn fatal_with(mut self, fatal: impl FnMut(String) + Send + 'static) -> Self {
        self.fatal = Box::new(fatal);
        self
    }

    /// Replace the environment lookup.
    pub fn env_with(mut self, env: impl Fn(&str) -> Option<String> + Send + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Run the first mode whose environment variable is set to a non-empty
    /// value.
    ///
    /// In normal operation the selected loop never returns; if it does,
    /// that is fatal (whether it returned an error or not), as is finding
    /// no recognized variable at all.
    pub async fn run(mut self, invoker: Box<dyn Invoker>) {
        let mut checked = Vec::new();
        let mut selected = None;
        for mode in &self.modes {
            match (self.env)(mode.env) {
                Some(value) if !value.is_empty() => {
                    selected = Some((mode, value));
                    break;
                }
                _ => checked.push(mode.env),
            }
        }

        let message = match selected {
            Some((mode, value)) => {
                tracing::debug!(env = mode.env, "starting control-plane loop");
                match (mode.run)(value, invoker).await {
                    Ok(()) => {
                        format!("control-plane loop for {} exited unexpectedly", mode.env)
                    }
                    Err(e) => format!("control-plane loop for {} failed: {}", mode.env, e),
                }
            }
            None if self.modes.is_empty() => "no control-plane modes registered".to_string(),
            None => format!(
                "expected control-plane environment variables {:?} are not defined",
                checked
            ),
        };
        (self.fatal)(message);
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Default fatal behavior: log the message and terminate the process.
fn default_fatal(message: String) {
    tracing::error!("{}", message);
    std::process::exit(1);
}
