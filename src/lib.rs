//! # faaswire
//!
//! Worker-side runtime shim bridging a serverless control plane to typed
//! Rust handler functions.
//!
//! A worker process wraps exactly one async handler function. The control
//! plane delivers opaque JSON payloads; faaswire decodes each into the
//! handler's input type, runs the handler, encodes the result, and hands
//! the bytes back to the polling loop through the uniform [`Invoker`]
//! contract. One invocation is in flight at a time.
//!
//! ## Architecture
//!
//! - **Handler adapter**: typed async function to byte-level [`Invoker`]
//! - **Options**: base context, JSON output flags, shutdown and trace
//!   hooks, all fixed at construction
//! - **Startup dispatch**: pick the control-plane integration from the
//!   environment and run its polling loop until process exit
//!
//! ## Example
//!
//! ```ignore
//! use faaswire::{Context, Options, StartMode, WorkerBuilder, CONTROL_API_ENV};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Deserialize)]
//! struct Request {
//!     name: String,
//! }
//!
//! #[derive(Serialize)]
//! struct Response {
//!     greeting: String,
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     WorkerBuilder::new()
//!         .handler(|_ctx: Context, req: Request| async move {
//!             Ok::<_, faaswire::BoxError>(Response {
//!                 greeting: format!("hello {}", req.name),
//!             })
//!         })
//!         .options(Options::new().on_shutdown(|| eprintln!("shutting down")))
//!         .mode(StartMode::new(CONTROL_API_ENV, |endpoint, invoker| {
//!             Box::pin(control_plane_loop(endpoint, invoker))
//!         }))
//!         .start()
//!         .await;
//! }
//! ```

pub mod codec;
pub mod context;
pub mod error;
pub mod handler;
pub mod invoker;
pub mod options;
pub mod start;

mod shutdown;
mod worker;

pub use context::Context;
pub use error::{BoxError, FaaswireError};
pub use handler::{Handler, HandlerResult};
pub use invoker::{BoxFuture, FailingInvoker, Invoker};
pub use options::Options;
pub use start::{Dispatcher, StartMode, CONTROL_API_ENV};
pub use worker::WorkerBuilder;
