//! Handler module - typed handler shapes and the invocation adapter.
//!
//! Provides:
//! - [`Handler`] - trait over the four supported async function shapes
//! - [`TypedInvoker`] - adapts one handler into the byte-level
//!   [`Invoker`](crate::Invoker) contract
//!
//! # Example
//!
//! ```ignore
//! use faaswire::handler::TypedInvoker;
//! use faaswire::{Context, Options};
//!
//! async fn greet(ctx: Context, name: String) -> Result<String, faaswire::BoxError> {
//!     Ok(format!("hello {} ({})", name, ctx.invocation_id()))
//! }
//!
//! let invoker = TypedInvoker::new(greet, Options::new());
//! ```

mod adapter;
mod shapes;

pub use adapter::TypedInvoker;
pub use shapes::{
    ContextInputShape, ContextShape, Handler, HandlerResult, InputShape, NullaryShape,
};
