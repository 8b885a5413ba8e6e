//! Handler shapes - the supported user function signatures.
//!
//! [`Handler`] abstracts over four async function shapes, selected at
//! compile time through a marker type parameter:
//!
//! - `Fn() -> Future<Result<Out, E>>`
//! - `Fn(In) -> Future<Result<Out, E>>`
//! - `Fn(Context) -> Future<Result<Out, E>>`
//! - `Fn(Context, In) -> Future<Result<Out, E>>`
//!
//! `In` must deserialize from JSON; `Out` must serialize to it. `Out = ()`
//! encodes as `null`, covering handlers with nothing to return. Shapes
//! without an input parameter still require each payload to parse as valid
//! JSON; the parsed document is discarded.
//!
//! The marker parameter exists only so the compiler can tell the shapes
//! apart; user code never names it.

use std::future::Future;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::context::Context;
use crate::error::BoxError;
use crate::invoker::BoxFuture;

/// Result type for user handler functions.
pub type HandlerResult<Out> = std::result::Result<Out, BoxError>;

/// Trait over the supported handler function shapes.
///
/// Implemented for plain async functions and closures; see the module
/// docs for the accepted signatures.
pub trait Handler<Marker>: Send + Sync + 'static {
    /// Input type decoded from the invocation payload.
    type In: DeserializeOwned + Send + 'static;
    /// Output type encoded into the response payload.
    type Out: Serialize + 'static;

    /// Call the wrapped function.
    fn call(&self, ctx: Context, input: Self::In) -> BoxFuture<'static, HandlerResult<Self::Out>>;
}

/// Marker for `Fn() -> Future`.
pub struct NullaryShape;

/// Marker for `Fn(In) -> Future`.
pub struct InputShape<In>(PhantomData<In>);

/// Marker for `Fn(Context) -> Future`.
pub struct ContextShape;

/// Marker for `Fn(Context, In) -> Future`.
pub struct ContextInputShape<In>(PhantomData<In>);

impl<F, Fut, Out, Err> Handler<NullaryShape> for F
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<Out, Err>> + Send + 'static,
    Out: Serialize + 'static,
    Err: Into<BoxError>,
{
    type In = serde_json::Value;
    type Out = Out;

    fn call(&self, _ctx: Context, _input: serde_json::Value) -> BoxFuture<'static, HandlerResult<Out>> {
        let fut = self();
        Box::pin(async move { fut.await.map_err(Into::into) })
    }
}

impl<F, Fut, In, Out, Err> Handler<InputShape<In>> for F
where
    F: Fn(In) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<Out, Err>> + Send + 'static,
    In: DeserializeOwned + Send + 'static,
    Out: Serialize + 'static,
    Err: Into<BoxError>,
{
    type In = In;
    type Out = Out;

    fn call(&self, _ctx: Context, input: In) -> BoxFuture<'static, HandlerResult<Out>> {
        let fut = self(input);
        Box::pin(async move { fut.await.map_err(Into::into) })
    }
}

impl<F, Fut, Out, Err> Handler<ContextShape> for F
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<Out, Err>> + Send + 'static,
    Out: Serialize + 'static,
    Err: Into<BoxError>,
{
    type In = serde_json::Value;
    type Out = Out;

    fn call(&self, ctx: Context, _input: serde_json::Value) -> BoxFuture<'static, HandlerResult<Out>> {
        let fut = self(ctx);
        Box::pin(async move { fut.await.map_err(Into::into) })
    }
}

impl<F, Fut, In, Out, Err> Handler<ContextInputShape<In>> for F
where
    F: Fn(Context, In) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<Out, Err>> + Send + 'static,
    In: DeserializeOwned + Send + 'static,
    Out: Serialize + 'static,
    Err: Into<BoxError>,
{
    type In = In;
    type Out = Out;

    fn call(&self, ctx: Context, input: In) -> BoxFuture<'static, HandlerResult<Out>> {
        let fut = self(ctx, input);
        Box::pin(async move { fut.await.map_err(Into::into) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn assert_handler<Marker, F: Handler<Marker>>(_f: &F) {}

    #[test]
    fn test_all_shapes_are_handlers() {
        async fn nullary() -> Result<(), Infallible> {
            Ok(())
        }
        async fn input_only(input: u32) -> Result<u32, Infallible> {
            Ok(input)
        }
        async fn context_only(ctx: Context) -> Result<String, Infallible> {
            Ok(ctx.invocation_id().to_string())
        }
        async fn both(ctx: Context, input: u32) -> Result<(String, u32), Infallible> {
            Ok((ctx.invocation_id().to_string(), input))
        }

        assert_handler(&nullary);
        assert_handler(&input_only);
        assert_handler(&context_only);
        assert_handler(&both);
    }

    #[test]
    fn test_closures_are_handlers() {
        let greeting = "hello".to_string();
        let closure = move |_ctx: Context, name: String| {
            let greeting = greeting.clone();
            async move { Ok::<String, Infallible>(format!("{} {}", greeting, name)) }
        };
        assert_handler(&closure);
    }

    #[tokio::test]
    async fn test_call_maps_error_into_box() {
        async fn failing(_input: u32) -> Result<u32, std::io::Error> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
        }

        let err = Handler::call(&failing, Context::background(), 1)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
