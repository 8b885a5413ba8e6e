//! Echo worker - request/response demo driven from stdin.
//!
//! The control-plane loop here is a local stand-in: it reads one JSON
//! document per line from stdin, runs it through the invoker, and prints
//! the response payload (or the error) back out.
//!
//! # Running
//!
//! ```text
//! FAASWIRE_CONTROL_API=stdio cargo run --example echo
//! {"message":"hello"}
//! ```

use faaswire::{Context, Options, StartMode, WorkerBuilder, CONTROL_API_ENV};
use serde::{Deserialize, Serialize};

/// Input structure for the echo handler.
#[derive(Deserialize, Debug)]
struct EchoInput {
    message: String,
}

/// Output structure for the echo handler.
#[derive(Serialize, Debug)]
struct EchoOutput {
    echo: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    WorkerBuilder::new()
        .handler(|_ctx: Context, input: EchoInput| async move {
            Ok::<_, faaswire::BoxError>(EchoOutput {
                echo: input.message,
            })
        })
        .options(Options::new().on_shutdown(|| eprintln!("echo worker shutting down")))
        .mode(StartMode::new(CONTROL_API_ENV, |_endpoint, mut invoker| {
            Box::pin(async move {
                let stdin = std::io::stdin();
                let mut line = String::new();
                let mut sequence = 0u64;
                loop {
                    line.clear();
                    // stdin closing is the local equivalent of the control
                    // plane going away
                    if stdin.read_line(&mut line)? == 0 {
                        return Ok(());
                    }
                    let payload = line.trim();
                    if payload.is_empty() {
                        continue;
                    }
                    sequence += 1;
                    let ctx =
                        Context::background().with_invocation_id(format!("local-{}", sequence));
                    match invoker.invoke(ctx, payload.as_bytes()).await {
                        Ok(out) => println!("{}", String::from_utf8_lossy(out)),
                        Err(e) => eprintln!("invocation failed: {}", e),
                    }
                }
            })
        }))
        .start()
        .await;
}
