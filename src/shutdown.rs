//! Shutdown-signal listener.
//!
//! Registered at most once, as a side effect of adapter construction when
//! shutdown handling is enabled. On the shutdown signal (SIGTERM on Unix,
//! ctrl-c elsewhere) every registered callback runs synchronously, in
//! registration order, exactly once. In-flight invocations are not
//! cancelled; that is the host's call.

use crate::options::ShutdownCallback;

/// Spawn the listener task for the given callbacks.
///
/// Must be called from within a Tokio runtime.
pub(crate) fn listen(callbacks: Vec<ShutdownCallback>) {
    tokio::spawn(async move {
        match wait_for_signal().await {
            Ok(()) => {
                tracing::info!(
                    callbacks = callbacks.len(),
                    "shutdown signal received, running callbacks"
                );
                run_callbacks(&callbacks);
            }
            Err(e) => {
                tracing::error!("failed to listen for shutdown signal: {}", e);
            }
        }
    });
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = signal(SignalKind::terminate())?;
    term.recv().await;
    Ok(())
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

/// Run callbacks synchronously in registration order.
pub(crate) fn run_callbacks(callbacks: &[ShutdownCallback]) {
    for callback in callbacks {
        callback();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_callbacks_run_in_registration_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let first = order.clone();
        let second = order.clone();

        let options = Options::new()
            .on_shutdown(move || first.lock().unwrap().push("a"))
            .on_shutdown(move || second.lock().unwrap().push("b"));

        run_callbacks(&options.shutdown_callbacks);

        assert_eq!(*order.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_callbacks_run_once_per_trigger() {
        let count = Arc::new(Mutex::new(0));
        let counter = count.clone();

        let options = Options::new().on_shutdown(move || *counter.lock().unwrap() += 1);

        run_callbacks(&options.shutdown_callbacks);
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_listen_spawns_without_firing_callbacks() {
        let fired = Arc::new(Mutex::new(false));
        let flag = fired.clone();

        listen(vec![Box::new(move || *flag.lock().unwrap() = true)]);

        // No signal was delivered, so nothing may run.
        tokio::task::yield_now().await;
        assert!(!*fired.lock().unwrap());
    }
}
