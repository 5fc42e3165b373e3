//! Around-advice for transport handlers: an explicit decorator in place of
//! declarative interception. Product handlers wrap their service calls with
//! [`around`], which observes the outcome without altering it.

use std::fmt::Display;
use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{error, info};

/// Hooks fired around a wrapped call. Implementations must be cheap; they run
/// inline on the request path.
pub trait MethodHooks: Send + Sync {
    fn on_enter(&self, method: &str);
    fn on_success(&self, method: &str, elapsed: Duration);
    fn on_failure(&self, method: &str, error: &str, elapsed: Duration);
}

/// Default hooks: structured log lines carrying the method name and elapsed
/// wall-clock time.
pub struct LogHooks;

impl MethodHooks for LogHooks {
    fn on_enter(&self, method: &str) {
        info!(method, "method called");
    }

    fn on_success(&self, method: &str, elapsed: Duration) {
        info!(method, elapsed_ms = elapsed.as_millis() as u64, "method executed successfully");
    }

    fn on_failure(&self, method: &str, error: &str, elapsed: Duration) {
        error!(method, error, elapsed_ms = elapsed.as_millis() as u64, "method failed");
    }
}

/// Run `fut` bracketed by hooks: `on_enter` fires exactly once before the
/// call, then exactly one of `on_success`/`on_failure` depending on the
/// outcome. The result is returned untouched and timing covers only the inner
/// call.
pub async fn around<T, E, F>(hooks: &dyn MethodHooks, method: &str, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    hooks.on_enter(method);
    let start = Instant::now();
    match fut.await {
        Ok(value) => {
            hooks.on_success(method, start.elapsed());
            Ok(value)
        }
        Err(e) => {
            hooks.on_failure(method, &e.to_string(), start.elapsed());
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingHooks {
        enter: AtomicUsize,
        success: AtomicUsize,
        failure: AtomicUsize,
    }

    impl MethodHooks for CountingHooks {
        fn on_enter(&self, _method: &str) {
            self.enter.fetch_add(1, Ordering::SeqCst);
        }
        fn on_success(&self, _method: &str, _elapsed: Duration) {
            self.success.fetch_add(1, Ordering::SeqCst);
        }
        fn on_failure(&self, _method: &str, _error: &str, _elapsed: Duration) {
            self.failure.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn success_fires_enter_and_success_once() {
        let hooks = CountingHooks::default();
        let out: Result<i32, String> = around(&hooks, "op", async { Ok(41 + 1) }).await;
        assert_eq!(out.unwrap(), 42);
        assert_eq!(hooks.enter.load(Ordering::SeqCst), 1);
        assert_eq!(hooks.success.load(Ordering::SeqCst), 1);
        assert_eq!(hooks.failure.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failure_fires_crash_hook_and_propagates_unchanged() {
        let hooks = CountingHooks::default();
        let out: Result<i32, String> = around(&hooks, "op", async { Err("boom".to_string()) }).await;
        assert_eq!(out.unwrap_err(), "boom");
        assert_eq!(hooks.enter.load(Ordering::SeqCst), 1);
        assert_eq!(hooks.success.load(Ordering::SeqCst), 0);
        assert_eq!(hooks.failure.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn hooks_do_not_alter_the_value() {
        let hooks = CountingHooks::default();
        let out: Result<Vec<u8>, String> = around(&hooks, "op", async { Ok(vec![1, 2, 3]) }).await;
        assert_eq!(out.unwrap(), vec![1, 2, 3]);
    }
}
