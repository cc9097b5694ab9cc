//! Backoff for method calls that never reached the server.
//!
//! Only connection failures are retried: the request was never handed to
//! the server, so it cannot have run. Any response, whatever its status,
//! ends the loop, and so does a timeout or any other error raised after the
//! connection was made, since the server may already be executing the
//! method. A remote method therefore runs at most once per logical call.

use std::future::Future;
use std::time::Duration;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

const BASE_DELAY: Duration = Duration::from_millis(200);

/// Retry schedule: `base`, `2 * base`, `4 * base`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Backoff {
    retries: u32,
    base: Duration,
}

impl Backoff {
    pub(crate) fn new(retries: u32) -> Self {
        Self {
            retries,
            base: BASE_DELAY,
        }
    }

    fn delay(&self, attempt: u32) -> Duration {
        self.base.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Run `send` until it yields a response or the retries are spent.
    pub(crate) async fn send<F, Fut>(
        &self,
        method: &str,
        send: F,
    ) -> Result<reqwest::Response, reqwest::Error>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        let mut attempt = 0;
        loop {
            match send().await {
                Ok(resp) => return Ok(resp),
                Err(e) if !e.is_connect() || attempt >= self.retries => return Err(e),
                Err(e) => {
                    let delay = self.delay(attempt);
                    attempt += 1;
                    tracing::warn!(
                        method,
                        attempt,
                        retries = self.retries,
                        error = %e,
                        "PIM API request not delivered, retrying in {delay:?}"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn instant(retries: u32) -> Backoff {
        Backoff {
            retries,
            base: Duration::ZERO,
        }
    }

    #[test]
    fn delays_double() {
        let b = Backoff::default();
        assert_eq!(b.delay(0), Duration::from_millis(200));
        assert_eq!(b.delay(1), Duration::from_millis(400));
        assert_eq!(b.delay(2), Duration::from_millis(800));
    }

    #[tokio::test]
    async fn unreachable_host_uses_every_retry() {
        let calls = AtomicU32::new(0);
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();

        // Port 1 is closed: connection refused.
        let result = instant(2)
            .send("ping", || {
                calls.fetch_add(1, Ordering::SeqCst);
                http.post("http://127.0.0.1:1/api/method/ping").send()
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn malformed_request_is_not_retried() {
        let calls = AtomicU32::new(0);
        let http = reqwest::Client::new();

        let result = instant(3)
            .send("ping", || {
                calls.fetch_add(1, Ordering::SeqCst);
                http.post("not a url").send()
            })
            .await;

        assert!(result.unwrap_err().is_builder());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn timeout_after_connect_is_not_retried() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept and hold the connection without ever answering.
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let calls = AtomicU32::new(0);
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();
        let url = format!("http://{addr}/api/method/update");

        let err = instant(3)
            .send("update", || {
                calls.fetch_add(1, Ordering::SeqCst);
                http.post(&url).send()
            })
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        server.abort();
    }
}
