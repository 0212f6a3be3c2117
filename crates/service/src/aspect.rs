//! Logging advice wrapped around service calls.
//!
//! `around` emits one event before the call, one with the returned value or
//! the error, and one after the call, all under the `service::aspect`
//! target so they can be filtered independently of request logs.

use std::fmt::{Debug, Display};
use std::future::Future;
use std::time::Instant;

use tracing::{debug, error, info};

pub async fn around<T, E, F>(operation: &'static str, call: F) -> Result<T, E>
where
    T: Debug,
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    info!(event = "before", operation, "before executing: {operation}");
    let started = Instant::now();
    let result = call.await;
    match &result {
        Ok(value) => debug!(event = "returned", operation, returned = ?value, "method returned"),
        Err(e) => error!(event = "threw", operation, error = %e, "method {operation} failed"),
    }
    info!(
        event = "after",
        operation,
        ok = result.is_ok(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "method executed: {operation}"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_ok_through() {
        let out: Result<u8, String> = around("answer", async { Ok(42) }).await;
        assert_eq!(out, Ok(42));
    }

    #[tokio::test]
    async fn passes_err_through() {
        let out: Result<u8, String> = around("boom", async { Err("broken".to_string()) }).await;
        assert_eq!(out, Err("broken".to_string()));
    }
}
