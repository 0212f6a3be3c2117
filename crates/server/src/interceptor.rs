//! Hooks run around every matched request.
//!
//! An [`InterceptorChain`] holds interceptors in registration order.
//! Pre-hooks run first to last and may veto the request; post-hooks and
//! completion hooks run last to first.

use std::sync::Arc;
use std::time::Instant;

use axum::http::{Method, StatusCode};
use tracing::{info, warn};
use uuid::Uuid;

use crate::views::ModelAndView;

/// Per-request data handed to every hook.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub method: Method,
    pub path: String,
    pub started: Instant,
}

impl RequestContext {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { request_id: Uuid::new_v4(), method, path: path.into(), started: Instant::now() }
    }
}

/// Outcome of a pre-hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Abort the request; the client receives this status with an empty body.
    Stop(StatusCode),
}

pub trait HandlerInterceptor: Send + Sync {
    fn pre_handle(&self, _req: &RequestContext) -> Flow { Flow::Continue }

    /// Called after the handler returned, before the view is rendered.
    /// `mav` is `None` for handlers that answer without a view (errors, JSON).
    fn post_handle(&self, _req: &RequestContext, _mav: Option<&ModelAndView>) {}

    /// Called once the final status is known, after rendering and before the
    /// body is written to the client. `error` carries the handler or
    /// rendering failure, if any.
    fn after_completion(&self, _req: &RequestContext, _status: StatusCode, _error: Option<&str>) {}
}

/// Logs every hook and never vetoes.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingInterceptor;

impl HandlerInterceptor for LoggingInterceptor {
    fn pre_handle(&self, req: &RequestContext) -> Flow {
        info!(event = "pre_handle", request_id = %req.request_id, method = %req.method, path = %req.path, "pre handle");
        Flow::Continue
    }

    fn post_handle(&self, req: &RequestContext, mav: Option<&ModelAndView>) {
        info!(
            event = "post_handle",
            request_id = %req.request_id,
            view = mav.map(|m| m.view_name()).unwrap_or("-"),
            "post handle"
        );
    }

    fn after_completion(&self, req: &RequestContext, status: StatusCode, error: Option<&str>) {
        let elapsed_ms = req.started.elapsed().as_millis() as u64;
        match error {
            None => info!(event = "completed", request_id = %req.request_id, status = status.as_u16(), elapsed_ms, "request completed"),
            Some(err) => warn!(event = "completed", request_id = %req.request_id, status = status.as_u16(), elapsed_ms, error = %err, "request completed with error"),
        }
    }
}

/// Result of running every pre-hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainFlow {
    Proceed,
    /// `passed` interceptors returned `Continue` before one stopped the request.
    Halted { status: StatusCode, passed: usize },
}

#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn HandlerInterceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, interceptor: impl HandlerInterceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn len(&self) -> usize { self.interceptors.len() }

    pub fn is_empty(&self) -> bool { self.interceptors.is_empty() }

    pub fn pre_handle(&self, req: &RequestContext) -> ChainFlow {
        for (idx, interceptor) in self.interceptors.iter().enumerate() {
            if let Flow::Stop(status) = interceptor.pre_handle(req) {
                return ChainFlow::Halted { status, passed: idx };
            }
        }
        ChainFlow::Proceed
    }

    pub fn post_handle(&self, req: &RequestContext, mav: Option<&ModelAndView>) {
        for interceptor in self.interceptors.iter().rev() {
            interceptor.post_handle(req, mav);
        }
    }

    /// Run completion hooks of the first `passed` interceptors, last to first.
    pub fn after_completion(&self, passed: usize, req: &RequestContext, status: StatusCode, error: Option<&str>) {
        for interceptor in self.interceptors.iter().take(passed).rev() {
            interceptor.after_completion(req, status, error);
        }
    }
}
