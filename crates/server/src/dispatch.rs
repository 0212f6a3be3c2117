//! Request lifecycle around the handlers.
//!
//! pre-hooks → handler → post-hooks → view rendering → completion hooks.
//! Installed as a route layer, so only matched routes are intercepted.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};

use crate::errors::{AppError, HandlerError};
use crate::interceptor::{ChainFlow, RequestContext};
use crate::state::AppState;
use crate::views::{ModelAndView, Rendered};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn dispatch(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let ctx = RequestContext::new(request.method().clone(), request.uri().path());
    let chain = &state.interceptors;

    if let ChainFlow::Halted { status, passed } = chain.pre_handle(&ctx) {
        let mut response = halted(status);
        tag_request_id(&mut response, &ctx);
        chain.after_completion(passed, &ctx, status, None);
        return response;
    }

    let mut response = next.run(request).await;
    let mav = response.extensions_mut().remove::<ModelAndView>();
    chain.post_handle(&ctx, mav.as_ref());

    if let Some(mav) = mav {
        response = render(&state, mav).await;
    }
    tag_request_id(&mut response, &ctx);

    let error = response.extensions().get::<HandlerError>().map(|e| e.0.clone());
    chain.after_completion(chain.len(), &ctx, response.status(), error.as_deref());
    response
}

/// Template rendering reads from disk, so it runs on the blocking pool.
async fn render(state: &AppState, mav: ModelAndView) -> Response {
    let views = Arc::clone(&state.views);
    match tokio::task::spawn_blocking(move || views.render(mav)).await {
        Ok(Ok(Rendered::Html(html))) => Html(html).into_response(),
        Ok(Ok(Rendered::Redirect(url))) => redirect(&url),
        Ok(Err(e)) => AppError::from(e).into_response(),
        Err(e) => AppError::Internal(format!("view rendering task failed: {e}")).into_response(),
    }
}

/// 302 Found, the status browsers follow with a GET after a form post.
fn redirect(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(_) => AppError::Internal(format!("invalid redirect location {location:?}")).into_response(),
    }
}

fn halted(status: StatusCode) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}

fn tag_request_id(response: &mut Response, ctx: &RequestContext) {
    if let Ok(value) = HeaderValue::from_str(&ctx.request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
}
