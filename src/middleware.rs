//! Composable request-wrapping functions.
//!
//! Each middleware takes the request and the next handler and returns the
//! handler's response. `main` nests timing outside logging, so a request
//! runs: timing start, log entry, handler, timing log.

use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::future::Future;
use std::time::Instant;

pub type HandlerResult = Result<Response<Full<Bytes>>, Infallible>;

/// Log method and path before delegating. No post-step.
pub async fn with_logging<B, F, Fut>(req: Request<B>, access_log: bool, next: F) -> HandlerResult
where
    F: FnOnce(Request<B>) -> Fut,
    Fut: Future<Output = HandlerResult>,
{
    if access_log {
        logger::log_request(req.method(), req.uri().path());
    }
    next(req).await
}

/// Delegate, then log the total handler latency.
pub async fn with_timing<B, F, Fut>(req: Request<B>, access_log: bool, next: F) -> HandlerResult
where
    F: FnOnce(Request<B>) -> Fut,
    Fut: Future<Output = HandlerResult>,
{
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let start = Instant::now();

    let response = next(req).await;

    if access_log {
        logger::log_timing(&method, &path, start.elapsed());
    }
    response
}
