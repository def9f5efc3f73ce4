//! Static route table: exact path match, no patterns, no path parameters.
//! API handlers do their own method dispatch; unknown `/api/*` paths get the
//! structured JSON not-found, everything else the plain-text one.

use crate::config::AppState;
use crate::handlers;
use crate::json;
use crate::logger;
use crate::response;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};
use std::convert::Infallible;
use std::sync::atomic::Ordering;
use std::sync::Arc;

pub async fn dispatch<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let http_config = &state.config.http;

    let response = match path.as_str() {
        "/" => handlers::home(http_config),
        "/about" => handlers::about(http_config),
        "/contact" => handlers::contact(http_config),
        "/hobby" => handlers::hobby(http_config),
        "/api/info" => handlers::api_info(&method),
        "/api/users" => handlers::users(req).await,
        api_path if api_path.starts_with("/api/") => {
            json::write_json_error(StatusCode::NOT_FOUND, "Endpoint not found")
        }
        _ => response::build_404_response(),
    };

    if path.starts_with("/api/") && state.cached_access_log.load(Ordering::Relaxed) {
        logger::log_api_request(&method, &path, response.status().as_u16());
    }

    Ok(response)
}
