// API module entry
// Request router for the booking REST endpoints

mod handlers;
mod response;
mod types;

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::{Method, Request, Response};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use thiserror::Error;

use crate::clients::StoreError;
use crate::config::AppState;
use crate::logger;
use crate::routing::matcher;

/// Normalized request descriptor handed to the handlers
///
/// The body is read in full before dispatch so it can be logged and parsed
/// without touching the connection again.
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Bytes,
}

/// Fault that escaped a handler
///
/// Known collaborator faults are mapped inside the handlers; whatever
/// reaches this type is caught once, at the router boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("document store fault: {0}")]
    Store(#[from] StoreError),

    #[error("serialization fault: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Handler bound to a route table entry
#[derive(Clone, Copy, Debug)]
enum RouteTarget {
    Signup,
    Signin,
    ListTables,
    CreateTable,
    GetTableById,
    ListReservations,
    CreateReservation,
}

/// Static route table, fixed at process start
///
/// Lookup is exact on the method and template-wise on the path; insertion
/// order only matters for templates that could both match, which none do.
const ROUTE_TABLE: &[(&str, &str, RouteTarget)] = &[
    ("POST", "/signup", RouteTarget::Signup),
    ("POST", "/signin", RouteTarget::Signin),
    ("GET", "/tables", RouteTarget::ListTables),
    ("POST", "/tables", RouteTarget::CreateTable),
    ("GET", "/tables/{tableId}", RouteTarget::GetTableById),
    ("GET", "/reservations", RouteTarget::ListReservations),
    ("POST", "/reservations", RouteTarget::CreateReservation),
];

/// Main entry point for API request handling
///
/// Reads the body, emits the diagnostic record, dispatches, and always
/// produces a response; no fault propagates to the connection layer.
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let authorization = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("Failed to read request body: {e}"));
            return Ok(response::internal_error());
        }
    };

    if state.config.logging.access_log {
        logger::log_request(
            method.as_str(),
            &path,
            authorization.as_deref(),
            &String::from_utf8_lossy(&body),
        );
    }

    let api_req = ApiRequest { method, path, body };
    let resp = dispatch(&api_req, &state).await;
    logger::log_api_request(
        api_req.method.as_str(),
        &api_req.path,
        resp.status().as_u16(),
    );
    Ok(resp)
}

/// Route-table lookup and handler invocation
///
/// Unmatched requests get the fixed 404; a fault out of a handler becomes
/// a 500 with the detail logged, never returned.
pub async fn dispatch(req: &ApiRequest, state: &AppState) -> Response<Full<Bytes>> {
    for (route_method, template, target) in ROUTE_TABLE {
        if req.method.as_str() != *route_method {
            continue;
        }
        let Some(params) = matcher::match_template(template, &req.path) else {
            continue;
        };

        return match invoke(*target, req, &params, state).await {
            Ok(resp) => resp,
            Err(e) => {
                logger::log_error(&format!("Unhandled fault in {route_method} {template}: {e}"));
                response::internal_error()
            }
        };
    }

    response::route_not_found()
}

async fn invoke(
    target: RouteTarget,
    req: &ApiRequest,
    params: &HashMap<String, String>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, ApiError> {
    match target {
        RouteTarget::Signup => handlers::signup(req, state).await,
        RouteTarget::Signin => handlers::signin(req, state).await,
        RouteTarget::ListTables => handlers::list_tables(state).await,
        RouteTarget::CreateTable => handlers::create_table(req, state).await,
        RouteTarget::GetTableById => handlers::get_table_by_id(params, state).await,
        RouteTarget::ListReservations => handlers::list_reservations(state).await,
        RouteTarget::CreateReservation => handlers::create_reservation(req, state).await,
    }
}
