// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A stand-in for the ticketing API. It answers the catalog and cart
//! endpoints with canned bodies and records every request it sees so tests
//! can assert on exactly what a client sent.

use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;

use dropshot::ApiDescription;
use dropshot::Body;
use dropshot::ConfigDropshot;
use dropshot::HttpError;
use dropshot::HttpServer;
use dropshot::Path;
use dropshot::RequestContext;
use dropshot::ServerBuilder;
use dropshot::TypedBody;
use dropshot::endpoint;
use http::Response;
use http::StatusCode;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use slog::Logger;
use slog::info;

mod cart;
mod catalog;

/// Adding this listing to a cart is refused with 409 Conflict.
pub const SOLD_OUT_LISTING: &str = "sold-out";

/// One request as the stub received it.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RecordedRequest {
    pub method: String,

    /// Path and query string, exactly as sent.
    pub uri: String,

    pub authorization: Option<String>,

    pub accept: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

pub struct ServerContext {
    log: Logger,
    bearer_token: Option<String>,
    requests: Mutex<Vec<RecordedRequest>>,
    carts: Mutex<BTreeSet<String>>,
}

impl ServerContext {
    pub fn new(log: Logger, bearer_token: Option<String>) -> Self {
        Self {
            log,
            bearer_token,
            requests: Mutex::new(Vec::new()),
            carts: Mutex::new(BTreeSet::new()),
        }
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn create_cart(&self) -> String {
        let cart_id = uuid::Uuid::new_v4().to_string();
        self.carts.lock().unwrap().insert(cart_id.clone());
        cart_id
    }

    fn cart_exists(&self, cart_id: &str) -> bool {
        self.carts.lock().unwrap().contains(cart_id)
    }

    /// Record the request, then check its bearer token. Requests are recorded
    /// whether or not they are authorized.
    fn record(
        &self,
        rqctx: &RequestContext<Arc<ServerContext>>,
        body: Option<Value>,
    ) -> Result<(), Response<Body>> {
        let header = |name: http::header::HeaderName| {
            rqctx
                .request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let request = RecordedRequest {
            method: rqctx.request.method().to_string(),
            uri: rqctx.request.uri().to_string(),
            authorization: header(http::header::AUTHORIZATION),
            accept: header(http::header::ACCEPT),
            body,
        };

        info!(
            self.log,
            "stub request";
            "method" => &request.method,
            "uri" => &request.uri
        );

        let authorized = match &self.bearer_token {
            None => true,
            Some(token) => {
                request.authorization.as_deref()
                    == Some(format!("Bearer {token}").as_str())
            }
        };

        self.requests.lock().unwrap().push(request);

        if authorized {
            Ok(())
        } else {
            Err(json_response(
                StatusCode::UNAUTHORIZED,
                json!({
                    "message": "Authorization has been denied for this request."
                }),
            ))
        }
    }
}

/// Build a JSON response. The builder only fails on an invalid status or
/// header, and both are fixed here.
fn json_response(status: StatusCode, body: Value) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(body.to_string().into())
        .unwrap()
}

#[endpoint {
    method = GET,
    path = "/__stub/requests"
}]
async fn get_recorded_requests(
    rqctx: RequestContext<Arc<ServerContext>>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();

    let requests = serde_json::to_value(apictx.requests())
        .map_err(|e| HttpError::for_internal_error(e.to_string()))?;

    Ok(json_response(StatusCode::OK, requests))
}

/// 200 with no body at all.
#[endpoint {
    method = GET,
    path = "/__stub/empty"
}]
async fn get_empty(
    _rqctx: RequestContext<Arc<ServerContext>>,
) -> Result<Response<Body>, HttpError> {
    Ok(Response::builder()
        .status(StatusCode::OK)
        .body(Body::empty())
        .unwrap())
}

/// 200 with a plain text body that is not JSON.
#[endpoint {
    method = GET,
    path = "/__stub/plain"
}]
async fn get_plain(
    _rqctx: RequestContext<Arc<ServerContext>>,
) -> Result<Response<Body>, HttpError> {
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/plain")
        .body("OK".to_string().into())
        .unwrap())
}

pub fn api() -> Result<ApiDescription<Arc<ServerContext>>, anyhow::Error> {
    let mut api = ApiDescription::new();

    api.register(catalog::search_events)?;
    api.register(catalog::event_tickets)?;
    api.register(catalog::autocomplete)?;

    api.register(cart::create_cart)?;
    api.register(cart::cart_action)?;
    api.register(cart::add_item)?;
    api.register(cart::checkout_cart)?;

    api.register(get_recorded_requests)?;
    api.register(get_empty)?;
    api.register(get_plain)?;

    Ok(api)
}

/// Start the stub on `bind_addr`, or on an ephemeral localhost port when none
/// is given. With a `bearer_token`, requests without a matching
/// `Authorization` header get 401.
pub fn create_http_server(
    log: Logger,
    bind_addr: Option<SocketAddr>,
    bearer_token: Option<String>,
) -> anyhow::Result<HttpServer<Arc<ServerContext>>> {
    let config = ConfigDropshot {
        bind_address: bind_addr
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 0))),
        ..Default::default()
    };

    let context = Arc::new(ServerContext::new(log.clone(), bearer_token));

    let server = ServerBuilder::new(api()?, context, log)
        .config(config)
        .start()?;

    Ok(server)
}
