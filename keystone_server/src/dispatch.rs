//! The bridge between actix-web and the Keystone route table.
//!
//! actix only ever sees a single default service, [`dispatch`]. It looks the request up in the [`AdminRoutes`] table,
//! collects the path captures and the caller identity left behind by the access gate, and calls the matching
//! [`Handler`]. A handler that panics is turned into a 500 response; the worker keeps serving.
use std::panic::AssertUnwindSafe;

use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use futures::{future::LocalBoxFuture, FutureExt};
use keystone_engine::{Claims, GateError, PathParams, RouteTable};
use log::*;
use serde::de::DeserializeOwned;

use crate::errors::ServerError;

pub type HandlerResult = Result<HttpResponse, ServerError>;
pub type HandlerFuture = LocalBoxFuture<'static, HandlerResult>;
pub type Handler = fn(RequestContext) -> HandlerFuture;
pub type AdminRoutes = RouteTable<Handler>;

/// Everything a handler gets to see about the request it is serving.
pub struct RequestContext {
    /// The original request. Shared application state is reachable through [`RequestContext::app_data`].
    pub request: HttpRequest,
    pub body: web::Bytes,
    pub params: PathParams,
    /// The verified caller, for requests on protected routes.
    pub caller: Option<Claims>,
}

impl RequestContext {
    pub fn app_data<T: 'static>(&self) -> Result<&web::Data<T>, ServerError> {
        self.request.app_data::<web::Data<T>>().ok_or_else(|| {
            ServerError::InitializeError(format!("{} is not registered with the app", std::any::type_name::<T>()))
        })
    }

    pub fn param(&self, name: &str) -> Result<&str, ServerError> {
        self.params
            .get(name)
            .ok_or_else(|| ServerError::ValidationError(format!("Missing path parameter '{name}'")))
    }

    /// The verified caller. Protected handlers use this; the gate guarantees it is present on their routes.
    pub fn caller(&self) -> Result<&Claims, ServerError> {
        self.caller.as_ref().ok_or(ServerError::Unauthorized(GateError::MissingAuthHeader))
    }

    /// Parses the request body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ServerError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| ServerError::ValidationError(format!("Request body is not valid JSON. {e}")))
    }
}

/// Wraps an `async fn(RequestContext) -> HandlerResult` in a plain function with the [`Handler`] signature, named
/// `<name>_handler`. Use the `impl Trait` form for handlers generic over a backend.
#[macro_export]
macro_rules! handler {
    ($name:ident) => {
        paste::paste! {
            pub fn [<$name _handler>](ctx: $crate::dispatch::RequestContext) -> $crate::dispatch::HandlerFuture {
                Box::pin($name(ctx))
            }
        }
    };
    ($name:ident impl $bound:path) => {
        paste::paste! {
            pub fn [<$name _handler>]<B>(ctx: $crate::dispatch::RequestContext) -> $crate::dispatch::HandlerFuture
            where B: $bound + 'static {
                Box::pin($name::<B>(ctx))
            }
        }
    };
}

/// The default service of the app: routes every request that made it past the access gate.
pub async fn dispatch(req: HttpRequest, body: web::Bytes, routes: web::Data<AdminRoutes>) -> HandlerResult {
    let method = req.method().as_str().to_string();
    let path = req.path().to_string();
    let Some(matched) = routes.find_by_name(&method, &path) else {
        debug!("💻️ No route for {method} {path}");
        return Err(ServerError::RouteNotFound(method, path));
    };
    let handler = *matched.handler();
    let caller = req.extensions().get::<Claims>().cloned();
    let ctx = RequestContext { request: req, body, params: matched.params, caller };
    // The handler is called inside the guarded future so that a panic before its first await is caught too.
    let guarded = AssertUnwindSafe(async move { handler(ctx).await }).catch_unwind();
    match guarded.await {
        Ok(result) => result,
        Err(panic) => {
            let reason = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown cause".into());
            error!("💻️ Handler for {method} {path} panicked: {reason}");
            Err(ServerError::InternalFault)
        },
    }
}
