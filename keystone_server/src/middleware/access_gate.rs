//! Access gate middleware for the Keystone admin API.
//!
//! Wrapped around the whole application, the gate runs before any routing happens. Requests that match a public route
//! in the [`AccessPolicy`] pass straight through. Every other request must carry a valid bearer token; the decoded
//! [`Claims`] are placed in the request extensions for handlers to pick up. Anything else is answered with a 401 and
//! never reaches the router, so unauthenticated callers cannot probe which paths exist.

use std::{future::Future, pin::Pin, rc::Rc};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error,
    HttpMessage,
};
use futures::future::{ok, Ready};
use keystone_engine::{AccessPolicy, Claims, TokenService};
use log::*;

use crate::errors::ServerError;

pub struct AccessGateFactory {
    policy: Rc<AccessPolicy>,
    tokens: Rc<TokenService>,
}

impl AccessGateFactory {
    pub fn new(policy: AccessPolicy, tokens: TokenService) -> Self {
        Self { policy: Rc::new(policy), tokens: Rc::new(tokens) }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGateFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AccessGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AccessGateService {
            policy: Rc::clone(&self.policy),
            tokens: Rc::clone(&self.tokens),
            service: Rc::new(service),
        })
    }
}

pub struct AccessGateService<S> {
    policy: Rc<AccessPolicy>,
    tokens: Rc<TokenService>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AccessGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let policy = Rc::clone(&self.policy);
        let tokens = Rc::clone(&self.tokens);
        Box::pin(async move {
            let decision = {
                // A header that is not valid text is as good as a malformed one.
                let authorization = req.headers().get(header::AUTHORIZATION).map(|v| v.to_str().unwrap_or(""));
                policy.authorize(&tokens, req.method().as_str(), req.path(), authorization)
            };
            match decision {
                Ok(claims) => {
                    if let Some(claims) = claims {
                        trace!("🔐️ {} {} authorized for {}", req.method(), req.path(), claims.subject);
                        req.extensions_mut().insert::<Claims>(claims);
                    }
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                },
                Err(e) => {
                    warn!("🔐️ Denied {} {}. {e}", req.method(), req.path());
                    Ok(req.error_response(ServerError::Unauthorized(e)).map_into_right_body())
                },
            }
        })
    }
}
