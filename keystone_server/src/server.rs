use std::time::Duration;

use actix_web::{
    body::MessageBody,
    dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse},
    http::KeepAlive,
    middleware::Logger,
    web,
    App,
    Error,
    HttpServer,
};
use keystone_engine::{
    traits::{ContentManagement, CredentialSource, MediaStorage},
    AccessPolicy,
    AuthApi,
    ContentApi,
    MediaApi,
    MemoryContentStore,
    MemoryMediaStore,
    StoredCredentials,
    TokenService,
};
use log::*;

use crate::{
    auth::{build_auth_api, build_token_service},
    config::ServerConfig,
    dispatch::{dispatch, AdminRoutes},
    errors::ServerError,
    middleware::AccessGateFactory,
    routes::build_route_table,
};

pub const ACCESS_LOG_TARGET: &str = "keystone::access_log";

/// The shared, start-up-time state of the admin API. Everything in here is built once and then handed to every worker.
pub struct AppState<C, B, M> {
    pub routes: web::Data<AdminRoutes>,
    pub policy: AccessPolicy,
    pub tokens: TokenService,
    pub auth_api: web::Data<AuthApi<C>>,
    pub content_api: web::Data<ContentApi<B>>,
    pub media_api: web::Data<MediaApi<M>>,
    pub max_body_bytes: usize,
}

impl<C, B, M> Clone for AppState<C, B, M> {
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
            policy: self.policy.clone(),
            tokens: self.tokens.clone(),
            auth_api: self.auth_api.clone(),
            content_api: self.content_api.clone(),
            media_api: self.media_api.clone(),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

impl<C, B, M> AppState<C, B, M>
where
    C: CredentialSource + 'static,
    B: ContentManagement + 'static,
    M: MediaStorage + 'static,
{
    /// Builds the route table and access policy. Fails if either is misconfigured, so a bad pattern stops the server
    /// at start-up rather than on the first request.
    pub fn new(
        tokens: TokenService,
        auth_api: AuthApi<C>,
        content_api: ContentApi<B>,
        media_api: MediaApi<M>,
        max_body_bytes: usize,
    ) -> Result<Self, ServerError> {
        let routes = build_route_table::<C, B, M>()?;
        let policy = AccessPolicy::admin_api()?;
        Ok(Self {
            routes: web::Data::new(routes),
            policy,
            tokens,
            auth_api: web::Data::new(auth_api),
            content_api: web::Data::new(content_api),
            media_api: web::Data::new(media_api),
            max_body_bytes,
        })
    }

    pub fn with_routes(mut self, routes: AdminRoutes) -> Self {
        self.routes = web::Data::new(routes);
        self
    }
}

/// Assembles the actix application: access log outermost, then the access gate, then the dispatcher.
pub fn create_app<C, B, M>(
    state: AppState<C, B, M>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    C: 'static,
    B: 'static,
    M: 'static,
{
    let AppState { routes, policy, tokens, auth_api, content_api, media_api, max_body_bytes } = state;
    App::new()
        .app_data(web::PayloadConfig::new(max_body_bytes))
        .app_data(routes)
        .app_data(web::Data::new(tokens.clone()))
        .app_data(auth_api)
        .app_data(content_api)
        .app_data(media_api)
        .default_service(web::to(dispatch))
        .wrap(AccessGateFactory::new(policy, tokens))
        .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %r").log_target(ACCESS_LOG_TARGET))
}

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("💻️ Using in-memory content and media stores. Data will be lost when the server stops.");
    let srv = create_server_instance(config, MemoryContentStore::new(), MemoryMediaStore::new())?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance<B, M>(config: ServerConfig, content: B, media: M) -> Result<Server, ServerError>
where
    B: ContentManagement + Send + Sync + 'static,
    M: MediaStorage + Send + Sync + 'static,
{
    let state = AppState::<StoredCredentials, B, M>::new(
        build_token_service(&config.auth),
        build_auth_api(&config.auth),
        ContentApi::new(content),
        MediaApi::new(media),
        config.max_body_bytes,
    )?;
    let srv = HttpServer::new(move || create_app(state.clone()))
        .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
        .bind((config.host.as_str(), config.port))?
        .run();
    Ok(srv)
}
