//! Request handler definitions
//!
//! Each handler is an `async fn(RequestContext) -> HandlerResult`. The [`handler!`](crate::handler) macro wraps it in
//! a plain function pointer so that it can live in the route table; backend-generic handlers are wrapped with the
//! `impl Trait` form and monomorphised in [`build_route_table`].
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Anything that waits on I/O must be expressed as a future.
//!
//! Routes, in match order:
//!
//! | Method | Path                    | Access    |
//! |--------|-------------------------|-----------|
//! | POST   | `/login`                | public    |
//! | GET    | `/session`              | protected |
//! | GET    | `/admin/posts`          | protected |
//! | POST   | `/admin/posts`          | protected |
//! | GET    | `/admin/posts/:postId`  | protected |
//! | PUT    | `/admin/posts/:postId`  | protected |
//! | DELETE | `/admin/posts/:postId`  | protected |
//! | GET    | `/admin/media`          | protected |
//! | PUT    | `/admin/media/:key`     | protected |
//! | GET    | `/admin/media/:key`     | protected |
//! | DELETE | `/admin/media/:key`     | protected |
use actix_web::{http::header, HttpResponse};
use keystone_engine::{
    db_types::{NewPost, PostUpdate},
    traits::{ContentManagement, CredentialSource, MediaStorage},
    AuthApi,
    ContentApi,
    MediaApi,
    RouteMethod,
    TokenService,
};
use log::*;

use crate::{
    auth::issue_session,
    data_objects::{LoginRequest, SessionResponse},
    dispatch::{AdminRoutes, Handler, HandlerResult, RequestContext},
    errors::ServerError,
    handler,
};

pub fn build_route_table<C, B, M>() -> Result<AdminRoutes, ServerError>
where
    C: CredentialSource + 'static,
    B: ContentManagement + 'static,
    M: MediaStorage + 'static,
{
    let routes = AdminRoutes::new()
        .route(RouteMethod::Post, "/login", login_handler::<C> as Handler)?
        .route(RouteMethod::Get, "/session", session_handler as Handler)?
        .route(RouteMethod::Get, "/admin/posts", list_posts_handler::<B> as Handler)?
        .route(RouteMethod::Post, "/admin/posts", create_post_handler::<B> as Handler)?
        .route(RouteMethod::Get, "/admin/posts/:postId", get_post_handler::<B> as Handler)?
        .route(RouteMethod::Put, "/admin/posts/:postId", update_post_handler::<B> as Handler)?
        .route(RouteMethod::Delete, "/admin/posts/:postId", delete_post_handler::<B> as Handler)?
        .route(RouteMethod::Get, "/admin/media", list_media_handler::<M> as Handler)?
        .route(RouteMethod::Put, "/admin/media/:key", upload_media_handler::<M> as Handler)?
        .route(RouteMethod::Get, "/admin/media/:key", download_media_handler::<M> as Handler)?
        .route(RouteMethod::Delete, "/admin/media/:key", delete_media_handler::<M> as Handler)?;
    info!("💻️ Route table built with {} routes", routes.len());
    Ok(routes)
}

//----------------------------------------------   Session  ----------------------------------------------------
handler!(login impl CredentialSource);
async fn login<C: CredentialSource + 'static>(ctx: RequestContext) -> HandlerResult {
    let (username, password) = ctx.json::<LoginRequest>()?.into_credentials()?;
    let api = ctx.app_data::<AuthApi<C>>()?;
    let subject = api.authenticate(&username, &password).await?;
    let tokens = ctx.app_data::<TokenService>()?;
    let session = issue_session(tokens, subject)?;
    Ok(HttpResponse::Ok().json(session))
}

handler!(session);
async fn session(ctx: RequestContext) -> HandlerResult {
    let claims = ctx.caller()?;
    Ok(HttpResponse::Ok().json(SessionResponse::from(claims)))
}

//----------------------------------------------   Posts  ----------------------------------------------------
fn post_id(ctx: &RequestContext) -> Result<i64, ServerError> {
    let raw = ctx.param("postId")?;
    raw.parse::<i64>().map_err(|_| ServerError::ValidationError(format!("'{raw}' is not a valid post id")))
}

handler!(list_posts impl ContentManagement);
async fn list_posts<B: ContentManagement + 'static>(ctx: RequestContext) -> HandlerResult {
    let api = ctx.app_data::<ContentApi<B>>()?;
    let posts = api.posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

handler!(create_post impl ContentManagement);
async fn create_post<B: ContentManagement + 'static>(ctx: RequestContext) -> HandlerResult {
    let new_post = ctx.json::<NewPost>()?;
    let api = ctx.app_data::<ContentApi<B>>()?;
    let post = api.create_post(new_post).await?;
    info!("💻️ Post #{} ({}) created by {}", post.id, post.slug, ctx.caller()?.subject);
    Ok(HttpResponse::Created().insert_header((header::LOCATION, format!("/admin/posts/{}", post.id))).json(post))
}

handler!(get_post impl ContentManagement);
async fn get_post<B: ContentManagement + 'static>(ctx: RequestContext) -> HandlerResult {
    let id = post_id(&ctx)?;
    let api = ctx.app_data::<ContentApi<B>>()?;
    let post = api.post(id).await?;
    Ok(HttpResponse::Ok().json(post))
}

handler!(update_post impl ContentManagement);
async fn update_post<B: ContentManagement + 'static>(ctx: RequestContext) -> HandlerResult {
    let id = post_id(&ctx)?;
    let update = ctx.json::<PostUpdate>()?;
    let api = ctx.app_data::<ContentApi<B>>()?;
    let post = api.update_post(id, update).await?;
    info!("💻️ Post #{id} updated by {}", ctx.caller()?.subject);
    Ok(HttpResponse::Ok().json(post))
}

handler!(delete_post impl ContentManagement);
async fn delete_post<B: ContentManagement + 'static>(ctx: RequestContext) -> HandlerResult {
    let id = post_id(&ctx)?;
    let api = ctx.app_data::<ContentApi<B>>()?;
    api.delete_post(id).await?;
    info!("💻️ Post #{id} deleted by {}", ctx.caller()?.subject);
    Ok(HttpResponse::NoContent().finish())
}

//----------------------------------------------   Media  ----------------------------------------------------
handler!(list_media impl MediaStorage);
async fn list_media<M: MediaStorage + 'static>(ctx: RequestContext) -> HandlerResult {
    let api = ctx.app_data::<MediaApi<M>>()?;
    let objects = api.list().await?;
    Ok(HttpResponse::Ok().json(objects))
}

handler!(upload_media impl MediaStorage);
async fn upload_media<M: MediaStorage + 'static>(ctx: RequestContext) -> HandlerResult {
    let key = ctx.param("key")?;
    let content_type = ctx.request.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok());
    let api = ctx.app_data::<MediaApi<M>>()?;
    let object = api.upload(key, content_type, ctx.body.to_vec()).await?;
    info!("💻️ Media object {} ({} bytes) uploaded by {}", object.key, object.size, ctx.caller()?.subject);
    Ok(HttpResponse::Created().json(object))
}

handler!(download_media impl MediaStorage);
async fn download_media<M: MediaStorage + 'static>(ctx: RequestContext) -> HandlerResult {
    let key = ctx.param("key")?;
    let api = ctx.app_data::<MediaApi<M>>()?;
    let (object, data) = api.download(key).await?;
    Ok(HttpResponse::Ok().content_type(object.content_type).body(data))
}

handler!(delete_media impl MediaStorage);
async fn delete_media<M: MediaStorage + 'static>(ctx: RequestContext) -> HandlerResult {
    let key = ctx.param("key")?;
    let api = ctx.app_data::<MediaApi<M>>()?;
    api.delete(key).await?;
    info!("💻️ Media object {key} deleted by {}", ctx.caller()?.subject);
    Ok(HttpResponse::NoContent().finish())
}
