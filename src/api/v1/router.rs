use super::error::*;
use super::handler;
use crate::application_impl::TokenGuard;
use crate::domain_model::{AuthContext, TokenRequirement};
use crate::server::*;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, reject};

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    user_routes(server.clone())
        .or(store_routes(server.clone()))
        .or(item_routes(server.clone()))
        .or(tag_routes(server))
}

fn user_routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let register = warp::post()
        .and(warp::path("register"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::register);

    let login = warp::post()
        .and(warp::path("login"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::login);

    let refresh = warp::post()
        .and(warp::path("refresh"))
        .and(warp::path::end())
        .and(with(server.auth_service.clone()))
        .and(with_token(server.token_guard.clone(), TokenRequirement::Refresh))
        .and_then(handler::refresh);

    let logout = warp::post()
        .and(warp::path("logout"))
        .and(warp::path::end())
        .and(with(server.auth_service.clone()))
        .and(with_token(server.token_guard.clone(), TokenRequirement::Access))
        .and_then(handler::logout);

    let get_user = warp::get()
        .and(warp::path!("user" / i64))
        .and(with(server.user_service.clone()))
        .and_then(handler::get_user);

    let delete_user = warp::delete()
        .and(warp::path!("user" / i64))
        .and(with(server.user_service.clone()))
        .and_then(handler::delete_user);

    register
        .or(login)
        .or(refresh)
        .or(logout)
        .or(get_user)
        .or(delete_user)
}

fn store_routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let list = warp::get()
        .and(warp::path!("store"))
        .and(with(server.store_service.clone()))
        .and_then(handler::list_stores);

    let create = warp::post()
        .and(warp::path!("store"))
        .and(warp::body::json())
        .and(with(server.store_service.clone()))
        .and_then(handler::create_store);

    let get = warp::get()
        .and(warp::path!("store" / i64))
        .and(with(server.store_service.clone()))
        .and_then(handler::get_store);

    let delete = warp::delete()
        .and(warp::path!("store" / i64))
        .and(with(server.store_service.clone()))
        .and_then(handler::delete_store);

    list.or(create).or(get).or(delete)
}

fn item_routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let guard = server.token_guard.clone();

    let list = warp::get()
        .and(warp::path!("item"))
        .and(with(server.item_service.clone()))
        .and(with_token(guard.clone(), TokenRequirement::Access))
        .and_then(handler::list_items);

    let create = warp::post()
        .and(warp::path!("item"))
        .and(with_token(guard.clone(), TokenRequirement::FreshAccess))
        .and(warp::body::json())
        .and(with(server.item_service.clone()))
        .and_then(handler::create_item);

    let get = warp::get()
        .and(warp::path!("item" / i64))
        .and(with(server.item_service.clone()))
        .and(with_token(guard.clone(), TokenRequirement::Access))
        .and_then(handler::get_item);

    let put = warp::put()
        .and(warp::path!("item" / i64))
        .and(warp::body::json())
        .and(with(server.item_service.clone()))
        .and_then(handler::put_item);

    let delete = warp::delete()
        .and(warp::path!("item" / i64))
        .and(with(server.item_service.clone()))
        .and(with_token(guard, TokenRequirement::Access))
        .and_then(handler::delete_item);

    list.or(create).or(get).or(put).or(delete)
}

fn tag_routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let list_in_store = warp::get()
        .and(warp::path!("store" / i64 / "tag"))
        .and(with(server.tag_service.clone()))
        .and_then(handler::list_tags_in_store);

    let create_in_store = warp::post()
        .and(warp::path!("store" / i64 / "tag"))
        .and(warp::body::json())
        .and(with(server.tag_service.clone()))
        .and_then(handler::create_tag_in_store);

    let link = warp::post()
        .and(warp::path!("item" / i64 / "tag" / i64))
        .and(with(server.tag_service.clone()))
        .and_then(handler::link_tag);

    let unlink = warp::delete()
        .and(warp::path!("item" / i64 / "tag" / i64))
        .and(with(server.tag_service.clone()))
        .and_then(handler::unlink_tag);

    let get = warp::get()
        .and(warp::path!("tag" / i64))
        .and(with(server.tag_service.clone()))
        .and_then(handler::get_tag);

    let delete = warp::delete()
        .and(warp::path!("tag" / i64))
        .and(with(server.tag_service.clone()))
        .and_then(handler::delete_tag);

    list_in_store
        .or(create_in_store)
        .or(link)
        .or(unlink)
        .or(get)
        .or(delete)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

/// Runs the token guard. A missing header is not a routing failure here; the
/// guard turns it into the `authorized_required` body.
fn with_token(
    guard: Arc<TokenGuard>,
    requirement: TokenRequirement,
) -> impl Filter<Extract = (AuthContext,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>("authorization").and_then(
        move |authorization: Option<String>| {
            let guard = guard.clone();
            async move {
                guard
                    .authorize(authorization.as_deref(), requirement)
                    .await
                    .map_err(ApiError::from)
                    .map_err(reject::custom)
            }
        },
    )
}
