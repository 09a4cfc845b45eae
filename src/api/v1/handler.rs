use super::error::*;
use crate::application_impl::require_admin;
use crate::application_port::*;
use crate::domain_model::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{self, reject};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

fn message(message: &'static str) -> warp::reply::Json {
    warp::reply::json(&MessageResponse { message })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserRequest {
    pub username: String,
    pub password: String,
}

pub async fn register(
    body: UserRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let input = RegisterInput {
        username: body.username,
        password: body.password,
    };
    auth_service
        .register(input)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::with_status(
        message("User created successfully."),
        StatusCode::CREATED,
    ))
}

pub async fn login(
    body: UserRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let input = LoginInput {
        username: body.username,
        password: body.password,
    };
    let tokens = auth_service
        .login(input)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&tokens))
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: AccessToken,
}

pub async fn refresh(
    auth_service: Arc<dyn AuthService>,
    context: AuthContext,
) -> Result<impl warp::Reply, warp::Rejection> {
    let access_token = auth_service
        .refresh(&context)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&RefreshResponse { access_token }))
}

pub async fn logout(
    auth_service: Arc<dyn AuthService>,
    context: AuthContext,
) -> Result<impl warp::Reply, warp::Rejection> {
    auth_service
        .logout(&context)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(message("Successfully logged out."))
}

pub async fn get_user(
    user_id: i64,
    user_service: Arc<dyn UserService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let user = user_service
        .get_user(UserId(user_id))
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&user))
}

pub async fn delete_user(
    user_id: i64,
    user_service: Arc<dyn UserService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    user_service
        .delete_user(UserId(user_id))
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(message("User deleted."))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreRequest {
    pub name: String,
}

pub async fn list_stores(
    store_service: Arc<dyn StoreService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let stores = store_service
        .list_stores()
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&stores))
}

pub async fn create_store(
    body: StoreRequest,
    store_service: Arc<dyn StoreService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let store = store_service
        .create_store(&body.name)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::with_status(
        warp::reply::json(&store),
        StatusCode::CREATED,
    ))
}

pub async fn get_store(
    store_id: i64,
    store_service: Arc<dyn StoreService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let store = store_service
        .get_store(StoreId(store_id))
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&store))
}

pub async fn delete_store(
    store_id: i64,
    store_service: Arc<dyn StoreService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    store_service
        .delete_store(StoreId(store_id))
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(message("Store deleted."))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemRequest {
    pub name: String,
    pub price: f64,
    pub store_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemUpdateRequest {
    pub name: String,
    pub price: f64,
    pub store_id: Option<i64>,
}

pub async fn list_items(
    item_service: Arc<dyn ItemService>,
    _context: AuthContext,
) -> Result<impl warp::Reply, warp::Rejection> {
    let items = item_service
        .list_items()
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&items))
}

pub async fn create_item(
    _context: AuthContext,
    body: ItemRequest,
    item_service: Arc<dyn ItemService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let new_item = NewItem {
        name: body.name,
        price: body.price,
        store_id: StoreId(body.store_id),
    };
    let item = item_service
        .create_item(new_item)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::with_status(
        warp::reply::json(&item),
        StatusCode::CREATED,
    ))
}

pub async fn get_item(
    item_id: i64,
    item_service: Arc<dyn ItemService>,
    _context: AuthContext,
) -> Result<impl warp::Reply, warp::Rejection> {
    let item = item_service
        .get_item(ItemId(item_id))
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&item))
}

pub async fn put_item(
    item_id: i64,
    body: ItemUpdateRequest,
    item_service: Arc<dyn ItemService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let update = ItemUpdate {
        name: body.name,
        price: body.price,
        store_id: body.store_id.map(StoreId),
    };
    let item = item_service
        .put_item(ItemId(item_id), update)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&item))
}

pub async fn delete_item(
    item_id: i64,
    item_service: Arc<dyn ItemService>,
    context: AuthContext,
) -> Result<impl warp::Reply, warp::Rejection> {
    require_admin(&context)
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    item_service
        .delete_item(ItemId(item_id))
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(message("Item deleted."))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct UnlinkResponse {
    pub message: &'static str,
    pub item: Item,
    pub tag: Tag,
}

pub async fn list_tags_in_store(
    store_id: i64,
    tag_service: Arc<dyn TagService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let tags = tag_service
        .list_tags_in_store(StoreId(store_id))
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&tags))
}

pub async fn create_tag_in_store(
    store_id: i64,
    body: TagRequest,
    tag_service: Arc<dyn TagService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let tag = tag_service
        .create_tag_in_store(StoreId(store_id), &body.name)
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::with_status(
        warp::reply::json(&tag),
        StatusCode::CREATED,
    ))
}

pub async fn link_tag(
    item_id: i64,
    tag_id: i64,
    tag_service: Arc<dyn TagService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let tag = tag_service
        .link_tag(ItemId(item_id), TagId(tag_id))
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::with_status(
        warp::reply::json(&tag),
        StatusCode::CREATED,
    ))
}

pub async fn unlink_tag(
    item_id: i64,
    tag_id: i64,
    tag_service: Arc<dyn TagService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let Unlinked { item, tag } = tag_service
        .unlink_tag(ItemId(item_id), TagId(tag_id))
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&UnlinkResponse {
        message: "Item removed from tag",
        item,
        tag,
    }))
}

pub async fn get_tag(
    tag_id: i64,
    tag_service: Arc<dyn TagService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let tag = tag_service
        .get_tag(TagId(tag_id))
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&tag))
}

pub async fn delete_tag(
    tag_id: i64,
    tag_service: Arc<dyn TagService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    tag_service
        .delete_tag(TagId(tag_id))
        .await
        .map_err(ApiError::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::with_status(
        message("Tag deleted."),
        StatusCode::ACCEPTED,
    ))
}
