//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

use crate::core::ServerState;
use crate::utils::validation::{
    MAX_CATEGORY_LEN, MAX_IMAGE_LEN, MAX_NAME_LEN, validate_optional_text, validate_price,
    validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Categories every store starts with; in-use categories are merged in
const DEFAULT_CATEGORIES: [&str; 5] = ["Breakfast", "Lunch", "Dinner", "Snacks", "Beverages"];

/// List the full catalog, ascending by id
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Vec<MenuItem>>>> {
    Ok(ok(state.storage.list_menu_items()?))
}

/// Get one menu item
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<u32>,
) -> AppResult<Json<AppResponse<MenuItem>>> {
    let item = state
        .storage
        .get_menu_item(id)?
        .ok_or_else(|| AppError::not_found(format!("Menu item {id}")))?;
    Ok(ok(item))
}

/// Create a menu item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<AppResponse<MenuItem>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.category, "category", MAX_CATEGORY_LEN)?;
    validate_price(payload.price, "price")?;
    if payload.image.len() > MAX_IMAGE_LEN {
        return Err(AppError::validation("image is too large"));
    }

    Ok(ok(state.storage.insert_menu_item(payload)?))
}

/// Partially update a menu item
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<u32>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<AppResponse<MenuItem>>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(category) = &payload.category {
        validate_required_text(category, "category", MAX_CATEGORY_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_price(price, "price")?;
    }
    validate_optional_text(&payload.image, "image", MAX_IMAGE_LEN)?;

    let item = state
        .storage
        .update_menu_item(id, payload)?
        .ok_or_else(|| AppError::not_found(format!("Menu item {id}")))?;
    Ok(ok(item))
}

/// Delete a menu item. Historical orders and cart lines keep their
/// snapshots; the id is never reissued.
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<u32>,
) -> AppResult<Json<AppResponse<u32>>> {
    if !state.storage.delete_menu_item(id)? {
        return Err(AppError::not_found(format!("Menu item {id}")));
    }
    Ok(ok(id))
}

/// Category list: the defaults plus every category in use
pub async fn categories(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<String>>>> {
    let mut categories: Vec<String> = DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect();
    for item in state.storage.list_menu_items()? {
        if !categories.contains(&item.category) {
            categories.push(item.category);
        }
    }
    Ok(ok(categories))
}
