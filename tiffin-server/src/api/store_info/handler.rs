//! Store Info API Handlers

use axum::{Json, extract::State};
use shared::models::{StoreInfo, StoreInfoUpdate};

use crate::core::ServerState;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Current store info
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<AppResponse<StoreInfo>>> {
    Ok(ok(state.storage.store_info()?))
}

/// Rename the store. Existing orders keep the name they were
/// confirmed under.
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<StoreInfoUpdate>,
) -> AppResult<Json<AppResponse<StoreInfo>>> {
    let name = payload
        .name
        .ok_or_else(|| AppError::validation("name is required"))?;
    validate_required_text(&name, "name", MAX_NAME_LEN)?;

    let info = StoreInfo { name };
    state.storage.set_store_info(&info)?;
    Ok(ok(info))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rename_persists_but_history_keeps_snapshots() {
        let state = ServerState::for_tests();
        state.cart.add_item(1).unwrap();
        let before = state.orders.confirm_order().unwrap();

        let renamed = update(
            State(state.clone()),
            Json(StoreInfoUpdate {
                name: Some("Tiffin Corner".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(renamed.0.data.unwrap().name, "Tiffin Corner");

        assert_eq!(
            get(State(state.clone())).await.unwrap().0.data.unwrap().name,
            "Tiffin Corner"
        );
        let logged = state.storage.get_order(before.order_id).unwrap().unwrap();
        assert_eq!(logged.restaurant_name, "Restaurant");
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let state = ServerState::for_tests();
        assert!(
            update(
                State(state),
                Json(StoreInfoUpdate {
                    name: Some("   ".to_string())
                })
            )
            .await
            .is_err()
        );
    }
}
