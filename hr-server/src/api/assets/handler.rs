//! Asset API Handlers

use axum::Json;
use axum::extract::State;
use http::StatusCode;
use shared::models::{AssetDto, AssetQuery, CreateAssetDto, UpdateAssetDto};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::utils::response::{created, found, not_found_error, success, success_message};
use crate::utils::{ApiResponse, AppResult};

/// GET /api/Asset - List assets
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<AssetQuery>,
) -> AppResult<Json<ApiResponse<Vec<AssetDto>>>> {
    let assets = state.assets.list_assets(query).await?;
    Ok(success(assets))
}

/// GET /api/Asset/{id} - Get asset by ID
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<AssetDto>>> {
    let asset = found(state.assets.get_asset(id).await?, "Asset", id)?;
    Ok(success(asset))
}

/// POST /api/Asset - Create an asset
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateAssetDto>,
) -> AppResult<(StatusCode, Json<ApiResponse<AssetDto>>)> {
    tracing::info!(
        user_id = %current_user.log_id(),
        asset_tag = %payload.asset_tag,
        "Creating asset"
    );

    let asset = state.assets.create_asset(payload).await?;
    Ok(created(asset, "Asset created successfully"))
}

/// PUT /api/Asset/{id} - Update an asset
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateAssetDto>,
) -> AppResult<Json<ApiResponse<AssetDto>>> {
    tracing::info!(user_id = %current_user.log_id(), asset_id = id, "Updating asset");

    let asset = found(state.assets.update_asset(id, payload).await?, "Asset", id)?;
    Ok(success(asset))
}

/// DELETE /api/Asset/{id} - Delete an asset
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    tracing::info!(user_id = %current_user.log_id(), asset_id = id, "Deleting asset");

    if !state.assets.delete_asset(id).await? {
        return Err(not_found_error(format!("Asset with ID {id} not found"), Vec::new()));
    }
    Ok(success_message("Asset deleted successfully"))
}
