//! Setup Wizard API Handlers

use axum::Json;
use axum::extract::State;
use shared::models::{
    AdminSetupDto, CompanySetupDto, DefaultsSetupDto, SetupAdminResultDto, SetupStatusDto,
};

use crate::core::ServerState;
use crate::utils::extract::ValidatedJson;
use crate::utils::response::{success, success_with_message};
use crate::utils::{ApiResponse, AppError, AppResult};

type StatusResponse = AppResult<Json<ApiResponse<SetupStatusDto>>>;

/// GET /api/Setup/status
pub async fn status(State(state): State<ServerState>) -> StatusResponse {
    Ok(success(state.setup.status().await?))
}

/// POST /api/Setup/company
pub async fn company(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<CompanySetupDto>,
) -> StatusResponse {
    let status = state.setup.configure_company(payload).await?;
    Ok(success_with_message(status, "Company profile saved"))
}

/// POST /api/Setup/admin - creates the administrator and signs them in
pub async fn admin(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<AdminSetupDto>,
) -> AppResult<Json<ApiResponse<SetupAdminResultDto>>> {
    let mut result = state.setup.create_admin(payload).await?;
    let permissions = state.roles.user_roles(&result.user_id).await?.permissions;

    let token = state
        .get_jwt_service()
        .generate_token(
            &result.user_id,
            Some(result.employee_id),
            &result.full_name,
            &result.role,
            &permissions,
        )
        .map_err(|e| AppError::internal(format!("Failed to issue administrator token: {e}")))?;
    result.token = Some(token);

    tracing::info!(user_id = %result.user_id, "Setup administrator signed in");
    Ok(success_with_message(result, "Administrator account created"))
}

/// POST /api/Setup/defaults
pub async fn defaults(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<DefaultsSetupDto>,
) -> StatusResponse {
    let status = state.setup.apply_defaults(payload).await?;
    Ok(success_with_message(status, "Organisation defaults applied"))
}

/// POST /api/Setup/complete
pub async fn complete(State(state): State<ServerState>) -> StatusResponse {
    let status = state.setup.complete().await?;
    Ok(success_with_message(status, "Setup completed"))
}
