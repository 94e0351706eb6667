use contracts::shared::error::ApiError;
use contracts::system::auth::{LoginRequest, LoginResponse, MeResponse, SessionUser};

use crate::shared::api_utils::{get_json, post_public};

/// Login with e-mail and password
pub async fn login(email: String, password: String) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest { email, password };
    post_public("/auth/login", &request).await
}

/// Get current user info for the stored token
pub async fn get_current_user() -> Result<SessionUser, ApiError> {
    get_json::<MeResponse>("/auth/me")
        .await
        .map(MeResponse::into_user)
}
