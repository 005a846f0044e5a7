use crate::AppState;
use crate::api::error::AppError;
use crate::utils::auth::verify_token;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Authorization gate: a syntactically valid, unexpired, correctly signed
/// bearer token attaches the principal to the request; anything else
/// short-circuits with 401. Routes without this layer are public.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return Err(AppError::Unauthorized("Unauthorized".to_string()));
    };

    let claims = verify_token(token, &state.config.jwt_secret)
        .map_err(|_| AppError::Unauthorized("Unauthorized".to_string()))?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
