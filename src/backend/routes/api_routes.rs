/**
 * Account API Routes
 *
 * # Routes
 *
 * ## Public
 * - `POST /register` - User registration
 * - `POST /login` - Issue access and refresh tokens
 * - `POST /token/refresh` - Exchange a refresh token for an access token
 *
 * ## Authenticated (bearer access token)
 * - `POST /logout` - Revoke a refresh token
 * - `PUT /update` - Partial profile update, JSON or multipart
 * - `DELETE /delete` - Delete the account
 * - `GET /detail` - Profile of the caller
 * - `PUT /change-password` - Replace the password
 *
 * Paths are relative; `create_router` nests them under the configured
 * prefix.
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};

use crate::backend::auth::handlers::{
    change_password, delete_account, detail, login, logout, refresh_token, register,
    update_profile,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure the account routes
///
/// The auth middleware is attached with `route_layer`, so it only runs for
/// requests that matched a protected route; unknown paths still 404.
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/update", put(update_profile))
        .route("/delete", delete(delete_account))
        .route("/detail", get(detail))
        .route("/change-password", put(change_password))
        .route_layer(from_fn_with_state(app_state, auth_middleware));

    router
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/token/refresh", post(refresh_token))
        .merge(protected)
}
