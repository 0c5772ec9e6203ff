use axum::{
    extract::{Request, State},
    http::{self, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::app_state::SharedAppState;

/// The authenticated user attached to request extensions
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub token: String,
}

/// Session-token authentication middleware.
///
/// Accepts tokens with or without a "Bearer " prefix. A valid, unexpired
/// session puts a [`CurrentUser`] into the request extensions; anything else
/// ends the request with 401.
pub async fn auth(
    State(state): State<SharedAppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let Some(auth_header) = auth_header else {
        warn!(
            "Missing Authorization header | {} {} | user_agent: {:?}",
            req.method(),
            req.uri(),
            req.headers()
                .get("user-agent")
                .and_then(|h| h.to_str().ok())
                .unwrap_or("unknown")
        );
        return Err(StatusCode::UNAUTHORIZED);
    };

    let token = auth_header.strip_prefix("Bearer ").unwrap_or(auth_header);

    match state.sessions.get(token) {
        Some(session) => {
            debug!("User authenticated: {} <{}>", session.name, session.email);
            req.extensions_mut().insert(CurrentUser {
                email: session.email,
                name: session.name,
                roles: session.roles,
                token: session.token,
            });
            Ok(next.run(req).await)
        }
        None => {
            warn!(
                "Authentication failed for {} {} | unknown or expired session token",
                req.method(),
                req.uri()
            );
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
