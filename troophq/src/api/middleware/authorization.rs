use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Extension,
};
use std::collections::HashMap;
use tracing::{debug, warn};

use troophq_core::authorization::{Capability, Scope};

use crate::api::basic_auth::CurrentUser;
use crate::app_state::SharedAppState;

/// Authorization context added to request extensions: the user's effective
/// scope per capability code, merged across all roles they hold
#[derive(Clone, Debug)]
pub struct AuthorizationContext {
    pub user: CurrentUser,
    pub effective_scopes: HashMap<String, Scope>,
}

/// The scope granted by the capability middleware, for the downstream
/// handler to parameterize its data query with (e.g. troop-wide vs. a
/// single household)
#[derive(Clone, Copy, Debug)]
pub struct GrantedScope(pub Scope);

/// Middleware that resolves the user's effective scopes once per request
pub async fn authorization_middleware(
    State(state): State<SharedAppState>,
    Extension(user): Extension<CurrentUser>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let privileges = &state.privileges;

    let effective_scopes: HashMap<String, Scope> = Capability::all()
        .into_iter()
        .map(|capability| {
            (
                capability.as_str().to_string(),
                privileges.effective_scope(&user.roles, capability),
            )
        })
        .collect();

    debug!(
        "User {} with roles {:?} resolved scopes for {} capabilities",
        user.email,
        user.roles,
        effective_scopes.len()
    );

    req.extensions_mut().insert(AuthorizationContext {
        user,
        effective_scopes,
    });

    Ok(next.run(req).await)
}

/// Middleware factory that gates a route on one capability.
///
/// No scope at all for the capability ends the request with 403; otherwise
/// the granted scope is inserted into the request extensions.
pub fn require_capability(
    capability: Capability,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<
    Box<dyn std::future::Future<Output = Result<Response, StatusCode>> + Send>,
> + Clone {
    move |mut req: Request, next: Next| {
        Box::pin(async move {
            let scope = {
                let auth_context: &AuthorizationContext =
                    req.extensions().get().ok_or_else(|| {
                        warn!("Authorization context not found in request");
                        StatusCode::INTERNAL_SERVER_ERROR
                    })?;

                let scope = auth_context
                    .effective_scopes
                    .get(capability.as_str())
                    .copied()
                    .unwrap_or(Scope::None);

                if !scope.permits() {
                    warn!(
                        "Access denied: user {} lacks capability {}",
                        auth_context.user.email,
                        capability.as_str()
                    );
                    return Err(StatusCode::FORBIDDEN);
                }

                debug!(
                    "Access granted: user {} may {} at {} scope",
                    auth_context.user.email,
                    capability.as_str(),
                    scope
                );
                scope
            };

            req.extensions_mut().insert(GrantedScope(scope));

            Ok(next.run(req).await)
        })
    }
}
