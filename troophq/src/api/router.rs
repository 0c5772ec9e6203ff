use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;

use troophq_core::authorization::Capability;
use troophq_core::authorization::CapabilityCategory;
use troophq_core::authorization::CapabilityInfo;
use troophq_core::authorization::Scope;

use utoipa::openapi::security::SecurityScheme;
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::capabilities::__path_list_capabilities_handler;
use crate::api::handlers::capabilities::list_capabilities_handler;
use crate::api::handlers::capabilities::CapabilityCatalogResponse;
use crate::api::handlers::health::__path_health_checker_handler;
use crate::api::handlers::health::health_checker_handler;
use crate::api::handlers::info::__path_info_handler;
use crate::api::handlers::info::info_handler;
use crate::api::handlers::info::ServerInfo;
use crate::api::handlers::login::__path_login_handler;
use crate::api::handlers::login::__path_logout_handler;
use crate::api::handlers::login::login_handler;
use crate::api::handlers::login::logout_handler;
use crate::api::handlers::login::{LoginRequest, LoginResponse};
use crate::api::handlers::roles::__path_list_roles_handler;
use crate::api::handlers::roles::list_roles_handler;
use crate::api::handlers::roles::{RoleInfo, RoleListResponse};
use crate::api::handlers::scopes::__path_list_user_scopes_handler;
use crate::api::handlers::scopes::list_user_scopes_handler;
use crate::api::handlers::scopes::{ScopeGrant, UserScopesResponse};
use crate::api::rate_limiting::{create_authenticated_limiter, create_login_limiter};
use crate::app_state::SharedAppState;

use super::basic_auth::auth;
use super::middleware::authorization::{authorization_middleware, require_capability};

#[derive(OpenApi)]
#[openapi(
    paths(
        health_checker_handler,
        info_handler,
        login_handler,
        logout_handler,
        list_capabilities_handler,
        list_user_scopes_handler,
        list_roles_handler,
    ),
    components(
        schemas(
            LoginRequest, LoginResponse, CapabilityCatalogResponse, CapabilityInfo,
            CapabilityCategory, Capability, Scope, ScopeGrant, UserScopesResponse,
            RoleInfo, RoleListResponse, ServerInfo
        )
    ),
    tags(
        (name = "troophq-service", description = "troophq api")
    ),
    modifiers(&SecurityAddon)
)]
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap(); // we can unwrap safely since there already is components registered.
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        )
    }
}

struct ApiDoc;

impl utoipa::OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        SecurityAddon::openapi()
    }
}

pub struct ApiRoutes;

impl ApiRoutes {
    pub fn create(state: SharedAppState) -> Router {
        let api = ApiDoc::openapi();
        let rate_limiting = state.settings.rate_limiting.clone();

        let authenticated_router = Router::new()
            .route("/api/v1/authenticated/logout", post(logout_handler))
            .route(
                "/api/v1/authenticated/capabilities",
                get(list_capabilities_handler),
            )
            .route(
                "/api/v1/authenticated/scopes",
                get(list_user_scopes_handler),
            )
            // role administration needs the settings capability
            .route(
                "/api/v1/authenticated/roles",
                get(list_roles_handler).layer(middleware::from_fn(require_capability(
                    Capability::ManageSettings,
                ))),
            )
            // Apply authorization middleware to all authenticated routes
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                authorization_middleware,
            ))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth));

        let authenticated_router =
            if rate_limiting.enabled && rate_limiting.authenticated.is_enabled() {
                authenticated_router
                    .route_layer(create_authenticated_limiter(&rate_limiting.authenticated))
            } else {
                authenticated_router
            };

        let login_route = if rate_limiting.enabled && rate_limiting.login.is_enabled() {
            post(login_handler).layer(create_login_limiter(&rate_limiting.login))
        } else {
            post(login_handler)
        };

        let public_router = Router::new()
            .route("/api/v1/login", login_route)
            .route("/api/v1/health", get(health_checker_handler))
            .route("/api/v1/info", get(info_handler))
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
            .with_state(state.clone());

        Router::new()
            .merge(authenticated_router)
            .merge(public_router)
            .with_state(state.clone())
    }
}
