// HTTP front for the storefront back-office
// Every admin action maps to one route; controller outcomes become either a
// 303 redirect to a listing or a JSON page.

pub mod config;
pub mod error;

#[cfg(feature = "auth")]
pub mod auth;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use storefront_identity::admin::{
    ActionOutcome, AddUserForm, AdminController, ClaimForm, EditUserForm, Redirect as Listing,
    RoleForm, UserRoleForm,
};
use storefront_identity::IdentityStore;

pub use config::ServerConfig;
pub use error::{Result, ServerError};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<AdminController>,
    #[cfg(feature = "auth")]
    pub guard: Arc<auth::AdminGuard>,
}

impl AppState {
    pub fn new(store: Arc<dyn IdentityStore>, config: &ServerConfig) -> Self {
        #[cfg(not(feature = "auth"))]
        let _ = config;
        Self {
            controller: Arc::new(AdminController::new(store)),
            #[cfg(feature = "auth")]
            guard: Arc::new(auth::AdminGuard::new(&config.jwt_secret, config.admin_role.clone())),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/", get(index))
        .route("/claims", get(claim_catalog))
        .route("/users", get(user_management))
        .route("/users/new", get(add_user_page).post(add_user))
        .route("/users/:id/edit", get(edit_user_page).post(edit_user))
        .route("/users/:id/delete", post(delete_user))
        .route("/users/:id/claims", get(manage_claims_for_user))
        .route("/users/:id/claims/add", post(add_claim_for_user))
        .route("/users/:id/claims/remove", post(remove_claim_from_user))
        .route("/roles", get(role_management))
        .route("/roles/new", get(add_role_page).post(add_role))
        .route("/roles/:id/edit", get(edit_role_page).post(edit_role))
        .route("/roles/:id/delete", post(delete_role))
        .route("/roles/:id/claims", get(manage_claims_for_role))
        .route("/roles/:id/claims/add", post(add_claim_for_role))
        .route("/roles/:id/claims/remove", post(remove_claim_from_role))
        .route(
            "/roles/:id/members/add",
            get(add_user_to_role_page).post(add_user_to_role),
        )
        .route(
            "/roles/:id/members/remove",
            get(remove_user_from_role_page).post(remove_user_from_role),
        );

    #[cfg(feature = "auth")]
    let admin = admin.route_layer(axum::middleware::from_fn_with_state(
        state.clone(),
        auth::require_admin,
    ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/admin", admin)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub fn location(target: Listing) -> &'static str {
    match target {
        Listing::UserManagement => "/admin/users",
        Listing::RoleManagement => "/admin/roles",
    }
}

/// 303 to the listing, or the page as JSON (422 when it carries errors)
pub fn render(outcome: ActionOutcome) -> Response {
    match outcome {
        ActionOutcome::Redirect(target) => Redirect::to(location(target)).into_response(),
        ActionOutcome::Render(page) => {
            let status = if page.has_errors() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::OK
            };
            (status, Json(page)).into_response()
        }
    }
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn index() -> Response {
    render(ActionOutcome::Redirect(Listing::UserManagement))
}

async fn claim_catalog(State(state): State<AppState>) -> Response {
    render(state.controller.claim_catalog())
}

// ─── Users ───

async fn user_management(State(state): State<AppState>) -> Response {
    render(state.controller.user_management().await)
}

async fn add_user_page(State(state): State<AppState>) -> Response {
    render(state.controller.add_user_page())
}

async fn add_user(State(state): State<AppState>, Form(form): Form<AddUserForm>) -> Response {
    render(state.controller.add_user(form).await)
}

async fn edit_user_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    render(state.controller.edit_user_page(&id).await)
}

async fn edit_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<EditUserForm>,
) -> Response {
    render(state.controller.edit_user(&id, form).await)
}

async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    render(state.controller.delete_user(&id).await)
}

async fn manage_claims_for_user(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    render(state.controller.manage_claims_for_user(&id).await)
}

async fn add_claim_for_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ClaimForm>,
) -> Response {
    render(state.controller.add_claim_for_user(&id, form).await)
}

async fn remove_claim_from_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ClaimForm>,
) -> Response {
    render(state.controller.remove_claim_from_user(&id, form).await)
}

// ─── Roles ───

async fn role_management(State(state): State<AppState>) -> Response {
    render(state.controller.role_management().await)
}

async fn add_role_page(State(state): State<AppState>) -> Response {
    render(state.controller.add_role_page())
}

async fn add_role(State(state): State<AppState>, Form(form): Form<RoleForm>) -> Response {
    render(state.controller.add_role(form).await)
}

async fn edit_role_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    render(state.controller.edit_role_page(&id).await)
}

async fn edit_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<RoleForm>,
) -> Response {
    render(state.controller.edit_role(&id, form).await)
}

async fn delete_role(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    render(state.controller.delete_role(&id).await)
}

async fn manage_claims_for_role(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    render(state.controller.manage_claims_for_role(&id).await)
}

async fn add_claim_for_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ClaimForm>,
) -> Response {
    render(state.controller.add_claim_for_role(&id, form).await)
}

async fn remove_claim_from_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ClaimForm>,
) -> Response {
    render(state.controller.remove_claim_from_role(&id, form).await)
}

// ─── Membership ───

async fn add_user_to_role_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    render(state.controller.add_user_to_role_page(&id).await)
}

async fn add_user_to_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<UserRoleForm>,
) -> Response {
    render(state.controller.add_user_to_role(&id, form).await)
}

async fn remove_user_from_role_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    render(state.controller.remove_user_from_role_page(&id).await)
}

async fn remove_user_from_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<UserRoleForm>,
) -> Response {
    render(state.controller.remove_user_from_role(&id, form).await)
}
