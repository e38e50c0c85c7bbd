//! Router integration tests: routes, redirects, JSON pages, admin gate

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, LOCATION};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use storefront_admin_server::{router, AppState, ServerConfig};
use storefront_identity::{IdentityActor, IdentityConfig, IdentityStore};

const SECRET: &str = "test-secret-jwt-key-min-32-chars!!";

async fn test_app() -> Router {
    let config = ServerConfig::new(SECRET)
        .with_identity(IdentityConfig::new().with_hash_cost(64, 1));
    let store: Arc<dyn IdentityStore> =
        Arc::new(IdentityActor::spawn(config.identity.clone()).await.unwrap());
    router(AppState::new(store, &config))
}

#[cfg(feature = "auth")]
fn token_with_roles(roles: &[&str]) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use storefront_admin_server::auth::AdminClaims;

    let claims = AdminClaims {
        sub: "admin".into(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

#[cfg(feature = "auth")]
fn admin_token() -> String {
    token_with_roles(&["Administrators"])
}

#[cfg(not(feature = "auth"))]
fn admin_token() -> String {
    String::new()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", admin_token()))
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {}", admin_token()))
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

async fn json(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(resp: &Response) -> &str {
    resp.headers()[LOCATION].to_str().unwrap()
}

const ALICE: &str = "user_name=alice&email=alice%40example.com&password=Secure%21Pass1\
                     &birthdate=1990-04-02&city=Brussels&country=Belgium";

async fn first_id(app: &Router, listing: &str, key: &str) -> String {
    let page = json(send(app, get(listing)).await).await;
    page[key][0]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_is_public() {
    let app = test_app().await;
    let resp = send(
        &app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json(resp).await["status"], "healthy");
}

#[tokio::test]
async fn test_admin_root_redirects_to_users() {
    let app = test_app().await;
    let resp = send(&app, get("/admin")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/users");
}

#[tokio::test]
async fn test_claim_catalog_route() {
    let app = test_app().await;
    let resp = send(&app, get("/admin/claims")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let page = json(resp).await;
    assert_eq!(page["view"], "claim_catalog");
    assert_eq!(page["claims"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_add_user_then_list() {
    let app = test_app().await;

    let resp = send(&app, post_form("/admin/users/new", ALICE)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/users");

    let page = json(send(&app, get("/admin/users")).await).await;
    assert_eq!(page["view"], "user_management");
    assert_eq!(page["users"][0]["user_name"], "alice");
    assert_eq!(page["errors"], serde_json::json!([]));
}

#[tokio::test]
async fn test_invalid_user_form_is_unprocessable() {
    let app = test_app().await;

    let resp = send(&app, post_form("/admin/users/new", "user_name=alice")).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let page = json(resp).await;
    assert_eq!(page["view"], "add_user");
    assert_eq!(page["form"]["user_name"], "alice");
    assert!(page["form"].get("password").is_none());
    assert_eq!(page["errors"][0], "Please enter the email address");
}

#[tokio::test]
async fn test_edit_missing_user_redirects() {
    let app = test_app().await;
    let resp = send(&app, get("/admin/users/ghost-1/edit")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/users");

    let resp = send(&app, post_form("/admin/users/ghost-1/edit", "")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/users");
}

#[tokio::test]
async fn test_delete_missing_role_renders_listing() {
    let app = test_app().await;
    let resp = send(&app, post_form("/admin/roles/ghost-r/delete", "")).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let page = json(resp).await;
    assert_eq!(page["view"], "role_management");
    assert_eq!(page["errors"][0], "This role can't be found.");
}

#[tokio::test]
async fn test_role_claims_over_http() {
    let app = test_app().await;
    send(&app, post_form("/admin/roles/new", "role_name=Managers")).await;
    let role_id = first_id(&app, "/admin/roles", "roles").await;

    let uri = format!("/admin/roles/{role_id}/claims/add");
    let resp = send(&app, post_form(&uri, "claim_type=CanEditPrices")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/roles");

    let resp = send(&app, post_form(&uri, "claim_type=CanEditPrices")).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let page = json(resp).await;
    assert_eq!(page["view"], "manage_claims_for_role");
    assert_eq!(
        page["errors"][0],
        "Role already has this claim, no update was executed."
    );
    assert_eq!(page["claims"][0]["type"], "CanEditPrices");

    let page = json(send(&app, get(&format!("/admin/roles/{role_id}/edit"))).await).await;
    assert_eq!(page["view"], "edit_role");
    assert_eq!(page["role_name"], "Managers");
}

#[tokio::test]
async fn test_membership_over_http() {
    let app = test_app().await;
    send(&app, post_form("/admin/users/new", ALICE)).await;
    send(&app, post_form("/admin/roles/new", "role_name=Managers")).await;
    let user_id = first_id(&app, "/admin/users", "users").await;
    let role_id = first_id(&app, "/admin/roles", "roles").await;

    let page = json(send(&app, get(&format!("/admin/roles/{role_id}/members/add"))).await).await;
    assert_eq!(page["view"], "add_user_to_role");
    assert_eq!(page["users"].as_array().unwrap().len(), 1);

    let form = format!("user_id={user_id}");
    let resp = send(
        &app,
        post_form(&format!("/admin/roles/{role_id}/members/add"), &form),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let page = json(send(&app, get(&format!("/admin/roles/{role_id}/members/remove"))).await).await;
    assert_eq!(page["view"], "delete_user_from_role");
    assert_eq!(page["users"][0]["id"], user_id.as_str());

    let remove = format!("/admin/roles/{role_id}/members/remove");
    assert_eq!(
        send(&app, post_form(&remove, &form)).await.status(),
        StatusCode::SEE_OTHER
    );
    let resp = send(&app, post_form(&remove, &form)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json(resp).await["errors"][0], "User is not in role 'Managers'.");
}

#[cfg(feature = "auth")]
#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = test_app().await;

    let resp = send(
        &app,
        Request::builder().uri("/admin/users").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = send(
        &app,
        Request::builder()
            .uri("/admin/users")
            .header(AUTHORIZATION, "Bearer invalid.token.here")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[cfg(feature = "auth")]
#[tokio::test]
async fn test_non_administrator_is_forbidden() {
    let app = test_app().await;
    let resp = send(
        &app,
        Request::builder()
            .uri("/admin/users")
            .header(
                AUTHORIZATION,
                format!("Bearer {}", token_with_roles(&["Managers"])),
            )
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
