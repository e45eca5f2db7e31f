//! HTTP route handlers for the bookstore backend.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Liveness check
//! GET    /health/ready              - Readiness check (pings the store)
//!
//! # Accounts
//! POST   /user/signup               - Create an account, returns a token
//! POST   /user/login                - Exchange credentials for a token
//! GET    /user/profile              - Caller's profile (requires auth)
//! PATCH  /user/profile/password     - Replace password (requires auth)
//!
//! # Cart (requires auth)
//! PATCH  /cart/add                  - Add a book to the cart by title
//! PATCH  /cart/update/{id}          - Increment one line's quantity
//! PATCH  /cart/remove/{id}          - Remove one line
//!
//! # Catalog
//! GET    /books                     - Every title
//! GET    /books/{parameter}         - Field-equality search
//!
//! # Catalog administration (requires admin)
//! POST   /admin/book                - Add a book
//! PATCH  /admin/book/{book_id}      - Partial update
//! DELETE /admin/book/{book_id}      - Delete a book
//! ```

pub mod books;
pub mod cart;
pub mod user;

use axum::{
    Json,
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
};
use serde_json::json;

use crate::state::AppState;

/// Create the account routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(user::signup))
        .route("/login", post(user::login))
        .route("/profile", get(user::profile))
        .route("/profile/password", patch(user::update_password))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", patch(cart::add))
        .route("/update/{id}", patch(cart::update))
        .route("/remove/{id}", patch(cart::remove))
}

/// Create the public catalog routes router.
pub fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(books::list_titles))
        .route("/{parameter}", get(books::search))
}

/// Create the admin catalog routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/book", post(books::add_book))
        .route(
            "/book/{book_id}",
            patch(books::update_book).delete(books::delete_book),
        )
}

/// Assemble the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .nest("/user", user_routes())
        .nest("/cart", cart_routes())
        .nest("/books", book_routes())
        .nest("/admin", admin_routes())
}

/// `GET /health` - liveness.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /health/ready` - readiness; pings the store.
async fn ready(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match state.store().ping().await {
        Ok(()) => Ok(Json(json!({ "status": "ready" }))),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
