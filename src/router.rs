// region:    --- Imports
use crate::handlers::{account, listing, watchlist};
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

// endregion: --- Imports

/// 라우터 설정
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(listing::index))
        .route("/register", get(account::register_form).post(account::register))
        .route("/login", get(account::login_form).post(account::login))
        .route("/logout", get(account::logout))
        .route("/create", get(listing::create_form).post(listing::create))
        .route("/bid/:id", get(listing::bid_page).post(listing::bid))
        .route("/success", get(listing::success))
        .route("/watchlist", get(watchlist::view_watchlist))
        .route("/watchlist/:action/:id", get(watchlist::toggle))
        .route("/categories", get(listing::categories))
        .route("/category/:name", get(listing::category))
        .route("/close/:id", get(listing::close))
        .route("/comment/:id", post(listing::comment))
}

/// 세션 레이어 설정
pub fn session_layer(secure_cookies: bool) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)))
}

/// 미들웨어를 포함한 전체 애플리케이션
pub fn app(state: AppState, secure_cookies: bool) -> Router {
    routes()
        .layer(session_layer(secure_cookies))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .with_state(state)
}
