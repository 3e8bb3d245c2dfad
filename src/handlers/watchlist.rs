use crate::auction::model::WatchAction;
use crate::auth::AuthUser;
use crate::state::AppState;
use crate::view::{self, ListingsPage, Viewer};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

/// 관심 목록 추가/제거
pub async fn toggle(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((action, listing_id)): Path<(WatchAction, i64)>,
) -> impl IntoResponse {
    match state
        .service
        .toggle_watchlist(user.id, listing_id, action)
        .await
    {
        Ok(()) => view::found("/success"),
        Err(e) => e.into_response(),
    }
}

/// 관심 목록 조회
pub async fn view_watchlist(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> impl IntoResponse {
    match state.service.watchlist(user.id).await {
        Ok(listings) => Json(ListingsPage {
            heading: "Watchlist".to_string(),
            viewer: Some(Viewer::from(&user)),
            listings,
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}
