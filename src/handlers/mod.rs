// region:    --- Modules
pub mod account;
pub mod listing;
pub mod watchlist;

// endregion: --- Modules

// region:    --- Imports
use crate::auction::model::User;
use crate::error::AuctionError;
use crate::state::AppState;
use crate::view::{ListingPage, Viewer};
use axum::response::{IntoResponse, Response};
use axum::Json;

// endregion: --- Imports

/// 상품 상세 페이지 렌더링 (오류 메시지 포함 가능)
pub(crate) async fn render_listing(
    state: &AppState,
    listing_id: i64,
    viewer: &User,
    error: Option<String>,
) -> Response {
    match state
        .service
        .listing_details(listing_id, Some(viewer.id))
        .await
    {
        Ok(details) => Json(ListingPage {
            details,
            viewer: Some(Viewer::from(viewer)),
            error,
        })
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// 복구 가능한 오류는 상품 페이지에 표시하고, 나머지는 그대로 응답
pub(crate) async fn listing_error(
    state: &AppState,
    listing_id: i64,
    viewer: &User,
    err: AuctionError,
) -> Response {
    if err.is_recoverable() {
        render_listing(state, listing_id, viewer, Some(err.to_string())).await
    } else {
        err.into_response()
    }
}
